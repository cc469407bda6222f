//! Common utilities module
//!
//! Shared error types used across the depth pipeline.

pub mod error;

pub use error::{ConversionError, FormatError, Result};
