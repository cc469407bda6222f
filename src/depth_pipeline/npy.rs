//! NPY decoding module
//!
//! Parses NumPy `.npy` containers into shaped numeric fields ready for display
//! or for feeding a model. Only `<f4` and `|u1` payloads with a rank-2 shape or a
//! rank-3 shape carrying a size-3 channel axis are recognized.

mod header;
mod npy_reader;
mod reader;
pub mod types;


pub use header::{MAGIC, NpyHeader};
pub use npy_reader::{NpyReader, decode_image};
pub use reader::FieldReader;
pub use types::{DecodedField, ElementType, Layout, PayloadFormat};
