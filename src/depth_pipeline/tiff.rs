//! TIFF writing module
//!
//! Encodes color rasters as 8-bit RGBA TIFF files.

mod standard_tiff_writer;
pub mod types;
mod writer;

pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{ConversionConfig, ConversionConfigBuilder, OutputMode, TiffCompression};
pub use writer::ImageWriter;
