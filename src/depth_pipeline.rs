//! Depth visualization pipeline module
//!
//! NPY decoding, depth colorization, model tensor glue and TIFF output, with a
//! pipeline type tying them together.

pub mod common;
pub mod conversions;
pub mod npy;
pub mod sample;
pub mod tensor;
pub mod tiff;
pub mod visualize;

pub use common::{ConversionError, FormatError, Result};

pub use npy::{DecodedField, ElementType, FieldReader, Layout, NpyHeader, NpyReader, PayloadFormat, decode_image};

pub use visualize::{ColorImage, ColorMap, DepthField, colorize, colorize_red_channel};

pub use tensor::{MODEL_INPUT_SIZE, ModelInputs};

pub use self::tiff::{
    ConversionConfig, ConversionConfigBuilder, ImageWriter, OutputMode, StandardTiffWriter, TiffCompression,
};

pub use conversions::{NpyToTiffPipeline, PipelineTimings, render_field};

pub use sample::{LoadedSample, Sample};
