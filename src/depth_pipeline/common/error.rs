use thiserror::Error;

/// Reasons an NPY stream cannot be turned into a decoded field.
///
/// Every variant aborts the whole decode; no partial field is ever produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Stream does not start with the NPY magic sequence")]
    BadMagic,

    #[error("Malformed NPY header: {0}")]
    BadHeader(String),

    #[error("Unsupported array shape: {0:?}")]
    UnsupportedShape(Vec<usize>),

    #[error("Unsupported dtype '{descr}' for {channels}-channel data")]
    UnsupportedDtype { descr: String, channels: usize },

    #[error("Truncated payload: expected {expected} bytes, found {available}")]
    TruncatedPayload { expected: usize, available: usize },
}

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to decode NPY data: {0}")]
    Format(#[from] FormatError),

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Buffer does not match its declared shape: {0}")]
    ShapeMismatch(String),

    #[error("Missing sample asset: {0}")]
    MissingAsset(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
