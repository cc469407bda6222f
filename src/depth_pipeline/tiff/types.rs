//! Conversion configuration types

use crate::depth_pipeline::visualize::ColorMap;

/// TIFF compression methods
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    #[default]
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression at the balanced level
    Deflate,
}

/// How a decoded field is turned into the output raster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// The decoder's own rendering: RGB as stored, single channel stretched to gray.
    #[default]
    Native,
    /// Min-max normalized through a color map. RGB input is reduced to its red channel.
    Colorized(ColorMap),
}

/// Configuration for NPY to TIFF conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    pub output_mode: OutputMode,
    pub compression: TiffCompression,
    /// Whether to reject empty or oversized images before encoding
    pub validate_dimensions: bool,
    pub max_dimension: Option<usize>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            output_mode: OutputMode::Native,
            compression: TiffCompression::None,
            validate_dimensions: true,
            max_dimension: Some(16384),
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    output_mode: Option<OutputMode>,
    compression: Option<TiffCompression>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
}

impl ConversionConfigBuilder {
    pub fn output_mode(mut self, mode: OutputMode) -> Self {
        self.output_mode = Some(mode);
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            output_mode: self.output_mode.unwrap_or(default.output_mode),
            compression: self.compression.unwrap_or(default.compression),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}
