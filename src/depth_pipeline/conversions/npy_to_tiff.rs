use std::io::Write;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::depth_pipeline::{
    common::error::{ConversionError, Result},
    conversions::timing::PipelineTimings,
    npy::{DecodedField, FieldReader, NpyReader},
    tiff::{ConversionConfig, ImageWriter, OutputMode, StandardTiffWriter},
    visualize::{ColorImage, colorize, colorize_red_channel},
};

pub struct NpyToTiffPipeline<R: FieldReader, W: ImageWriter> {
    reader: R,
    writer: W,
    config: ConversionConfig,
}

impl NpyToTiffPipeline<NpyReader, StandardTiffWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            reader: NpyReader,
            writer: StandardTiffWriter,
            config,
        }
    }
}

/// Renders a decoded field according to `mode`.
pub fn render_field(field: &DecodedField, mode: OutputMode) -> ColorImage {
    match mode {
        OutputMode::Native => field.to_color_image(),
        OutputMode::Colorized(map) if field.channels() == 1 => colorize(&field.channel(0), map),
        OutputMode::Colorized(map) => colorize_red_channel(&field.to_color_image(), map),
    }
}

impl<R: FieldReader, W: ImageWriter> NpyToTiffPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!("Image dimensions {}x{} exceed maximum {}", width, height, max);
                return Err(ConversionError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    fn render_timed(&self, input_data: &[u8], timings: &mut PipelineTimings) -> Result<ColorImage> {
        let field = timings.measure("decode_npy", || {
            let _span = tracing::info_span!("decode_npy").entered();
            self.reader.read_field(input_data)
        })?;

        timings.measure("validate_dimensions", || {
            let _span = tracing::info_span!(
                "validate_dimensions",
                width = field.width(),
                height = field.height()
            )
            .entered();
            self.validate_dimensions(field.width(), field.height())
        })?;

        Ok(timings.measure("render", || {
            let _span = tracing::info_span!("render", mode = ?self.config.output_mode).entered();
            render_field(&field, self.config.output_mode)
        }))
    }

    /// Decodes `input_data` and renders it without encoding.
    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn render(&self, input_data: &[u8]) -> Result<ColorImage> {
        self.render_timed(input_data, &mut PipelineTimings::new())
    }

    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<()> {
        self.convert_with_timings(input_data, output).map(|_| ())
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert_with_timings(
        &self,
        input_data: &[u8],
        output: &mut dyn Write,
    ) -> Result<PipelineTimings> {
        info!("Starting NPY to TIFF conversion");
        let mut timings = PipelineTimings::new();

        let image = self.render_timed(input_data, &mut timings)?;

        timings.measure("encode_tiff", || {
            let _span = tracing::info_span!("encode_tiff").entered();
            self.writer.write_image(&image, output, &self.config)
        })?;

        info!(
            width = image.width(),
            height = image.height(),
            elapsed_ms = timings.total_duration().as_secs_f64() * 1000.0,
            "Conversion complete"
        );
        Ok(timings)
    }

    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<()> {
        self.convert_file_with_timings(input_path, output_path).map(|_| ())
    }

    /// Converts a file on disk. The output file is only created once rendering has succeeded.
    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file_with_timings<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<PipelineTimings> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let mut timings = PipelineTimings::new();
        let input_data = timings.measure("read_input_file", || {
            std::fs::read(input_path).map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })
        })?;

        let image = self.render_timed(&input_data, &mut timings)?;

        timings.measure("write_output_file", || {
            let mut output_file = std::fs::File::create(output_path).map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?;
            let _span = tracing::info_span!("encode_tiff").entered();
            self.writer.write_image(&image, &mut output_file, &self.config)
        })?;

        Ok(timings)
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }
}
