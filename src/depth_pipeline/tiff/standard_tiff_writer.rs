use std::io::{Cursor, Write};

use ::tiff::encoder::compression::DeflateLevel;
use ::tiff::encoder::{Compression, TiffEncoder, colortype};
use tracing::debug;

use crate::depth_pipeline::common::error::{ConversionError, Result};
use crate::depth_pipeline::tiff::types::{ConversionConfig, TiffCompression};
use crate::depth_pipeline::tiff::writer::ImageWriter;
use crate::depth_pipeline::visualize::ColorImage;

pub struct StandardTiffWriter;

impl ImageWriter for StandardTiffWriter {
    fn write_image(&self, image: &ColorImage, output: &mut dyn Write, config: &ConversionConfig) -> Result<()> {
        debug!(
            "Encoding RGBA TIFF image: {}x{} ({:?})",
            image.width(),
            image.height(),
            config.compression
        );

        let width = u32::try_from(image.width())
            .map_err(|_| ConversionError::InvalidDimensions(image.width(), image.height()))?;
        let height = u32::try_from(image.height())
            .map_err(|_| ConversionError::InvalidDimensions(image.width(), image.height()))?;

        let compression = match config.compression {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::Deflate => Compression::Deflate(DeflateLevel::Balanced),
        };

        let mut buffer = Vec::new();
        let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?
            .with_compression(compression);

        encoder
            .write_image::<colortype::RGBA8>(width, height, &image.to_rgba8())
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
