use std::io::Write;

use crate::depth_pipeline::common::error::Result;
use crate::depth_pipeline::tiff::types::ConversionConfig;
use crate::depth_pipeline::visualize::ColorImage;

pub trait ImageWriter {
    fn write_image(&self, image: &ColorImage, output: &mut dyn Write, config: &ConversionConfig) -> Result<()>;
}
