use image::RgbaImage;
use image::imageops::{self, FilterType};
use tracing::debug;

use crate::depth_pipeline::common::error::{ConversionError, Result};
use crate::depth_pipeline::visualize::{ColorImage, pack_argb};

/// Side length the exported network expects for both inputs.
pub const MODEL_INPUT_SIZE: usize = 518;

pub const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
pub const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Input tensors for the depth refinement network.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInputs {
    /// Normalized planar RGB, `[1, 3, H, W]`
    pub rgb: Vec<f32>,
    /// Prior depth from the red channel in `[0, 1]`, `[1, H, W]`
    pub prior_depth: Vec<f32>,
    pub height: usize,
    pub width: usize,
}

impl ModelInputs {
    /// Builds both tensors. Images must already be resized to a common size.
    pub fn prepare(rgb: &ColorImage, prior: &ColorImage) -> Result<Self> {
        let (width, height) = (rgb.width(), rgb.height());
        if (prior.width(), prior.height()) != (width, height) {
            return Err(ConversionError::ShapeMismatch(format!(
                "rgb is {}x{} but prior is {}x{}",
                width,
                height,
                prior.width(),
                prior.height()
            )));
        }

        let plane = width * height;
        let mut rgb_tensor = vec![0.0f32; 3 * plane];
        for (i, &p) in rgb.pixels().iter().enumerate() {
            let channels = [(p >> 16) & 0xFF, (p >> 8) & 0xFF, p & 0xFF];
            for (c, &value) in channels.iter().enumerate() {
                let unit = value as f32 / 255.0;
                rgb_tensor[c * plane + i] = (unit - IMAGENET_MEAN[c]) / IMAGENET_STD[c];
            }
        }

        let prior_depth = prior
            .pixels()
            .iter()
            .map(|&p| ((p >> 16) & 0xFF) as f32 / 255.0)
            .collect();

        debug!("Prepared model inputs at {}x{}", width, height);
        Ok(Self {
            rgb: rgb_tensor,
            prior_depth,
            height,
            width,
        })
    }

    /// Resizes both images to `size`x`size` before building the tensors.
    pub fn prepare_resized(rgb: &ColorImage, prior: &ColorImage, size: usize) -> Result<Self> {
        let rgb = resize(rgb, size)?;
        let prior = resize(prior, size)?;
        Self::prepare(&rgb, &prior)
    }

    pub fn rgb_shape(&self) -> [usize; 4] {
        [1, 3, self.height, self.width]
    }

    pub fn prior_shape(&self) -> [usize; 3] {
        [1, self.height, self.width]
    }
}

/// Bilinear resize to a square image.
fn resize(image: &ColorImage, size: usize) -> Result<ColorImage> {
    if image.width() == 0 || image.height() == 0 || size == 0 {
        return Err(ConversionError::InvalidDimensions(image.width(), image.height()));
    }
    let side = u32::try_from(size).map_err(|_| ConversionError::InvalidDimensions(size, size))?;
    let width = u32::try_from(image.width())
        .map_err(|_| ConversionError::InvalidDimensions(image.width(), image.height()))?;
    let height = u32::try_from(image.height())
        .map_err(|_| ConversionError::InvalidDimensions(image.width(), image.height()))?;

    let source = RgbaImage::from_raw(width, height, image.to_rgba8()).ok_or_else(|| {
        ConversionError::ShapeMismatch(format!("RGBA buffer does not match {}x{}", width, height))
    })?;
    let resized = imageops::resize(&source, side, side, FilterType::Triangle);

    let pixels = resized
        .pixels()
        .map(|p| pack_argb(p[0], p[1], p[2]))
        .collect();
    ColorImage::new(size, size, pixels)
}
