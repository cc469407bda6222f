use tracing::trace;

use crate::depth_pipeline::visualize::normalize::Normalizer;
use crate::depth_pipeline::visualize::types::{ColorImage, DepthField, pack_argb};

/// How a normalized scalar becomes a color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorMap {
    /// Piecewise-linear blue, cyan, green, yellow, red ramp.
    #[default]
    Ramp,
    /// Linear gray level, for raw network output.
    Grayscale,
}

impl ColorMap {
    pub fn color(self, norm: f32) -> [u8; 3] {
        match self {
            Self::Ramp => ramp(norm),
            Self::Grayscale => {
                let gray = to_byte(norm);
                [gray, gray, gray]
            }
        }
    }
}

/// Four-segment ramp with breakpoints at 0.25, 0.5 and 0.75.
pub fn ramp(norm: f32) -> [u8; 3] {
    let norm = if norm.is_nan() { 0.0 } else { norm.clamp(0.0, 1.0) };

    if norm < 0.25 {
        let t = norm / 0.25;
        [0, to_byte(t), 255]
    } else if norm < 0.5 {
        let t = (norm - 0.25) / 0.25;
        [0, 255, to_byte(1.0 - t)]
    } else if norm < 0.75 {
        let t = (norm - 0.5) / 0.25;
        [to_byte(t), 255, 0]
    } else {
        let t = (norm - 0.75) / 0.25;
        [255, to_byte(1.0 - t), 0]
    }
}

fn to_byte(t: f32) -> u8 {
    (t * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Colors `field` after min-max normalizing it. Constant fields map to `norm = 0`.
pub fn colorize(field: &DepthField, map: ColorMap) -> ColorImage {
    let normalizer = Normalizer::display(field.values());
    trace!(
        min = normalizer.min(),
        range = normalizer.range(),
        ?map,
        "Colorizing {}x{} field",
        field.width(),
        field.height()
    );

    let pixels = field
        .values()
        .iter()
        .map(|&v| {
            let [r, g, b] = map.color(normalizer.normalize(v));
            pack_argb(r, g, b)
        })
        .collect();

    ColorImage::from_parts(field.width(), field.height(), pixels)
}

/// Recolors an RGB prior image using only its red channel as the scalar.
pub fn colorize_red_channel(image: &ColorImage, map: ColorMap) -> ColorImage {
    colorize(&image.red_channel(), map)
}
