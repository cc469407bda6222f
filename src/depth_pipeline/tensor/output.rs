use tracing::debug;

use crate::depth_pipeline::common::error::{ConversionError, Result};
use crate::depth_pipeline::visualize::DepthField;

impl DepthField {
    /// Wraps a model output tensor, typically shaped `[1, H, W]` or `[1, 1, H, W]`.
    ///
    /// The last two axes are height and width; every leading axis must be 1.
    pub fn from_tensor(data: &[f32], shape: &[usize]) -> Result<Self> {
        let (batch, spatial) = match shape.len() {
            n if n >= 2 => shape.split_at(n - 2),
            _ => {
                return Err(ConversionError::ShapeMismatch(format!(
                    "output tensor of shape {shape:?} has no spatial axes"
                )));
            }
        };
        if batch.iter().any(|&d| d != 1) {
            return Err(ConversionError::ShapeMismatch(format!(
                "output tensor of shape {shape:?} holds more than one depth map"
            )));
        }

        let (height, width) = (spatial[0], spatial[1]);
        let size = height
            .checked_mul(width)
            .ok_or_else(|| ConversionError::ShapeMismatch(format!("{shape:?} overflows")))?;
        if data.len() < size {
            return Err(ConversionError::ShapeMismatch(format!(
                "expected {size} values for shape {shape:?}, got {}",
                data.len()
            )));
        }

        debug!("Wrapped {}x{} output tensor", width, height);
        Ok(Self::from_parts(width, height, data[..size].to_vec()))
    }
}
