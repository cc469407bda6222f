//! Sample directories
//!
//! A sample is a directory holding an `rgb.npy` image and a prior depth map named
//! `prior_depth.npy` or `gt_depth.npy`. Names are matched case-insensitively.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::depth_pipeline::common::error::{ConversionError, Result};
use crate::depth_pipeline::npy::FieldReader;
use crate::depth_pipeline::tensor::{MODEL_INPUT_SIZE, ModelInputs};
use crate::depth_pipeline::visualize::{ColorImage, ColorMap, colorize_red_channel};

const RGB_NAME: &str = "rgb.npy";
const PRIOR_NAMES: [&str; 2] = ["prior_depth.npy", "gt_depth.npy"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub rgb: PathBuf,
    pub prior: PathBuf,
}

/// Decoded images of a sample.
#[derive(Debug, Clone)]
pub struct LoadedSample {
    pub rgb: ColorImage,
    pub prior: ColorImage,
}

impl Sample {
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(|e| ConversionError::InputReadError(format!("{}: {}", dir.display(), e)))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file())
            .collect();
        files.sort();

        let find = |name: &str| {
            files
                .iter()
                .find(|path| {
                    path.file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.eq_ignore_ascii_case(name))
                })
                .cloned()
        };

        let rgb = find(RGB_NAME).ok_or_else(|| {
            ConversionError::MissingAsset(format!("no {} in {}", RGB_NAME, dir.display()))
        })?;
        let prior = PRIOR_NAMES.iter().find_map(|name| find(name)).ok_or_else(|| {
            ConversionError::MissingAsset(format!(
                "no {} in {}",
                PRIOR_NAMES.join(" or "),
                dir.display()
            ))
        })?;

        debug!(rgb = %rgb.display(), prior = %prior.display(), "Discovered sample");
        Ok(Self { rgb, prior })
    }

    pub fn load<R: FieldReader>(&self, reader: &R) -> Result<LoadedSample> {
        let read = |path: &Path| -> Result<ColorImage> {
            let bytes = std::fs::read(path)
                .map_err(|e| ConversionError::InputReadError(format!("{}: {}", path.display(), e)))?;
            Ok(reader.read_field(&bytes)?.to_color_image())
        };

        let rgb = read(&self.rgb)?;
        let prior = read(&self.prior)?;
        info!(
            "Loaded sample: rgb {}x{}, prior {}x{}",
            rgb.width(),
            rgb.height(),
            prior.width(),
            prior.height()
        );
        Ok(LoadedSample { rgb, prior })
    }
}

impl LoadedSample {
    /// The prior recolored for display.
    pub fn prior_preview(&self, map: ColorMap) -> ColorImage {
        colorize_red_channel(&self.prior, map)
    }

    /// Network inputs, with both images resized to `MODEL_INPUT_SIZE`.
    pub fn model_inputs(&self) -> Result<ModelInputs> {
        ModelInputs::prepare_resized(&self.rgb, &self.prior, MODEL_INPUT_SIZE)
    }
}
