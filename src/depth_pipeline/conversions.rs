//! Pipeline conversions module
//!
//! Orchestrates decoding, visualization and encoding.

mod npy_to_tiff;
mod timing;

#[cfg(test)]
mod tests;

pub use npy_to_tiff::{NpyToTiffPipeline, render_field};
pub use timing::{PipelineTimings, StepTiming, Timer};
