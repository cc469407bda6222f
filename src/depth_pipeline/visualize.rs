//! Depth visualization module
//!
//! Turns single-channel numeric fields into false-color or gray rasters using a
//! min-max normalization computed over the whole field.

mod colormap;
mod normalize;
pub mod types;


pub use colormap::{ColorMap, colorize, colorize_red_channel, ramp};
pub use normalize::Normalizer;
pub use types::{ColorImage, DepthField, pack_argb};
