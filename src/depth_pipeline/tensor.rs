//! Model tensor glue
//!
//! Converts between decoded images and the flat float buffers exchanged with the
//! depth refinement network. The inference runtime itself is not involved here.

mod inputs;
mod output;

#[cfg(test)]
mod tests;

pub use inputs::{IMAGENET_MEAN, IMAGENET_STD, MODEL_INPUT_SIZE, ModelInputs};
