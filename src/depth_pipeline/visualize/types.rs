//! Raster and field types

use crate::depth_pipeline::common::error::{ConversionError, Result};

/// Packs an opaque pixel as `0xAARRGGBB`.
#[inline]
pub fn pack_argb(r: u8, g: u8, b: u8) -> u32 {
    0xFF00_0000 | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Packed 32-bit ARGB raster, row-major with the origin at the top left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorImage {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl ColorImage {
    pub fn new(width: usize, height: usize, pixels: Vec<u32>) -> Result<Self> {
        check_len(width, height, pixels.len())?;
        Ok(Self::from_parts(width, height, pixels))
    }

    pub(crate) fn from_parts(width: usize, height: usize, pixels: Vec<u32>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    /// `[r, g, b, a]` of the pixel at `(x, y)`.
    pub fn rgba(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        self.pixel(x, y).map(unpack)
    }

    /// Byte-per-channel RGBA buffer, as image encoders expect it.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|&p| unpack(p)).collect()
    }

    /// The red channel as a scalar field, the proxy used for prior depth images.
    pub fn red_channel(&self) -> DepthField {
        let values = self.pixels.iter().map(|&p| ((p >> 16) & 0xFF) as f32).collect();
        DepthField::from_parts(self.width, self.height, values)
    }
}

fn unpack(p: u32) -> [u8; 4] {
    let [a, r, g, b] = p.to_be_bytes();
    [r, g, b, a]
}

/// Single-channel scalar field, e.g. estimated depth or disparity per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthField {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl DepthField {
    pub fn new(width: usize, height: usize, values: Vec<f32>) -> Result<Self> {
        check_len(width, height, values.len())?;
        Ok(Self::from_parts(width, height, values))
    }

    pub(crate) fn from_parts(width: usize, height: usize, values: Vec<f32>) -> Self {
        Self {
            width,
            height,
            values,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

fn check_len(width: usize, height: usize, len: usize) -> Result<()> {
    match width.checked_mul(height) {
        Some(expected) if expected == len => Ok(()),
        _ => Err(ConversionError::ShapeMismatch(format!(
            "{width}x{height} raster cannot hold {len} values"
        ))),
    }
}
