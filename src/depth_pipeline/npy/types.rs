//! Decoded NPY data types

use crate::depth_pipeline::common::error::FormatError;
use crate::depth_pipeline::npy::header::NpyHeader;
use crate::depth_pipeline::visualize::{ColorImage, DepthField, Normalizer, pack_argb};

/// Element type of an NPY payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    /// `<f4`: 32-bit little-endian IEEE-754 float
    Float32Le,
    /// `|u1`: unsigned byte
    UInt8,
}

impl ElementType {
    pub fn from_descr(descr: &str) -> Option<Self> {
        match descr {
            "<f4" => Some(Self::Float32Le),
            "|u1" => Some(Self::UInt8),
            _ => None,
        }
    }

    pub fn size(self) -> usize {
        match self {
            Self::Float32Le => 4,
            Self::UInt8 => 1,
        }
    }
}

/// How pixels are arranged along the array axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `(H, W)`
    Mono,
    /// `(H, W, 3)`
    RgbInterleaved,
    /// `(3, H, W)`
    RgbPlanar,
}

impl Layout {
    pub fn channels(self) -> usize {
        match self {
            Self::Mono => 1,
            Self::RgbInterleaved | Self::RgbPlanar => 3,
        }
    }

    /// Axis indices of element `(y, x, c)` in the array.
    fn axes(self, y: usize, x: usize, c: usize) -> [usize; 3] {
        match self {
            Self::Mono => [y, x, 0],
            Self::RgbInterleaved => [y, x, c],
            Self::RgbPlanar => [c, y, x],
        }
    }
}

/// Element type and layout of a payload, decided once after the header is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadFormat {
    pub element: ElementType,
    pub layout: Layout,
    pub height: usize,
    pub width: usize,
}

impl PayloadFormat {
    /// Resolves the payload format of `header`.
    ///
    /// A rank-3 shape whose first axis is 3 is taken as planar even when its last
    /// axis is also 3.
    pub fn resolve(header: &NpyHeader) -> Result<Self, FormatError> {
        let (layout, height, width) = match header.shape.as_slice() {
            &[h, w] => (Layout::Mono, h, w),
            &[3, h, w] => (Layout::RgbPlanar, h, w),
            &[h, w, 3] => (Layout::RgbInterleaved, h, w),
            other => return Err(FormatError::UnsupportedShape(other.to_vec())),
        };

        let unsupported = || FormatError::UnsupportedDtype {
            descr: header.descr.clone(),
            channels: layout.channels(),
        };
        let element = ElementType::from_descr(&header.descr).ok_or_else(unsupported)?;
        if layout == Layout::Mono && element == ElementType::UInt8 {
            return Err(unsupported());
        }

        Ok(Self {
            element,
            layout,
            height,
            width,
        })
    }

    pub fn element_count(&self) -> Option<usize> {
        self.height
            .checked_mul(self.width)?
            .checked_mul(self.layout.channels())
    }

    /// Number of payload bytes the declared shape and dtype require.
    pub fn payload_len(&self) -> Option<usize> {
        self.element_count()?.checked_mul(self.element.size())
    }

    /// Flat-array offset of pixel `(y, x)` channel `c`, honouring the storage order.
    pub(crate) fn offset(&self, fortran_order: bool, y: usize, x: usize, c: usize) -> usize {
        let dims = match self.layout {
            Layout::Mono => [self.height, self.width, 1],
            Layout::RgbInterleaved => [self.height, self.width, 3],
            Layout::RgbPlanar => [3, self.height, self.width],
        };
        let strides = if fortran_order {
            [1, dims[0], dims[0] * dims[1]]
        } else {
            [dims[1] * dims[2], dims[2], 1]
        };
        let idx = self.layout.axes(y, x, c);
        idx[0] * strides[0] + idx[1] * strides[1] + idx[2] * strides[2]
    }
}

/// A decoded NPY array, rearranged to row-major interleaved `(H, W, C)` order.
///
/// `|u1` values keep their 0-255 magnitude; `<f4` values are kept as read.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedField {
    width: usize,
    height: usize,
    format: PayloadFormat,
    data: Vec<f32>,
}

impl DecodedField {
    pub(crate) fn new(format: PayloadFormat, data: Vec<f32>) -> Self {
        debug_assert_eq!(Some(data.len()), format.element_count());
        Self {
            width: format.width,
            height: format.height,
            format,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.format.layout.channels()
    }

    pub fn format(&self) -> PayloadFormat {
        self.format
    }

    /// Interleaved values, `channels()` per pixel.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Extracts channel `c` as a single-channel field.
    ///
    /// # Panics
    ///
    /// Panics if `c >= self.channels()`.
    pub fn channel(&self, c: usize) -> DepthField {
        let channels = self.channels();
        assert!(c < channels, "channel {c} out of range for {channels}-channel field");
        let values = self.data.iter().skip(c).step_by(channels).copied().collect();
        DepthField::from_parts(self.width, self.height, values)
    }

    /// Renders the field for display.
    ///
    /// RGB floats are scaled by 255 and clamped, RGB bytes are used directly, and a
    /// single-channel field is min-max stretched to gray.
    pub fn to_color_image(&self) -> ColorImage {
        let pixels = match (self.format.layout, self.format.element) {
            (Layout::Mono, _) => {
                let normalizer = Normalizer::stretch(&self.data);
                self.data
                    .iter()
                    .map(|&v| {
                        let gray = normalizer.gray(v);
                        pack_argb(gray, gray, gray)
                    })
                    .collect()
            }
            (_, ElementType::Float32Le) => self
                .data
                .chunks_exact(3)
                .map(|rgb| pack_argb(unit_to_byte(rgb[0]), unit_to_byte(rgb[1]), unit_to_byte(rgb[2])))
                .collect(),
            (_, ElementType::UInt8) => self
                .data
                .chunks_exact(3)
                .map(|rgb| pack_argb(rgb[0] as u8, rgb[1] as u8, rgb[2] as u8))
                .collect(),
        };

        ColorImage::from_parts(self.width, self.height, pixels)
    }
}

fn unit_to_byte(v: f32) -> u8 {
    (v * 255.0).clamp(0.0, 255.0) as u8
}
