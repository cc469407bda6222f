//! NPY field reader.
//!
//! Decoding is all-or-nothing: the header is validated, the payload length is
//! checked against the declared shape, and only then are values materialized.

use tracing::{debug, warn};

use crate::depth_pipeline::common::error::{FormatError, Result};
use crate::depth_pipeline::npy::header::NpyHeader;
use crate::depth_pipeline::npy::reader::FieldReader;
use crate::depth_pipeline::npy::types::{DecodedField, ElementType, PayloadFormat};
use crate::depth_pipeline::visualize::ColorImage;

/// Reader for in-memory `.npy` buffers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NpyReader;

impl NpyReader {
    /// Decodes `data`, reporting failures as a bare [`FormatError`].
    pub fn decode(&self, data: &[u8]) -> std::result::Result<DecodedField, FormatError> {
        debug!("Decoding NPY buffer, {} bytes", data.len());

        let (header, payload_start) =
            NpyHeader::parse(data).inspect_err(|e| warn!("Rejected NPY header: {e}"))?;
        let format =
            PayloadFormat::resolve(&header).inspect_err(|e| warn!("Rejected NPY layout: {e}"))?;

        let payload = &data[payload_start..];
        let expected = format
            .payload_len()
            .ok_or_else(|| FormatError::UnsupportedShape(header.shape.clone()))?;
        if payload.len() < expected {
            return Err(FormatError::TruncatedPayload {
                expected,
                available: payload.len(),
            });
        }

        let flat = read_values(format.element, &payload[..expected]);
        let data = reorder(&format, header.fortran_order, &flat);

        debug!(
            "Decoded {:?} {:?} field: {}x{}",
            format.layout, format.element, format.width, format.height
        );
        Ok(DecodedField::new(format, data))
    }
}

impl FieldReader for NpyReader {
    fn read_field(&self, data: &[u8]) -> Result<DecodedField> {
        Ok(self.decode(data)?)
    }
}

/// Decodes an NPY buffer straight to a displayable image.
pub fn decode_image(data: &[u8]) -> Result<ColorImage> {
    Ok(NpyReader.decode(data)?.to_color_image())
}

fn read_values(element: ElementType, payload: &[u8]) -> Vec<f32> {
    match element {
        ElementType::Float32Le => payload
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect(),
        ElementType::UInt8 => payload.iter().map(|&b| f32::from(b)).collect(),
    }
}

/// Rearranges storage-order values into row-major interleaved `(H, W, C)`.
fn reorder(format: &PayloadFormat, fortran_order: bool, flat: &[f32]) -> Vec<f32> {
    let channels = format.layout.channels();
    let mut out = Vec::with_capacity(flat.len());
    for y in 0..format.height {
        for x in 0..format.width {
            for c in 0..channels {
                out.push(flat[format.offset(fortran_order, y, x, c)]);
            }
        }
    }
    out
}
