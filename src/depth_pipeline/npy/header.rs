//! NPY preamble and header dictionary parsing.

use tracing::debug;

use crate::depth_pipeline::common::error::FormatError;

/// The NPY magic prefix: `\x93NUMPY`.
pub const MAGIC: [u8; 6] = *b"\x93NUMPY";

const DESCR_KEY: &str = "'descr': '";
const FORTRAN_KEY: &str = "'fortran_order': ";
const SHAPE_KEY: &str = "'shape': (";

/// Metadata carried by the textual header of an NPY file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpyHeader {
    /// Axis lengths; empty for a scalar.
    pub shape: Vec<usize>,
    /// Dtype descriptor, e.g. `<f4` or `|u1`.
    pub descr: String,
    /// Whether the payload is stored column-major.
    pub fortran_order: bool,
}

impl NpyHeader {
    /// Parses the preamble and header of `data`.
    ///
    /// Returns the header and the byte offset at which the payload starts.
    pub fn parse(data: &[u8]) -> Result<(Self, usize), FormatError> {
        let mut cursor = ByteCursor::new(data);

        let magic = cursor.take(MAGIC.len()).map_err(|_| FormatError::BadMagic)?;
        if magic != MAGIC {
            return Err(FormatError::BadMagic);
        }

        let version = cursor.take(2)?;
        let (major, minor) = (version[0], version[1]);

        let header_len = if major == 1 {
            let raw = cursor.take(2)?;
            u16::from_le_bytes([raw[0], raw[1]]) as usize
        } else {
            let raw = cursor.take(4)?;
            u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]) as usize
        };

        let text = cursor.take(header_len)?;
        let text = std::str::from_utf8(text)
            .ok()
            .filter(|s| s.is_ascii())
            .ok_or_else(|| FormatError::BadHeader("header is not ASCII".to_string()))?;

        let header = Self::parse_dict(text)?;
        debug!(
            major,
            minor,
            descr = %header.descr,
            fortran_order = header.fortran_order,
            shape = ?header.shape,
            "Parsed NPY header"
        );

        Ok((header, cursor.position()))
    }

    /// Extracts `descr`, `fortran_order` and `shape` from the header dictionary literal,
    /// e.g. `{'descr': '<f4', 'fortran_order': False, 'shape': (518, 518, 3), }`.
    pub fn parse_dict(dict: &str) -> Result<Self, FormatError> {
        let dict = dict.trim();

        let descr = value_after(dict, DESCR_KEY, '\'')?.to_string();

        let fortran = value_after(dict, FORTRAN_KEY, ',')?.trim();
        let fortran_order = if fortran.eq_ignore_ascii_case("true") {
            true
        } else if fortran.eq_ignore_ascii_case("false") {
            false
        } else {
            return Err(FormatError::BadHeader(format!(
                "invalid fortran_order value '{fortran}'"
            )));
        };

        let shape = value_after(dict, SHAPE_KEY, ')')?
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.parse::<usize>().map_err(|_| {
                    FormatError::BadHeader(format!("invalid shape token '{token}'"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            shape,
            descr,
            fortran_order,
        })
    }
}

/// Returns the text between `key` and the next `terminator`.
fn value_after<'a>(dict: &'a str, key: &str, terminator: char) -> Result<&'a str, FormatError> {
    let start = dict
        .find(key)
        .map(|i| i + key.len())
        .ok_or_else(|| FormatError::BadHeader(format!("missing key {}", key.trim())))?;
    let rest = &dict[start..];
    let end = rest.find(terminator).ok_or_else(|| {
        FormatError::BadHeader(format!("unterminated value for {}", key.trim()))
    })?;
    Ok(&rest[..end])
}

struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], FormatError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| FormatError::BadHeader("stream ended inside the header".to_string()))?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn position(&self) -> usize {
        self.pos
    }
}
