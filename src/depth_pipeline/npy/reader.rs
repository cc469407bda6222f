use crate::depth_pipeline::common::error::Result;
use crate::depth_pipeline::npy::types::DecodedField;

pub trait FieldReader {
    fn read_field(&self, data: &[u8]) -> Result<DecodedField>;
}
