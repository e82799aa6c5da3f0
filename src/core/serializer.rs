use crate::domain::model::LabRecord;
use crate::utils::error::Result;

/// Pretty-printed JSON array with two-space indentation; non-ASCII stays unescaped.
pub fn to_json(records: &[LabRecord]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(records)?)
}
