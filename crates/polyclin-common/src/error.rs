use thiserror::Error;

/// A single rejected form field. Assembly is all-or-nothing, so the first
/// bad field aborts the whole submission.
#[derive(Debug, Clone, Error)]
#[error("invalid value for field '{field}' (position {index}): {raw:?}")]
pub struct ValidationError {
    pub field: &'static str,
    pub index: usize,
    pub raw: String,
}
