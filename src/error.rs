use thiserror::Error;

#[derive(Error, Debug)]
pub enum SoftKeysError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Layout Error: a layout must contain at least one row")]
    EmptyLayout,

    #[error("Layout Error: {scope} has non-finite {field} ({value})")]
    InvalidGeometry {
        scope: String,
        field: &'static str,
        value: f32,
    },

    #[error("Unknown layout: {0}")]
    UnknownLayout(String),

    #[error("Configuration Error: {0}")]
    Config(String),
}

impl SoftKeysError {
    /// Structural errors make the whole layout unusable; the caller is
    /// expected to substitute the fallback layout.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            SoftKeysError::EmptyLayout | SoftKeysError::InvalidGeometry { .. }
        )
    }
}

pub type SkResult<T> = Result<T, SoftKeysError>;
