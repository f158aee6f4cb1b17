use thiserror::Error;

/// Result type for report parsing operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while recognizing or decoding scan documents
#[derive(Error, Debug)]
pub enum ReportError {
    /// Text matched neither the evaluation nor the profile document shape
    #[error("Unrecognized document format: {0}")]
    UnrecognizedFormat(String),

    /// Document was JSON but failed to decode into the expected shape
    #[error("Malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl ReportError {
    /// Create an unrecognized-format error
    pub fn unrecognized(msg: impl Into<String>) -> Self {
        Self::UnrecognizedFormat(msg.into())
    }
}
