use thiserror::Error;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Raw text matched neither recognized document shape
    #[error("Parse error: {0}")]
    Parse(#[from] hdf_report::ReportError),

    /// Reading file text failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
