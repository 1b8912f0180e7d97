//! Error types for report generation

use thiserror::Error;

/// Result type alias for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while building or emitting a report
#[derive(Error, Debug)]
pub enum ReportError {
    /// A required record is absent or could not be decoded
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The output bytes could not be produced
    #[error("render failed: {0}")]
    Render(String),

    /// Configuration could not be loaded or violates a layout precondition
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Writing the artifact failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ReportError {
    pub(crate) fn missing(record: &str) -> Self {
        ReportError::InvalidInput(format!("{record} record is missing"))
    }
}
