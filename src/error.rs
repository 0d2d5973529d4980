//! Error handling for the approval finder

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApprovalFinderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not read document '{document}': {reason}")]
    DocumentRead { document: String, reason: String },

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("PDF rendering error: {0}")]
    PdfRender(String),
}

impl ApprovalFinderError {
    pub fn document_read(document: impl Into<String>, reason: impl ToString) -> Self {
        ApprovalFinderError::DocumentRead {
            document: document.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApprovalFinderError>;

