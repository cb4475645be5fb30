//! Error types for DOCX operations

use thiserror::Error;

/// Errors that can occur during DOCX export
#[derive(Debug, Error)]
pub enum DocxError {
    /// IO error while writing the archive
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Document model error
    #[error("Document model error: {0}")]
    DocModel(#[from] doc_model::DocModelError),

    /// Render configuration error
    #[error("Render configuration error: {0}")]
    Config(#[from] render_model::RenderError),

    /// The packaging task did not complete
    #[error("Packaging task failed: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for DocxError {
    fn from(err: tokio::task::JoinError) -> Self {
        DocxError::Task(err.to_string())
    }
}

/// Result type for DOCX operations
pub type DocxResult<T> = std::result::Result<T, DocxError>;
