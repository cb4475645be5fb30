//! Error types for the export pipeline

use crate::docx::DocxError;
use crate::pdf::PdfError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF rendering failed: {0}")]
    Pdf(#[from] PdfError),

    #[error("DOCX rendering failed: {0}")]
    Docx(#[from] DocxError),

    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    #[error("Base64 decoding failed: {0}")]
    Base64(#[from] base64::DecodeError),
}

pub type ExportResult<T> = std::result::Result<T, ExportError>;
