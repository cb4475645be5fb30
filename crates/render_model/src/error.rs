//! Error types for render model

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("No style configured for heading level {0}")]
    UnknownHeadingLevel(u8),

    #[error("Heading element has no level")]
    MissingHeadingLevel,

    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
