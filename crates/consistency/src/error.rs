//! Error types for consistency validation

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsistencyError {
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<quick_xml::Error> for ConsistencyError {
    fn from(err: quick_xml::Error) -> Self {
        ConsistencyError::Xml(err.to_string())
    }
}

pub type ConsistencyResult<T> = std::result::Result<T, ConsistencyError>;
