//! Error types for HTML import

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Element nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },
}

pub type Result<T> = std::result::Result<T, ParseError>;
