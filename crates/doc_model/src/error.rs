//! Error types for document model operations

use crate::ElementKind;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocModelError {
    #[error("Invalid heading level {level} (expected 1-6)")]
    InvalidHeadingLevel { level: u8 },

    #[error("{kind:?} element is missing its heading level")]
    MissingHeadingLevel { kind: ElementKind },

    #[error("{kind:?} element must not carry a heading level")]
    UnexpectedLevel { kind: ElementKind },

    #[error("{kind:?} element is missing its list kind")]
    MissingListKind { kind: ElementKind },

    #[error("{kind:?} element must not carry a list kind")]
    UnexpectedListKind { kind: ElementKind },

    #[error("List child {index} is a {found:?}, expected ListItem")]
    InvalidListChild { index: usize, found: ElementKind },

    #[error("List item {index} does not match the list kind of its parent")]
    MismatchedListKind { index: usize },

    #[error("{kind:?} element must not have children")]
    UnexpectedChildren { kind: ElementKind },

    #[error("{kind:?} element has empty content")]
    EmptyContent { kind: ElementKind },

    #[error("Page break must not carry content")]
    PageBreakWithContent,

    #[error("Title element found at position {position}, expected position 0")]
    MisplacedTitle { position: usize },

    #[error("Document contains {count} title elements")]
    MultipleTitles { count: usize },
}

pub type Result<T> = std::result::Result<T, DocModelError>;
