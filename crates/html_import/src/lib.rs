//! HTML Import - From sanitized HTML to the canonical element sequence
//!
//! The front half of the export pipeline:
//!
//! - `sanitize`: [`preprocess`] strips executable content, normalizes
//!   whitespace and void tags, and canonicalizes page-break markers
//! - `validate`: [`validate`] produces advisory structural warnings
//! - `tree`: html5ever parsing into a closed [`Node`] tree
//! - `parser`: [`parse`] walks the tree into [`doc_model::DocumentElement`]s
//!
//! Nothing in this crate fails the pipeline: malformed input degrades into
//! warnings or a single fallback paragraph.

mod error;
mod import;
mod parser;
mod sanitize;
mod sink;
mod tree;
mod validate;

pub use error::{ParseError, Result};
pub use import::{import, ImportResult};
pub use parser::{parse, PARSE_FAILURE_TEXT};
pub use sanitize::{preprocess, PAGE_BREAK_TAG, PAGE_BREAK_TOKEN};
pub use tree::{parse_tree, Document, Element, Node, MAX_NESTING_DEPTH};
pub use validate::{validate, ValidationReport, EMPTY_CONTENT_ERROR, UNBALANCED_TAG_THRESHOLD};
