//! One-call front half of the export pipeline

use crate::parser::parse;
use crate::sanitize::preprocess;
use crate::validate::{validate, ValidationReport};
use doc_model::DocumentElement;

/// Parsed elements together with the advisory validation verdict
#[derive(Debug, Clone, PartialEq)]
pub struct ImportResult {
    pub elements: Vec<DocumentElement>,
    pub validation: ValidationReport,
}

/// Preprocess, validate and parse content.
///
/// Validation problems are logged and returned but never stop parsing.
pub fn import(html: &str, title: &str) -> ImportResult {
    let cleaned = preprocess(html);
    let validation = validate(&cleaned);
    for error in &validation.errors {
        tracing::warn!("Content validation: {}", error);
    }

    let elements = parse(&cleaned, title);
    tracing::debug!(
        "Imported {} elements ({} input bytes)",
        elements.len(),
        html.len()
    );

    ImportResult {
        elements,
        validation,
    }
}
