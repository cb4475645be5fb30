//! PDF Export Public API

use super::document::DocumentInfo;
use super::layout::{layout_document, LaidOutPage};
use super::options::PdfExportOptions;
use super::writer::{write_document, PdfResult};
use doc_model::{DocumentElement, ElementKind};
use render_model::RenderConfig;

/// Text of the paragraph written when rendering fails
pub const ERROR_DOCUMENT_TEXT: &str = "Error generating document";

/// Render an element sequence to PDF bytes with default options
///
/// Rendering never fails on bad input: a malformed element discards the
/// partial output and a one-paragraph error document is written instead.
///
/// # Example
///
/// ```ignore
/// use doc_model::DocumentElement;
/// use export::pdf::render_pdf;
///
/// let bytes = render_pdf(&[DocumentElement::title("Report")])?;
/// assert!(bytes.starts_with(b"%PDF-"));
/// ```
pub fn render_pdf(elements: &[DocumentElement]) -> PdfResult<Vec<u8>> {
    render_pdf_with_options(elements, &PdfExportOptions::default())
}

/// Render an element sequence to PDF bytes
pub fn render_pdf_with_options(
    elements: &[DocumentElement],
    options: &PdfExportOptions,
) -> PdfResult<Vec<u8>> {
    let config = RenderConfig::standard();

    match render_document(elements, config, options) {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            tracing::warn!("PDF rendering failed, writing error document: {}", e);
            let fallback = [DocumentElement::paragraph(ERROR_DOCUMENT_TEXT)];
            render_document(&fallback, config, options)
        }
    }
}

fn render_document(
    elements: &[DocumentElement],
    config: &RenderConfig,
    options: &PdfExportOptions,
) -> PdfResult<Vec<u8>> {
    let pages: Vec<LaidOutPage> = layout_document(elements, config)?;
    let title = elements
        .iter()
        .find(|e| e.kind == ElementKind::Title)
        .map(|e| e.content.as_str());

    tracing::debug!("Writing PDF with {} page(s)", pages.len());
    write_document(&pages, &DocumentInfo::new(title), &config.page, options)
}
