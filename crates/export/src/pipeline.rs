//! Production path: HTML in, data URI out

use crate::docx::render_docx;
use crate::error::ExportResult;
use crate::format::{to_data_uri, Format};
use crate::pdf::render_pdf;
use doc_model::DocumentElement;

/// Render an element sequence in one format
pub async fn render(elements: &[DocumentElement], format: Format) -> ExportResult<Vec<u8>> {
    let bytes = match format {
        Format::Pdf => render_pdf(elements)?,
        Format::Docx => render_docx(elements).await?,
    };
    Ok(bytes)
}

/// Render both formats concurrently over the same sequence.
///
/// Returns the PDF result first.
pub async fn render_both(
    elements: &[DocumentElement],
) -> (ExportResult<Vec<u8>>, ExportResult<Vec<u8>>) {
    tokio::join!(render(elements, Format::Pdf), render(elements, Format::Docx))
}

/// Convert `content` (HTML or plain text) into a rendered document and
/// return it as a base64 data URI.
///
/// Validation problems are logged and never block rendering.
pub async fn generate_document(content: &str, title: &str, format: Format) -> ExportResult<String> {
    let imported = html_import::import(content, title);
    tracing::debug!(
        "Rendering {} element(s) as {}",
        imported.elements.len(),
        format
    );

    let bytes = render(&imported.elements, format).await?;
    Ok(to_data_uri(format, &bytes))
}
