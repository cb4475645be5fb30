//! DOCX Export Public API

use super::error::DocxResult;
use super::writer::{package, DocxParts};
use doc_model::DocumentElement;
use render_model::RenderConfig;

/// Heading of the document written when rendering fails
pub const ERROR_HEADING_TEXT: &str = "Document Generation Error";

/// Explanation written below [`ERROR_HEADING_TEXT`]
pub const ERROR_PARAGRAPH_TEXT: &str =
    "An error occurred while generating this document. Please try again.";

/// Render an element sequence to DOCX bytes
///
/// XML generation runs on the caller's task; zipping runs on the blocking
/// pool. Any failure discards the partial output and a two-paragraph
/// error document is packaged instead. Only a failure to package that
/// fallback is returned.
pub async fn render_docx(elements: &[DocumentElement]) -> DocxResult<Vec<u8>> {
    let config = RenderConfig::standard();

    match render_document(elements, config).await {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            tracing::warn!("DOCX rendering failed, writing error document: {}", e);
            let fallback = [
                DocumentElement::heading(1, ERROR_HEADING_TEXT),
                DocumentElement::paragraph(ERROR_PARAGRAPH_TEXT),
            ];
            render_document(&fallback, config).await
        }
    }
}

async fn render_document(
    elements: &[DocumentElement],
    config: &RenderConfig,
) -> DocxResult<Vec<u8>> {
    let parts = DocxParts::build(elements, config)?;
    tracing::debug!("Packaging DOCX ({} bytes of document.xml)", parts.document.len());
    tokio::task::spawn_blocking(move || package(&parts)).await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::ListKind;
    use std::io::{Cursor, Read};

    fn document_xml(bytes: Vec<u8>) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        xml
    }

    #[tokio::test]
    async fn test_render_has_signature() {
        let bytes = render_docx(&[DocumentElement::title("Report")]).await.unwrap();
        assert!(bytes.starts_with(b"PK\x03\x04"));
    }

    #[tokio::test]
    async fn test_render_contents() {
        let bytes = render_docx(&[
            DocumentElement::title("Report"),
            DocumentElement::list(ListKind::Unordered, ["One"]),
        ])
        .await
        .unwrap();
        let xml = document_xml(bytes);
        assert!(xml.contains("<w:t>Report</w:t>"));
        assert!(xml.contains("<w:t>\u{2022} One</w:t>"));
    }

    #[tokio::test]
    async fn test_malformed_element_falls_back() {
        let bytes = render_docx(&[
            DocumentElement::paragraph("kept?"),
            DocumentElement::heading(9, "Too deep"),
        ])
        .await
        .unwrap();
        assert!(bytes.starts_with(b"PK\x03\x04"));

        let xml = document_xml(bytes);
        assert!(xml.contains(ERROR_HEADING_TEXT));
        assert!(xml.contains(ERROR_PARAGRAPH_TEXT));
        assert!(!xml.contains("kept?"));
    }
}
