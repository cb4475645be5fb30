//! DOCX Writer Infrastructure
//!
//! Builds the XML parts of a package and writes them into a ZIP archive
//! with the correct DOCX structure.

use super::content_types::{create_default_content_types, ContentTypes};
use super::document_writer::DocumentWriter;
use super::error::DocxResult;
use super::relationships::{create_document_rels, create_root_rels, Relationships};
use super::styles_writer::StylesWriter;
use super::{escape_xml, namespaces};
use chrono::{DateTime, Utc};
use doc_model::{DocumentElement, ElementKind};
use render_model::RenderConfig;
use std::io::{Cursor, Seek, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// The generated XML parts of a package, ready to be zipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocxParts {
    pub document: String,
    pub styles: String,
    pub settings: String,
    pub core: String,
}

impl DocxParts {
    /// Generate every part for an element sequence
    pub fn build(elements: &[DocumentElement], config: &RenderConfig) -> DocxResult<Self> {
        let title = elements
            .iter()
            .find(|e| e.kind == ElementKind::Title)
            .map(|e| e.content.as_str());

        Ok(Self {
            document: DocumentWriter::new(config).write(elements)?,
            styles: StylesWriter::new(config).write(),
            settings: generate_settings_xml(),
            core: generate_core_xml(title, Utc::now()),
        })
    }
}

/// Main DOCX writer
pub struct DocxWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    content_types: ContentTypes,
    root_rels: Relationships,
    doc_rels: Relationships,
}

impl<W: Write + Seek> DocxWriter<W> {
    /// Create a new DOCX writer
    pub fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            content_types: create_default_content_types(),
            root_rels: create_root_rels(),
            doc_rels: create_document_rels(),
        }
    }

    /// Write all parts and finish the archive
    pub fn write(mut self, parts: &DocxParts) -> DocxResult<W> {
        // [Content_Types].xml first, as consumers expect
        let content_types_xml = self.content_types.to_xml();
        self.write_file("[Content_Types].xml", &content_types_xml)?;

        let root_rels_xml = self.root_rels.to_xml();
        self.write_file("_rels/.rels", &root_rels_xml)?;

        self.write_file("word/document.xml", &parts.document)?;
        self.write_file("word/styles.xml", &parts.styles)?;
        self.write_file("word/settings.xml", &parts.settings)?;

        let doc_rels_xml = self.doc_rels.to_xml();
        self.write_file("word/_rels/document.xml.rels", &doc_rels_xml)?;

        self.write_file("docProps/core.xml", &parts.core)?;

        Ok(self.zip.finish()?)
    }

    /// Write a file to the ZIP archive
    pub fn write_file(&mut self, path: &str, content: &str) -> DocxResult<()> {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        self.zip.start_file(path, options)?;
        self.zip.write_all(content.as_bytes())?;

        Ok(())
    }
}

/// Zip generated parts into DOCX bytes
pub fn package(parts: &DocxParts) -> DocxResult<Vec<u8>> {
    let cursor = DocxWriter::new(Cursor::new(Vec::new())).write(parts)?;
    Ok(cursor.into_inner())
}

/// Generate a minimal settings.xml
pub fn generate_settings_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:settings xmlns:w="{}"><w:defaultTabStop w:val="720"/><w:compat><w:compatSetting w:name="compatibilityMode" w:uri="http://schemas.microsoft.com/office/word" w:val="15"/></w:compat></w:settings>"#,
        namespaces::W
    )
}

/// Generate docProps/core.xml
pub fn generate_core_xml(title: Option<&str>, created: DateTime<Utc>) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(&format!(
        r#"<cp:coreProperties xmlns:cp="{}" xmlns:dc="{}" xmlns:dcterms="{}" xmlns:xsi="{}">"#,
        namespaces::CP,
        namespaces::DC,
        namespaces::DCTERMS,
        namespaces::XSI,
    ));

    if let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) {
        xml.push_str(&format!("<dc:title>{}</dc:title>", escape_xml(title)));
    }

    let stamp = created.format("%Y-%m-%dT%H:%M:%SZ");
    xml.push_str(&format!(
        r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
        stamp
    ));
    xml.push_str(&format!(
        r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>"#,
        stamp
    ));

    xml.push_str("</cp:coreProperties>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Read;

    fn parts() -> DocxParts {
        DocxParts::build(
            &[
                DocumentElement::title("Report"),
                DocumentElement::paragraph("Body"),
            ],
            RenderConfig::standard(),
        )
        .unwrap()
    }

    #[test]
    fn test_package_has_signature_and_parts() {
        let bytes = package(&parts()).unwrap();
        assert!(bytes.starts_with(b"PK\x03\x04"));

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        for name in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/document.xml",
            "word/styles.xml",
            "word/settings.xml",
            "word/_rels/document.xml.rels",
            "docProps/core.xml",
        ] {
            assert!(archive.by_name(name).is_ok(), "missing {name}");
        }

        let mut document = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut document)
            .unwrap();
        assert!(document.contains("<w:t>Body</w:t>"));
    }

    #[test]
    fn test_core_properties() {
        let created = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let xml = generate_core_xml(Some("Q&A"), created);
        assert!(xml.contains("<dc:title>Q&amp;A</dc:title>"));
        assert!(xml.contains(">2024-01-02T03:04:05Z</dcterms:created>"));

        let untitled = generate_core_xml(None, created);
        assert!(!untitled.contains("dc:title"));
    }

    #[test]
    fn test_parts_carry_title() {
        assert!(parts().core.contains("<dc:title>Report</dc:title>"));
    }
}
