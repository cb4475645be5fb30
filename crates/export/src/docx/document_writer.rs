//! Document.xml writer
//!
//! Converts the element sequence to WordprocessingML. Every block becomes
//! one `w:p` carrying its spacing, indentation and run formatting inline,
//! so the output does not depend on style inheritance in the consumer.

use super::error::DocxResult;
use super::{escape_xml, namespaces};
use doc_model::{DocumentElement, ElementKind, ListKind};
use render_model::{image_placeholder, list_prefix, BlockStyle, Length, RenderConfig};

/// Line rule of a paragraph
#[derive(Debug, Clone, Copy)]
enum LineRule {
    /// Proportional spacing from the shared line height
    Auto,
    /// Fixed line height
    Exact(Length),
}

/// Writer for document.xml
pub struct DocumentWriter<'c> {
    config: &'c RenderConfig,
}

impl<'c> DocumentWriter<'c> {
    /// Create a new document writer
    pub fn new(config: &'c RenderConfig) -> Self {
        Self { config }
    }

    /// Generate document.xml content
    pub fn write(&self, elements: &[DocumentElement]) -> DocxResult<String> {
        let mut xml = String::new();

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<w:document xmlns:w="{}" xmlns:r="{}">"#,
            namespaces::W,
            namespaces::R,
        ));
        xml.push_str("<w:body>");

        for element in elements {
            self.write_element(&mut xml, element)?;
        }

        self.write_section_properties(&mut xml);
        xml.push_str("</w:body>");
        xml.push_str("</w:document>");

        Ok(xml)
    }

    /// Write one element as zero or more paragraphs
    fn write_element(&self, xml: &mut String, element: &DocumentElement) -> DocxResult<()> {
        if element.duplicates_title() {
            return Ok(());
        }
        element.check()?;

        let style = self.config.style_for(element)?;
        match element.kind {
            ElementKind::Title => {
                self.write_paragraph(xml, &element.content, style, Some("Title"), style.space_after, LineRule::Auto);
            }
            ElementKind::Heading => {
                let style_id = element.level.map(|level| format!("Heading{}", level));
                self.write_paragraph(
                    xml,
                    &element.content,
                    style,
                    style_id.as_deref(),
                    style.space_after,
                    LineRule::Auto,
                );
            }
            ElementKind::List => self.write_list(xml, element, style),
            ElementKind::PageBreak => {
                xml.push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#);
            }
            ElementKind::Image => {
                let alt = element.attribute("alt").unwrap_or(&element.content);
                self.write_paragraph(
                    xml,
                    &image_placeholder(alt),
                    style,
                    None,
                    style.space_after,
                    LineRule::Exact(self.config.image_block_height),
                );
            }
            ElementKind::Paragraph | ElementKind::Text | ElementKind::ListItem => {
                self.write_paragraph(xml, &element.content, style, None, style.space_after, LineRule::Auto);
            }
        }
        Ok(())
    }

    /// One paragraph per item; the last item carries the list gap
    fn write_list(&self, xml: &mut String, list: &DocumentElement, style: &BlockStyle) {
        let kind = list.list_kind.unwrap_or(ListKind::Unordered);
        let count = list.children.len();

        for (position, item) in list.children.iter().enumerate() {
            let index = item.item_index().unwrap_or(position);
            let text = format!("{}{}", list_prefix(kind, index), item.content.trim());
            let gap = self.config.list_item_gap(position + 1 == count);
            self.write_paragraph(xml, &text, style, None, gap, LineRule::Auto);
        }
    }

    fn write_paragraph(
        &self,
        xml: &mut String,
        text: &str,
        style: &BlockStyle,
        style_id: Option<&str>,
        space_after: Length,
        line: LineRule,
    ) {
        xml.push_str("<w:p>");

        xml.push_str("<w:pPr>");
        if let Some(id) = style_id {
            xml.push_str(&format!(r#"<w:pStyle w:val="{}"/>"#, escape_xml(id)));
        }
        match line {
            LineRule::Auto => xml.push_str(&format!(
                r#"<w:spacing w:before="0" w:after="{}" w:line="{}" w:lineRule="auto"/>"#,
                space_after.twips(),
                self.config.line_height.docx_line()
            )),
            LineRule::Exact(height) => xml.push_str(&format!(
                r#"<w:spacing w:before="0" w:after="{}" w:line="{}" w:lineRule="exact"/>"#,
                space_after.twips(),
                height.twips()
            )),
        }
        if style.indent.twips() > 0 {
            xml.push_str(&format!(r#"<w:ind w:left="{}"/>"#, style.indent.twips()));
        }
        xml.push_str("</w:pPr>");

        self.write_run(xml, text, style);

        xml.push_str("</w:p>");
    }

    fn write_run(&self, xml: &mut String, text: &str, style: &BlockStyle) {
        xml.push_str("<w:r>");

        xml.push_str("<w:rPr>");
        let font = escape_xml(self.config.docx_font_family);
        xml.push_str(&format!(
            r#"<w:rFonts w:ascii="{}" w:hAnsi="{}" w:cs="{}"/>"#,
            font, font, font
        ));
        if style.bold {
            xml.push_str("<w:b/>");
        }
        if style.italic {
            xml.push_str("<w:i/>");
        }
        let size = style.font_size.half_points();
        xml.push_str(&format!(r#"<w:sz w:val="{}"/>"#, size));
        xml.push_str(&format!(r#"<w:szCs w:val="{}"/>"#, size));
        xml.push_str("</w:rPr>");

        if text.starts_with(' ') || text.ends_with(' ') {
            xml.push_str(r#"<w:t xml:space="preserve">"#);
        } else {
            xml.push_str("<w:t>");
        }
        xml.push_str(&escape_xml(text));
        xml.push_str("</w:t>");

        xml.push_str("</w:r>");
    }

    /// Page size and margins from the shared geometry
    fn write_section_properties(&self, xml: &mut String) {
        let page = &self.config.page;
        xml.push_str("<w:sectPr>");
        xml.push_str(&format!(
            r#"<w:pgSz w:w="{}" w:h="{}"/>"#,
            page.width.twips(),
            page.height.twips()
        ));
        xml.push_str(&format!(
            r#"<w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="720" w:footer="720" w:gutter="0"/>"#,
            page.margin_top.twips(),
            page.margin_right.twips(),
            page.margin_bottom.twips(),
            page.margin_left.twips()
        ));
        xml.push_str("</w:sectPr>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::ElementMetadata;

    fn write(elements: &[DocumentElement]) -> String {
        DocumentWriter::new(RenderConfig::standard())
            .write(elements)
            .unwrap()
    }

    #[test]
    fn test_title_and_heading_formatting() {
        let xml = write(&[
            DocumentElement::title("Report"),
            DocumentElement::heading(2, "Next"),
        ]);
        assert!(xml.contains(r#"<w:pStyle w:val="Title"/>"#));
        assert!(xml.contains(r#"<w:pStyle w:val="Heading2"/>"#));
        assert!(xml.contains(r#"<w:sz w:val="48"/>"#));
        assert!(xml.contains(r#"<w:sz w:val="32"/>"#));
        assert!(xml.contains(r#"w:after="360""#));
        assert!(xml.contains("<w:b/>"));
        assert!(xml.contains("<w:t>Report</w:t>"));
    }

    #[test]
    fn test_paragraph_spacing_and_font() {
        let xml = write(&[DocumentElement::paragraph("Body & more")]);
        assert!(xml.contains(
            r#"<w:spacing w:before="0" w:after="160" w:line="276" w:lineRule="auto"/>"#
        ));
        assert!(xml.contains(r#"<w:rFonts w:ascii="Arial" w:hAnsi="Arial" w:cs="Arial"/>"#));
        assert!(xml.contains(r#"<w:sz w:val="22"/>"#));
        assert!(xml.contains("<w:t>Body &amp; more</w:t>"));
        assert!(!xml.contains("<w:b/>"));
    }

    #[test]
    fn test_list_items_one_paragraph_each() {
        let xml = write(&[DocumentElement::list(ListKind::Ordered, ["One", "Two"])]);
        assert_eq!(xml.matches("<w:p>").count(), 2);
        assert!(xml.contains("<w:t>1. One</w:t>"));
        assert!(xml.contains("<w:t>2. Two</w:t>"));
        assert_eq!(xml.matches(r#"<w:ind w:left="360"/>"#).count(), 2);
        assert!(xml.contains(r#"w:after="40""#));
        assert!(xml.contains(r#"w:after="160""#));
    }

    #[test]
    fn test_page_break_and_image() {
        let xml = write(&[
            DocumentElement::page_break(),
            DocumentElement::image("chart.png", Some("Sales")),
        ]);
        assert!(xml.contains(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#));
        assert!(xml.contains("<w:t>[Image: Sales]</w:t>"));
        assert!(xml.contains(r#"w:line="280" w:lineRule="exact""#));
        assert!(xml.contains("<w:i/>"));
    }

    #[test]
    fn test_section_properties() {
        let xml = write(&[]);
        assert!(xml.contains(r#"<w:pgSz w:w="12240" w:h="15840"/>"#));
        assert!(xml.contains(r#"w:top="1440" w:right="1440" w:bottom="1440" w:left="1440""#));
    }

    #[test]
    fn test_duplicate_title_hint_skipped() {
        let mut heading = DocumentElement::heading(1, "Report");
        heading.metadata = Some(ElementMetadata {
            duplicates_title: true,
            ..Default::default()
        });
        let xml = write(&[DocumentElement::title("Report"), heading]);
        assert_eq!(xml.matches("<w:p>").count(), 1);
    }

    #[test]
    fn test_invalid_element_is_error() {
        let result = DocumentWriter::new(RenderConfig::standard())
            .write(&[DocumentElement::heading(9, "Deep")]);
        assert!(result.is_err());
    }
}
