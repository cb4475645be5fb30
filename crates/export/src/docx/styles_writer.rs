//! Styles.xml writer
//!
//! Generates styles.xml from the shared render configuration. Paragraphs
//! carry their formatting inline as well; the named styles let editors
//! show Title and Heading paragraphs with the matching outline role.

use super::{escape_xml, namespaces};
use render_model::{BlockStyle, RenderConfig};

/// Writer for styles.xml
pub struct StylesWriter<'c> {
    config: &'c RenderConfig,
}

impl<'c> StylesWriter<'c> {
    /// Create a new styles writer
    pub fn new(config: &'c RenderConfig) -> Self {
        Self { config }
    }

    /// Generate styles.xml content
    pub fn write(&self) -> String {
        let mut xml = String::new();

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<w:styles xmlns:w="{}" xmlns:r="{}">"#,
            namespaces::W,
            namespaces::R,
        ));

        self.write_doc_defaults(&mut xml);

        xml.push_str(r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal">"#);
        xml.push_str(r#"<w:name w:val="Normal"/><w:qFormat/>"#);
        xml.push_str("</w:style>");

        self.write_style(&mut xml, "Title", "Title", &self.config.title, None);
        for (i, style) in self.config.headings.iter().enumerate() {
            let level = i + 1;
            self.write_style(
                &mut xml,
                &format!("Heading{}", level),
                &format!("heading {}", level),
                style,
                Some(i),
            );
        }

        xml.push_str("</w:styles>");
        xml
    }

    /// Write document defaults
    fn write_doc_defaults(&self, xml: &mut String) {
        let font = escape_xml(self.config.docx_font_family);
        let body = &self.config.paragraph;

        xml.push_str("<w:docDefaults>");

        xml.push_str("<w:rPrDefault><w:rPr>");
        xml.push_str(&format!(
            r#"<w:rFonts w:ascii="{}" w:hAnsi="{}" w:cs="{}"/>"#,
            font, font, font
        ));
        xml.push_str(&format!(r#"<w:sz w:val="{}"/>"#, body.font_size.half_points()));
        xml.push_str(&format!(r#"<w:szCs w:val="{}"/>"#, body.font_size.half_points()));
        xml.push_str("</w:rPr></w:rPrDefault>");

        xml.push_str("<w:pPrDefault><w:pPr>");
        xml.push_str(&format!(
            r#"<w:spacing w:after="{}" w:line="{}" w:lineRule="auto"/>"#,
            body.space_after.twips(),
            self.config.line_height.docx_line()
        ));
        xml.push_str("</w:pPr></w:pPrDefault>");

        xml.push_str("</w:docDefaults>");
    }

    /// Write a paragraph style definition
    fn write_style(
        &self,
        xml: &mut String,
        id: &str,
        name: &str,
        style: &BlockStyle,
        outline_level: Option<usize>,
    ) {
        xml.push_str(&format!(
            r#"<w:style w:type="paragraph" w:styleId="{}">"#,
            escape_xml(id)
        ));
        xml.push_str(&format!(r#"<w:name w:val="{}"/>"#, escape_xml(name)));
        xml.push_str(r#"<w:basedOn w:val="Normal"/>"#);
        xml.push_str(r#"<w:next w:val="Normal"/>"#);
        xml.push_str("<w:qFormat/>");

        xml.push_str("<w:pPr>");
        xml.push_str("<w:keepNext/>");
        xml.push_str(&format!(
            r#"<w:spacing w:before="0" w:after="{}"/>"#,
            style.space_after.twips()
        ));
        if let Some(level) = outline_level {
            xml.push_str(&format!(r#"<w:outlineLvl w:val="{}"/>"#, level));
        }
        xml.push_str("</w:pPr>");

        xml.push_str("<w:rPr>");
        if style.bold {
            xml.push_str("<w:b/>");
        }
        if style.italic {
            xml.push_str("<w:i/>");
        }
        xml.push_str(&format!(r#"<w:sz w:val="{}"/>"#, style.font_size.half_points()));
        xml.push_str(&format!(r#"<w:szCs w:val="{}"/>"#, style.font_size.half_points()));
        xml.push_str("</w:rPr>");

        xml.push_str("</w:style>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles_from_config() {
        let xml = StylesWriter::new(RenderConfig::standard()).write();
        assert!(xml.contains(r#"<w:rFonts w:ascii="Arial""#));
        assert!(xml.contains(r#"w:styleId="Normal""#));
        assert!(xml.contains(r#"w:styleId="Title""#));
        for level in 1..=6 {
            assert!(xml.contains(&format!(r#"w:styleId="Heading{}""#, level)));
        }
        assert!(xml.contains(r#"<w:outlineLvl w:val="0"/>"#));
        assert!(xml.ends_with("</w:styles>"));
    }
}
