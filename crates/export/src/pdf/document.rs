//! PDF Document Structure
//!
//! High-level objects of the file: the document catalog, the page tree,
//! individual page dictionaries and the Info dictionary.

use super::fonts::FontFace;
use super::objects::{PdfDictionary, PdfObject};
use chrono::{DateTime, Utc};
use render_model::PageGeometry;

/// Producer recorded in the Info dictionary
pub const PRODUCER: &str = "Go Word Export";

/// PDF document information
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    /// Document title
    pub title: Option<String>,
    /// PDF producer
    pub producer: Option<String>,
    /// Creation date (PDF date string format)
    pub creation_date: Option<String>,
}

impl DocumentInfo {
    /// Create info stamped with the producer and the current time
    pub fn new(title: Option<&str>) -> Self {
        Self {
            title: title
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            producer: Some(PRODUCER.to_string()),
            creation_date: Some(pdf_date(Utc::now())),
        }
    }

    /// Convert to PDF dictionary
    pub fn to_dictionary(&self) -> PdfDictionary {
        let mut dict = PdfDictionary::new();

        if let Some(ref title) = self.title {
            dict.insert("Title", PdfObject::text(title));
        }
        if let Some(ref producer) = self.producer {
            dict.insert("Producer", PdfObject::text(producer));
        }
        if let Some(ref date) = self.creation_date {
            dict.insert("CreationDate", PdfObject::text(date));
        }

        dict
    }
}

/// Format a timestamp as a PDF date string (`D:YYYYMMDDHHmmSS+00'00'`)
pub fn pdf_date(at: DateTime<Utc>) -> String {
    at.format("D:%Y%m%d%H%M%S+00'00'").to_string()
}

/// Create a document catalog
pub fn create_catalog(pages_ref: u32) -> PdfDictionary {
    let mut dict = PdfDictionary::typed("Catalog");
    dict.insert("Pages", PdfObject::Reference(pages_ref));
    dict
}

/// Create a pages dictionary (page tree root)
pub fn create_pages(page_refs: &[u32]) -> PdfDictionary {
    let mut dict = PdfDictionary::typed("Pages");

    let kids: Vec<PdfObject> = page_refs.iter().map(|&r| PdfObject::Reference(r)).collect();

    dict.insert("Kids", PdfObject::Array(kids));
    dict.insert("Count", page_refs.len() as i64);

    dict
}

/// Create a page dictionary referencing its content stream and fonts
pub fn create_page(
    page: &PageGeometry,
    parent_ref: u32,
    content_ref: u32,
    font_refs: &[(FontFace, u32)],
) -> PdfDictionary {
    let mut dict = PdfDictionary::typed("Page");
    dict.insert("Parent", PdfObject::Reference(parent_ref));
    dict.insert(
        "MediaBox",
        PdfObject::Array(vec![
            0i64.into(),
            0i64.into(),
            page.width.pdf().into(),
            page.height.pdf().into(),
        ]),
    );
    dict.insert("Contents", PdfObject::Reference(content_ref));

    let mut fonts = PdfDictionary::new();
    for (face, font_ref) in font_refs {
        fonts.insert(face.resource_name(), PdfObject::Reference(*font_ref));
    }

    let mut resources = PdfDictionary::new();
    resources.insert("Font", fonts);
    resources.insert(
        "ProcSet",
        PdfObject::Array(vec![PdfObject::name("PDF"), PdfObject::name("Text")]),
    );
    dict.insert("Resources", resources);

    dict
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_pdf_date() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(pdf_date(at), "D:20240309140507+00'00'");
    }

    #[test]
    fn test_info_dictionary() {
        let info = DocumentInfo::new(Some("  Quarterly Report "));
        let dict = info.to_dictionary();
        assert_eq!(dict.get("Title"), Some(&PdfObject::text("Quarterly Report")));
        assert_eq!(dict.get("Producer"), Some(&PdfObject::text(PRODUCER)));
        assert!(dict.get("CreationDate").is_some());

        let untitled = DocumentInfo::new(Some("   ")).to_dictionary();
        assert!(untitled.get("Title").is_none());
    }

    #[test]
    fn test_page_tree() {
        let pages = create_pages(&[4, 6]);
        assert_eq!(pages.get("Count"), Some(&PdfObject::Integer(2)));
        assert_eq!(
            pages.get("Kids"),
            Some(&PdfObject::Array(vec![
                PdfObject::Reference(4),
                PdfObject::Reference(6)
            ]))
        );

        let catalog = create_catalog(2);
        assert_eq!(catalog.get("Type"), Some(&PdfObject::name("Catalog")));
    }

    #[test]
    fn test_page_resources() {
        let page = create_page(&PageGeometry::letter(), 2, 5, &[(FontFace::Bold, 3)]);
        let Some(PdfObject::Dictionary(resources)) = page.get("Resources") else {
            panic!("page has no resources");
        };
        let Some(PdfObject::Dictionary(fonts)) = resources.get("Font") else {
            panic!("resources have no fonts");
        };
        assert_eq!(fonts.get("F2"), Some(&PdfObject::Reference(3)));
    }
}
