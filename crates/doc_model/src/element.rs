//! Document elements - the canonical intermediate representation
//!
//! Every element carries a closed [`ElementKind`] tag. Kind-specific data
//! (`level`, `list_kind`, `children`, `attributes`) is only populated for the
//! kinds that use it; [`DocumentElement::check`] enforces that.

use crate::error::{DocModelError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Highest heading level accepted by the model
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Alt text used for images that do not declare one
pub const DEFAULT_IMAGE_ALT: &str = "Image";

/// Element kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// Document title supplied by the caller
    Title,
    /// Section heading (`h1`..`h6`)
    Heading,
    /// Body paragraph
    Paragraph,
    /// Ordered or unordered list
    List,
    /// Item of a list
    ListItem,
    /// Forced page break
    PageBreak,
    /// Image placeholder
    Image,
    /// Loose text outside of any block
    Text,
}

/// List flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListKind {
    /// Numbered list (`ol`)
    Ordered,
    /// Bulleted list (`ul`)
    Unordered,
}

/// Renderer hints attached to an element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementMetadata {
    /// 0-based position of a list item within its list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    /// The element repeats the document title and should be skipped
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub duplicates_title: bool,
}

/// A node of the canonical element sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentElement {
    /// Element kind
    pub kind: ElementKind,
    /// Extracted plain text (empty for page breaks)
    pub content: String,
    /// Heading level, only for headings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    /// List flavour, only for lists and list items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_kind: Option<ListKind>,
    /// List items, only for lists
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DocumentElement>,
    /// String attributes (`src` and `alt` for images)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    /// Renderer hints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ElementMetadata>,
}

impl DocumentElement {
    fn bare(kind: ElementKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            level: None,
            list_kind: None,
            children: Vec::new(),
            attributes: BTreeMap::new(),
            metadata: None,
        }
    }

    /// Create a title element
    pub fn title(content: impl Into<String>) -> Self {
        Self::bare(ElementKind::Title, content)
    }

    /// Create a heading element
    pub fn heading(level: u8, content: impl Into<String>) -> Self {
        let mut element = Self::bare(ElementKind::Heading, content);
        element.level = Some(level);
        element
    }

    /// Create a paragraph element
    pub fn paragraph(content: impl Into<String>) -> Self {
        Self::bare(ElementKind::Paragraph, content)
    }

    /// Create a loose text element
    pub fn text(content: impl Into<String>) -> Self {
        Self::bare(ElementKind::Text, content)
    }

    /// Create a page break
    pub fn page_break() -> Self {
        Self::bare(ElementKind::PageBreak, String::new())
    }

    /// Create an image placeholder; `alt` becomes the content
    pub fn image(src: impl Into<String>, alt: Option<&str>) -> Self {
        let alt = alt
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(DEFAULT_IMAGE_ALT)
            .to_string();
        let mut element = Self::bare(ElementKind::Image, alt.clone());
        element.attributes.insert("src".to_string(), src.into());
        element.attributes.insert("alt".to_string(), alt);
        element
    }

    /// Create a list item. `index` is its 0-based position in the list.
    pub fn list_item(kind: ListKind, index: usize, content: impl Into<String>) -> Self {
        let mut element = Self::bare(ElementKind::ListItem, content);
        element.list_kind = Some(kind);
        element.metadata = Some(ElementMetadata {
            index: Some(index),
            ..Default::default()
        });
        element
    }

    /// Create a list from item texts, numbering them in order
    pub fn list<I, S>(kind: ListKind, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut element = Self::bare(ElementKind::List, String::new());
        element.list_kind = Some(kind);
        element.children = items
            .into_iter()
            .enumerate()
            .map(|(i, text)| Self::list_item(kind, i, text))
            .collect();
        element.content = element
            .children
            .iter()
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        element
    }

    /// Check whether this element is a heading of the given level
    pub fn is_heading(&self, level: u8) -> bool {
        self.kind == ElementKind::Heading && self.level == Some(level)
    }

    /// Get an attribute value
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// The list-item position hint, when present
    pub fn item_index(&self) -> Option<usize> {
        self.metadata.as_ref().and_then(|m| m.index)
    }

    /// Whether the element is flagged as a repeat of the title
    pub fn duplicates_title(&self) -> bool {
        self.metadata.as_ref().is_some_and(|m| m.duplicates_title)
    }

    /// Whether the element survives the empty-content post filter
    pub fn is_retained(&self) -> bool {
        self.kind == ElementKind::PageBreak || !self.content.trim().is_empty()
    }

    /// Number of characters of text carried by this element and its children
    pub fn text_len(&self) -> usize {
        match self.kind {
            ElementKind::List => self.children.iter().map(|c| c.text_len()).sum(),
            _ => self.content.chars().count(),
        }
    }

    /// Verify the per-kind invariants of this element
    pub fn check(&self) -> Result<()> {
        match (self.kind, self.level) {
            (ElementKind::Heading, None) => {
                return Err(DocModelError::MissingHeadingLevel { kind: self.kind })
            }
            (ElementKind::Heading, Some(level)) if !(1..=MAX_HEADING_LEVEL).contains(&level) => {
                return Err(DocModelError::InvalidHeadingLevel { level })
            }
            (ElementKind::Heading, Some(_)) => {}
            (kind, Some(_)) => return Err(DocModelError::UnexpectedLevel { kind }),
            (_, None) => {}
        }

        let uses_list_kind = matches!(self.kind, ElementKind::List | ElementKind::ListItem);
        match (uses_list_kind, self.list_kind) {
            (true, None) => return Err(DocModelError::MissingListKind { kind: self.kind }),
            (false, Some(_)) => return Err(DocModelError::UnexpectedListKind { kind: self.kind }),
            _ => {}
        }

        if self.kind != ElementKind::List && !self.children.is_empty() {
            return Err(DocModelError::UnexpectedChildren { kind: self.kind });
        }

        match self.kind {
            ElementKind::PageBreak if !self.content.is_empty() => {
                Err(DocModelError::PageBreakWithContent)
            }
            ElementKind::PageBreak => Ok(()),
            ElementKind::List => {
                for (index, child) in self.children.iter().enumerate() {
                    if child.kind != ElementKind::ListItem {
                        return Err(DocModelError::InvalidListChild {
                            index,
                            found: child.kind,
                        });
                    }
                    if child.list_kind != self.list_kind {
                        return Err(DocModelError::MismatchedListKind { index });
                    }
                    child.check()?;
                }
                Ok(())
            }
            kind if self.content.trim().is_empty() => Err(DocModelError::EmptyContent { kind }),
            _ => Ok(()),
        }
    }
}

/// Verify a whole element sequence: every element, plus title placement
pub fn check_sequence(elements: &[DocumentElement]) -> Result<()> {
    let titles: Vec<usize> = elements
        .iter()
        .enumerate()
        .filter(|(_, e)| e.kind == ElementKind::Title)
        .map(|(i, _)| i)
        .collect();

    if titles.len() > 1 {
        return Err(DocModelError::MultipleTitles {
            count: titles.len(),
        });
    }
    if let Some(&position) = titles.first() {
        if position != 0 {
            return Err(DocModelError::MisplacedTitle { position });
        }
    }

    elements.iter().try_for_each(DocumentElement::check)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_constructor_numbers_items() {
        let list = DocumentElement::list(ListKind::Ordered, ["One", "Two"]);
        assert_eq!(list.children.len(), 2);
        assert_eq!(list.children[1].item_index(), Some(1));
        assert!(list
            .children
            .iter()
            .all(|c| c.list_kind == Some(ListKind::Ordered)));
        assert!(list.check().is_ok());
    }

    #[test]
    fn test_image_defaults_alt() {
        let image = DocumentElement::image("a.png", None);
        assert_eq!(image.content, "Image");
        assert_eq!(image.attribute("src"), Some("a.png"));
        assert_eq!(image.attribute("alt"), Some("Image"));

        let image = DocumentElement::image("a.png", Some("  chart "));
        assert_eq!(image.content, "chart");
    }

    #[test]
    fn test_heading_level_checked() {
        assert!(DocumentElement::heading(3, "x").check().is_ok());
        assert_eq!(
            DocumentElement::heading(0, "x").check(),
            Err(DocModelError::InvalidHeadingLevel { level: 0 })
        );
        assert_eq!(
            DocumentElement::heading(7, "x").check(),
            Err(DocModelError::InvalidHeadingLevel { level: 7 })
        );

        let mut para = DocumentElement::paragraph("x");
        para.level = Some(1);
        assert!(matches!(
            para.check(),
            Err(DocModelError::UnexpectedLevel { .. })
        ));
    }

    #[test]
    fn test_list_children_checked() {
        let mut list = DocumentElement::list(ListKind::Unordered, ["A"]);
        list.children.push(DocumentElement::paragraph("B"));
        assert_eq!(
            list.check(),
            Err(DocModelError::InvalidListChild {
                index: 1,
                found: ElementKind::Paragraph
            })
        );

        let mut list = DocumentElement::list(ListKind::Unordered, ["A"]);
        list.children
            .push(DocumentElement::list_item(ListKind::Ordered, 1, "B"));
        assert_eq!(
            list.check(),
            Err(DocModelError::MismatchedListKind { index: 1 })
        );
    }

    #[test]
    fn test_page_break_rules() {
        let pb = DocumentElement::page_break();
        assert!(pb.is_retained());
        assert!(pb.check().is_ok());

        let mut pb = DocumentElement::page_break();
        pb.content = "x".into();
        assert_eq!(pb.check(), Err(DocModelError::PageBreakWithContent));
    }

    #[test]
    fn test_empty_content_rejected() {
        assert!(!DocumentElement::paragraph("  ").is_retained());
        assert!(DocumentElement::paragraph("").check().is_err());
    }

    #[test]
    fn test_sequence_title_rules() {
        let ok = vec![
            DocumentElement::title("T"),
            DocumentElement::paragraph("Body"),
        ];
        assert!(check_sequence(&ok).is_ok());

        let misplaced = vec![
            DocumentElement::paragraph("Body"),
            DocumentElement::title("T"),
        ];
        assert_eq!(
            check_sequence(&misplaced),
            Err(DocModelError::MisplacedTitle { position: 1 })
        );

        let twice = vec![DocumentElement::title("T"), DocumentElement::title("U")];
        assert_eq!(
            check_sequence(&twice),
            Err(DocModelError::MultipleTitles { count: 2 })
        );
    }

    #[test]
    fn test_text_len_counts_list_items() {
        let list = DocumentElement::list(ListKind::Unordered, ["ab", "cde"]);
        assert_eq!(list.text_len(), 5);
        assert_eq!(DocumentElement::paragraph("héllo").text_len(), 5);
    }

    #[test]
    fn test_serde_shape() {
        let heading = DocumentElement::heading(2, "Next");
        let json = serde_json::to_string(&heading).unwrap();
        assert_eq!(json, r#"{"kind":"Heading","content":"Next","level":2}"#);

        let back: DocumentElement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, heading);
    }
}
