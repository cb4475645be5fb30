//! Tree walk from HTML into the canonical element sequence

use crate::sanitize::{collapse_whitespace, preprocess, PAGE_BREAK_TAG};
use crate::tree::{parse_tree, Element, Node};
use doc_model::{DocumentElement, ListKind, MAX_HEADING_LEVEL};

/// Paragraph text emitted when the content cannot be turned into a tree
pub const PARSE_FAILURE_TEXT: &str = "Content could not be parsed";

/// Elements whose content never reaches the document
const IGNORED_ELEMENTS: &[&str] = &[
    "br", "head", "title", "meta", "link", "script", "style", "noscript", "template",
];

/// Parse HTML (or plain text) into document elements.
///
/// The content is preprocessed first. A non-empty `title` becomes the
/// leading [`Title`](doc_model::ElementKind::Title) element. Parsing never
/// fails: content that cannot be built into a tree yields a single
/// fallback paragraph.
pub fn parse(html: &str, title: &str) -> Vec<DocumentElement> {
    let title = title.trim();
    let mut elements = Vec::new();
    if !title.is_empty() {
        elements.push(DocumentElement::title(title));
    }

    let cleaned = preprocess(html);
    if cleaned.is_empty() {
        return elements;
    }

    match parse_tree(&cleaned) {
        Ok(document) => {
            let mut walker = Walker::new(title);
            walker.visit_nodes(&document.children);
            elements.extend(walker.output.into_iter().filter(DocumentElement::is_retained));
        }
        Err(e) => {
            tracing::warn!("Failed to parse content, using fallback: {}", e);
            elements.push(DocumentElement::paragraph(PARSE_FAILURE_TEXT));
        }
    }

    elements
}

/// Depth-first walker state
struct Walker<'a> {
    title: &'a str,
    first_h1_seen: bool,
    output: Vec<DocumentElement>,
}

impl<'a> Walker<'a> {
    fn new(title: &'a str) -> Self {
        Self {
            title,
            first_h1_seen: false,
            output: Vec::new(),
        }
    }

    fn visit_nodes(&mut self, nodes: &[Node]) {
        for node in nodes {
            match node {
                Node::Text(text) => {
                    let text = collapse_whitespace(text);
                    if !text.is_empty() {
                        self.output.push(DocumentElement::text(text));
                    }
                }
                Node::Element(element) => self.visit_element(element),
            }
        }
    }

    fn visit_element(&mut self, element: &Element) {
        let name = element.name.as_str();

        if let Some(level) = heading_level(name) {
            let text = collapse_whitespace(&element.text());
            if level == 1 && !self.first_h1_seen {
                self.first_h1_seen = true;
                if self.duplicates_title(&text) {
                    tracing::debug!("Skipping h1 that repeats the document title");
                    return;
                }
            }
            self.output.push(DocumentElement::heading(level, text));
            return;
        }

        match name {
            "p" => {
                let text = collapse_whitespace(&element.text());
                if text.is_empty() {
                    // Keeps images and breaks nested in an otherwise empty paragraph
                    self.visit_nodes(&element.children);
                } else {
                    self.output.push(DocumentElement::paragraph(text));
                }
            }
            "ul" | "ol" => {
                let kind = if name == "ol" {
                    ListKind::Ordered
                } else {
                    ListKind::Unordered
                };
                let mut items = Vec::new();
                collect_list_items(element, &mut items);
                if !items.is_empty() {
                    self.output.push(DocumentElement::list(kind, items));
                }
            }
            "img" => {
                if let Some(src) = element.attr("src").filter(|s| !s.trim().is_empty()) {
                    self.output
                        .push(DocumentElement::image(src.trim(), element.attr("alt")));
                }
            }
            _ if name == PAGE_BREAK_TAG => self.output.push(DocumentElement::page_break()),
            _ if IGNORED_ELEMENTS.contains(&name) => {}
            _ => self.visit_nodes(&element.children),
        }
    }

    /// Case-insensitive containment in either direction
    fn duplicates_title(&self, heading: &str) -> bool {
        if self.title.is_empty() {
            return false;
        }
        let heading = heading.to_lowercase();
        let title = self.title.to_lowercase();
        heading.contains(&title) || title.contains(&heading)
    }
}

fn heading_level(name: &str) -> Option<u8> {
    let level = name.strip_prefix('h')?.parse::<u8>().ok()?;
    (1..=MAX_HEADING_LEVEL).contains(&level).then_some(level)
}

/// Gather the text of every `li` below `element` in document order.
///
/// Items of nested lists are flattened into the outer list; an item's own
/// text excludes its nested lists.
fn collect_list_items(element: &Element, items: &mut Vec<String>) {
    for child in element.child_elements() {
        if child.name == "li" {
            let text = collapse_whitespace(&child.text_excluding(&["ul", "ol"]));
            if !text.is_empty() {
                items.push(text);
            }
        }
        collect_list_items(child, items);
    }
}
