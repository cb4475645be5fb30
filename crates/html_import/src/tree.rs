//! HTML tree
//!
//! Parses a fragment with html5ever and converts its DOM into a small
//! closed tree of [`Node`]s: elements with lowercase names and attributes,
//! and text with character references already decoded. Comments,
//! doctypes and processing instructions are dropped.

use crate::error::{ParseError, Result};
use crate::sink::{ArenaSink, SinkData, SinkNode, DOCUMENT};
use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

/// Deepest element nesting accepted before giving up
pub const MAX_NESTING_DEPTH: usize = 512;

/// Elements that never have content
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Returns true if `name` is a void element
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// A node in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with its attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name
    pub name: String,
    /// Attributes in source order
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Get an attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Concatenated descendant text. `br` contributes a space.
    pub fn text(&self) -> String {
        self.text_excluding(&[])
    }

    /// Descendant text, skipping the subtrees of the named elements
    pub fn text_excluding(&self, skip: &[&str]) -> String {
        let mut out = String::new();
        collect_text(&self.children, skip, &mut out);
        out
    }

    /// Child elements, ignoring text nodes
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }
}

fn collect_text(nodes: &[Node], skip: &[&str], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if el.name == "br" => out.push(' '),
            Node::Element(el) if skip.contains(&el.name.as_str()) => {}
            Node::Element(el) => collect_text(&el.children, skip, out),
        }
    }
}

/// Root of a parsed fragment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub children: Vec<Node>,
}

/// Parse an HTML fragment into a tree.
///
/// The fragment is parsed as the body of a document, so html5ever applies
/// its usual recovery (implied end tags, misnested formatting elements).
pub fn parse_tree(html: &str) -> Result<Document> {
    let wrapped = format!(
        "<!DOCTYPE html><html><head></head><body>{}</body></html>",
        html
    );
    let nodes = parse_document(ArenaSink::new(), ParseOpts::default())
        .from_utf8()
        .one(wrapped.as_bytes())
        .into_nodes();

    let body = find_element(&nodes, DOCUMENT, "body").unwrap_or(DOCUMENT);
    Ok(Document {
        children: convert_children(&nodes, body, 1)?,
    })
}

fn find_element(nodes: &[SinkNode], root: usize, name: &str) -> Option<usize> {
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let node = &nodes[id];
        if node.element_name() == Some(name) {
            return Some(id);
        }
        stack.extend(node.children.iter().rev());
    }
    None
}

/// Convert the children of `parent`; `depth` is their nesting level
fn convert_children(nodes: &[SinkNode], parent: usize, depth: usize) -> Result<Vec<Node>> {
    let mut out = Vec::new();
    for &id in &nodes[parent].children {
        let node = &nodes[id];
        match node.data {
            SinkData::Text(ref text) => out.push(Node::Text(text.clone())),
            SinkData::Element { ref attrs } => {
                if depth > MAX_NESTING_DEPTH {
                    return Err(ParseError::NestingTooDeep {
                        limit: MAX_NESTING_DEPTH,
                    });
                }
                out.push(Node::Element(Element {
                    name: node.name.local.to_string(),
                    attrs: attrs.clone(),
                    children: convert_children(nodes, id, depth + 1)?,
                }));
            }
            SinkData::Document | SinkData::Other => {}
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(node: &Node) -> &Element {
        match node {
            Node::Element(el) => el,
            Node::Text(text) => panic!("expected element, found text {:?}", text),
        }
    }

    #[test]
    fn test_nested_structure() {
        let doc = parse_tree("<div><p>a <b>b</b></p></div>").unwrap();
        assert_eq!(doc.children.len(), 1);
        let div = element(&doc.children[0]);
        assert_eq!(div.name, "div");
        let p = element(&div.children[0]);
        assert_eq!(p.text(), "a b");
    }

    #[test]
    fn test_void_elements_have_no_children() {
        let doc = parse_tree("<p>a<br>b<img src=\"x.png\">c</p>").unwrap();
        let p = element(&doc.children[0]);
        assert_eq!(p.children.len(), 5);
        assert_eq!(p.text(), "a bc");
        let img = element(&p.children[3]);
        assert_eq!(img.attr("src"), Some("x.png"));
    }

    #[test]
    fn test_implicit_li_close() {
        let doc = parse_tree("<ul><li>One<li>Two</ul>").unwrap();
        let ul = element(&doc.children[0]);
        let items: Vec<_> = ul.child_elements().map(|li| li.text()).collect();
        assert_eq!(items, vec!["One", "Two"]);
    }

    #[test]
    fn test_nested_list_keeps_outer_item_open() {
        let doc = parse_tree("<ul><li>A<ul><li>A1<li>A2</ul></li><li>B</li></ul>").unwrap();
        let ul = element(&doc.children[0]);
        let items: Vec<_> = ul.child_elements().collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text_excluding(&["ul", "ol"]), "A");
        assert_eq!(items[1].text(), "B");
    }

    #[test]
    fn test_block_closes_paragraph() {
        let doc = parse_tree("<p>one<div>two</div>").unwrap();
        assert_eq!(doc.children.len(), 2);
        assert_eq!(element(&doc.children[0]).text(), "one");
        assert_eq!(element(&doc.children[1]).name, "div");
    }

    #[test]
    fn test_stray_end_tag_ignored() {
        let doc = parse_tree("</div><p>x</p></span>").unwrap();
        assert_eq!(doc.children.len(), 1);
        assert_eq!(element(&doc.children[0]).text(), "x");
    }

    #[test]
    fn test_unclosed_elements_closed_at_eof() {
        let doc = parse_tree("<div><span>open").unwrap();
        let div = element(&doc.children[0]);
        assert_eq!(div.text(), "open");
    }

    #[test]
    fn test_character_references_decoded() {
        let doc = parse_tree("<p>caf&eacute; &ouml;l &frac12; &times; &#8364;&#x2122;</p>").unwrap();
        assert_eq!(element(&doc.children[0]).text(), "café öl ½ × €™");
    }

    #[test]
    fn test_attribute_values_decoded() {
        let doc = parse_tree(r#"<img SRC="a.png?x=1&amp;y=2" alt="Fish &amp; Chips">"#).unwrap();
        let img = element(&doc.children[0]);
        assert_eq!(img.attr("src"), Some("a.png?x=1&y=2"));
        assert_eq!(img.attr("alt"), Some("Fish & Chips"));
    }

    #[test]
    fn test_comments_dropped() {
        let doc = parse_tree("<!-- note --><p>kept</p>").unwrap();
        assert_eq!(doc.children.len(), 1);
        assert_eq!(element(&doc.children[0]).name, "p");
    }

    #[test]
    fn test_nesting_limit() {
        let deep = "<div>".repeat(MAX_NESTING_DEPTH + 1);
        assert_eq!(
            parse_tree(&deep),
            Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH
            })
        );

        let ok = "<div>".repeat(MAX_NESTING_DEPTH);
        assert!(parse_tree(&ok).is_ok());
    }
}
