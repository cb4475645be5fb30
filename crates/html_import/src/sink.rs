//! html5ever tree sink that collects nodes into a flat arena
//!
//! The tree builder only ever sees [`SinkHandle`]s. Each handle carries a
//! copy of its element name so `elem_name` can borrow from the handle
//! instead of from the arena behind the `RefCell`.

use html5ever::tendril::StrTendril;
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{local_name, ns, Attribute, QualName};
use std::borrow::Cow;
use std::cell::RefCell;

/// Arena index of the document node
pub(crate) const DOCUMENT: usize = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SinkData {
    Document,
    Element { attrs: Vec<(String, String)> },
    Text(String),
    /// Comments and processing instructions
    Other,
}

#[derive(Debug)]
pub(crate) struct SinkNode {
    pub name: QualName,
    pub data: SinkData,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

impl SinkNode {
    fn new(name: QualName, data: SinkData) -> Self {
        Self {
            name,
            data,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Local name of an element node
    pub fn element_name(&self) -> Option<&str> {
        match self.data {
            SinkData::Element { .. } => Some(&*self.name.local),
            _ => None,
        }
    }
}

/// Handle passed to the tree builder
#[derive(Debug, Clone)]
pub(crate) struct SinkHandle {
    id: usize,
    name: QualName,
}

/// TreeSink that builds a node arena
pub(crate) struct ArenaSink {
    nodes: RefCell<Vec<SinkNode>>,
}

impl ArenaSink {
    pub fn new() -> Self {
        Self {
            nodes: RefCell::new(vec![SinkNode::new(empty_name(), SinkData::Document)]),
        }
    }

    /// Consume the sink and return the arena
    pub fn into_nodes(self) -> Vec<SinkNode> {
        self.nodes.into_inner()
    }

    fn create(&self, name: QualName, data: SinkData) -> SinkHandle {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(SinkNode::new(name.clone(), data));
        SinkHandle {
            id: nodes.len() - 1,
            name,
        }
    }
}

fn empty_name() -> QualName {
    QualName::new(None, ns!(), local_name!(""))
}

fn push_text(nodes: &mut Vec<SinkNode>, text: &str) -> usize {
    nodes.push(SinkNode::new(empty_name(), SinkData::Text(text.to_string())));
    nodes.len() - 1
}

fn detach(nodes: &mut [SinkNode], id: usize) {
    if let Some(parent) = nodes[id].parent.take() {
        nodes[parent].children.retain(|&child| child != id);
    }
}

/// Append text to the text node at `id`, returning false if it is not one
fn merge_text(nodes: &mut [SinkNode], id: usize, text: &str) -> bool {
    match nodes[id].data {
        SinkData::Text(ref mut existing) => {
            existing.push_str(text);
            true
        }
        _ => false,
    }
}

fn append_child(nodes: &mut Vec<SinkNode>, parent: usize, child: NodeOrText<SinkHandle>) {
    let id = match child {
        NodeOrText::AppendNode(node) => {
            detach(nodes, node.id);
            node.id
        }
        NodeOrText::AppendText(text) => {
            if let Some(&last) = nodes[parent].children.last() {
                if merge_text(nodes, last, &text) {
                    return;
                }
            }
            push_text(nodes, &text)
        }
    };
    nodes[id].parent = Some(parent);
    nodes[parent].children.push(id);
}

fn insert_before(nodes: &mut Vec<SinkNode>, sibling: usize, new_node: NodeOrText<SinkHandle>) {
    let Some(parent) = nodes[sibling].parent else {
        return;
    };

    let id = match new_node {
        NodeOrText::AppendNode(node) => {
            detach(nodes, node.id);
            node.id
        }
        NodeOrText::AppendText(text) => {
            let position = nodes[parent].children.iter().position(|&c| c == sibling);
            if let Some(previous) = position.filter(|&p| p > 0) {
                let previous = nodes[parent].children[previous - 1];
                if merge_text(nodes, previous, &text) {
                    return;
                }
            }
            push_text(nodes, &text)
        }
    };

    let position = nodes[parent]
        .children
        .iter()
        .position(|&c| c == sibling)
        .unwrap_or(0);
    nodes[id].parent = Some(parent);
    nodes[parent].children.insert(position, id);
}

impl TreeSink for ArenaSink {
    type Handle = SinkHandle;
    type Output = Self;
    type ElemName<'a>
        = &'a QualName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        self
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        tracing::trace!("HTML parse error: {}", msg);
    }

    fn get_document(&self) -> Self::Handle {
        SinkHandle {
            id: DOCUMENT,
            name: empty_name(),
        }
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        &target.name
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let attrs = attrs
            .into_iter()
            .map(|a| (a.name.local.to_string(), a.value.to_string()))
            .collect();
        self.create(name, SinkData::Element { attrs })
    }

    fn create_comment(&self, _text: StrTendril) -> Self::Handle {
        self.create(empty_name(), SinkData::Other)
    }

    fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> Self::Handle {
        self.create(empty_name(), SinkData::Other)
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        append_child(&mut self.nodes.borrow_mut(), parent.id, child);
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let has_parent = self.nodes.borrow()[element.id].parent.is_some();
        if has_parent {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        _name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        target.clone()
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x.id == y.id
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {}

    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        insert_before(&mut self.nodes.borrow_mut(), sibling.id, new_node);
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<Attribute>) {
        let mut nodes = self.nodes.borrow_mut();
        if let SinkData::Element {
            attrs: ref mut existing,
        } = nodes[target.id].data
        {
            for attr in attrs {
                let name = attr.name.local.to_string();
                if !existing.iter().any(|(n, _)| *n == name) {
                    existing.push((name, attr.value.to_string()));
                }
            }
        }
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        detach(&mut self.nodes.borrow_mut(), target.id);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        let mut nodes = self.nodes.borrow_mut();
        let children = std::mem::take(&mut nodes[node.id].children);
        for &child in &children {
            nodes[child].parent = Some(new_parent.id);
        }
        nodes[new_parent.id].children.extend(children);
    }
}
