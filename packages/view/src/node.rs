use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use vellum_common::NodeId;

/// View tree node.
///
/// Exactly one of three kinds; conversion selects its event name from this
/// classification, so the three arms are mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ViewNode {
    Element(ViewElement),
    Text(ViewText),
    DocumentFragment(ViewDocumentFragment),
}

/// Named view element (the analog of a rendered tag).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewElement {
    pub id: NodeId,
    pub name: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<ViewNode>,
}

/// View text node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewText {
    pub id: NodeId,
    pub data: String,
}

/// Unnamed container for a sequence of top-level view nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewDocumentFragment {
    pub id: NodeId,
    pub children: Vec<ViewNode>,
}

impl ViewElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NodeId::next(),
            name: name.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Builder-style child appender.
    pub fn with_child(mut self, child: impl Into<ViewNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

impl ViewText {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            id: NodeId::next(),
            data: data.into(),
        }
    }
}

impl ViewDocumentFragment {
    pub fn new() -> Self {
        Self {
            id: NodeId::next(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: impl Into<ViewNode>) -> Self {
        self.children.push(child.into());
        self
    }
}

impl Default for ViewDocumentFragment {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewNode {
    pub fn id(&self) -> NodeId {
        match self {
            ViewNode::Element(el) => el.id,
            ViewNode::Text(text) => text.id,
            ViewNode::DocumentFragment(fragment) => fragment.id,
        }
    }

    /// Ordered children; empty for text nodes.
    pub fn children(&self) -> &[ViewNode] {
        match self {
            ViewNode::Element(el) => &el.children,
            ViewNode::Text(_) => &[],
            ViewNode::DocumentFragment(fragment) => &fragment.children,
        }
    }

    /// Mutable children for pre-conversion cleanup listeners; `None` for text.
    pub fn children_mut(&mut self) -> Option<&mut Vec<ViewNode>> {
        match self {
            ViewNode::Element(el) => Some(&mut el.children),
            ViewNode::Text(_) => None,
            ViewNode::DocumentFragment(fragment) => Some(&mut fragment.children),
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, ViewNode::Element(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ViewNode::Text(_))
    }

    pub fn is_document_fragment(&self) -> bool {
        matches!(self, ViewNode::DocumentFragment(_))
    }

    pub fn as_element(&self) -> Option<&ViewElement> {
        match self {
            ViewNode::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&ViewText> {
        match self {
            ViewNode::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<ViewElement> for ViewNode {
    fn from(el: ViewElement) -> Self {
        ViewNode::Element(el)
    }
}

impl From<ViewText> for ViewNode {
    fn from(text: ViewText) -> Self {
        ViewNode::Text(text)
    }
}

impl From<ViewDocumentFragment> for ViewNode {
    fn from(fragment: ViewDocumentFragment) -> Self {
        ViewNode::DocumentFragment(fragment)
    }
}
