use crate::node_list::NodeList;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Model tree node.
///
/// The wire format discriminates the two kinds by field presence: a record
/// with a `name` field is an element, a record without one is text. The
/// untagged variants below are tried in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelNode {
    Element(ModelElement),
    Text(ModelText),
}

/// Named model element. Spans exactly one offset regardless of its contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelElement {
    pub name: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub children: NodeList,
}

/// Model text node. Spans one offset per character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelText {
    pub data: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl ModelElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
            children: NodeList::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<ModelNode>) -> Self {
        self.children.push(child.into());
        self
    }
}

impl ModelText {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

impl ModelNode {
    /// Width of this node in parent offsets: character count for text, one
    /// for an element.
    pub fn offset_size(&self) -> usize {
        match self {
            ModelNode::Element(_) => 1,
            ModelNode::Text(text) => text.data.chars().count(),
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, ModelNode::Element(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ModelNode::Text(_))
    }

    pub fn as_element(&self) -> Option<&ModelElement> {
        match self {
            ModelNode::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&ModelText> {
        match self {
            ModelNode::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<ModelElement> for ModelNode {
    fn from(el: ModelElement) -> Self {
        ModelNode::Element(el)
    }
}

impl From<ModelText> for ModelNode {
    fn from(text: ModelText) -> Self {
        ModelNode::Text(text)
    }
}

/// Normalization of arbitrary node input into a canonical ordered list.
///
/// Operations accept a single node, a string (shorthand for a text node), or
/// a list of nodes; everything funnels through this trait.
pub trait IntoModelNodes {
    fn into_model_nodes(self) -> Vec<ModelNode>;
}

impl IntoModelNodes for ModelNode {
    fn into_model_nodes(self) -> Vec<ModelNode> {
        vec![self]
    }
}

impl IntoModelNodes for ModelElement {
    fn into_model_nodes(self) -> Vec<ModelNode> {
        vec![ModelNode::Element(self)]
    }
}

impl IntoModelNodes for ModelText {
    fn into_model_nodes(self) -> Vec<ModelNode> {
        vec![ModelNode::Text(self)]
    }
}

impl IntoModelNodes for &str {
    fn into_model_nodes(self) -> Vec<ModelNode> {
        vec![ModelNode::Text(ModelText::new(self))]
    }
}

impl IntoModelNodes for String {
    fn into_model_nodes(self) -> Vec<ModelNode> {
        vec![ModelNode::Text(ModelText::new(self))]
    }
}

impl IntoModelNodes for Vec<ModelNode> {
    fn into_model_nodes(self) -> Vec<ModelNode> {
        self
    }
}
