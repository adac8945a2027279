//! # Model Document
//!
//! A document is a set of named root elements plus a version counter. All
//! mutation goes through [`Document::apply`], which checks the operation's
//! base version against the live document, executes it, and advances the
//! version by exactly one. A rejected operation leaves the document and the
//! version untouched.

use crate::error::{ModelError, ModelResult};
use crate::node::{ModelElement, ModelNode};
use crate::node_list::NodeList;
use crate::operations::Operation;
use crate::position::{Position, Range};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    roots: BTreeMap<String, ModelElement>,
    version: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current document version (increments on each applied operation).
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Create an empty root element, or return the existing root of that name.
    pub fn create_root(&mut self, name: impl Into<String>) -> &mut ModelElement {
        let name = name.into();
        self.roots
            .entry(name.clone())
            .or_insert_with(|| ModelElement::new(format!("$root:{name}")))
    }

    pub fn root(&self, name: &str) -> Option<&ModelElement> {
        self.roots.get(name)
    }

    pub fn root_mut(&mut self, name: &str) -> Option<&mut ModelElement> {
        self.roots.get_mut(name)
    }

    /// Apply one operation atomically.
    pub fn apply(&mut self, operation: &mut Operation) -> ModelResult<Range> {
        let base = operation.base_version();
        if base != self.version {
            return Err(ModelError::VersionMismatch {
                expected: self.version,
                found: base,
            });
        }

        let range = operation.execute(self)?;
        self.version += 1;
        debug!(
            class = operation.class_name(),
            version = self.version,
            "applied operation"
        );
        Ok(range)
    }

    /// Insert nodes at a position. Crate-internal: operations are the public
    /// mutation surface.
    pub(crate) fn insert(&mut self, position: &Position, nodes: Vec<ModelNode>) -> ModelResult<()> {
        let (list, offset) = self.resolve_parent_mut(position)?;
        list.insert_at_offset(offset, nodes)
    }

    /// Remove a span of `how_many` offsets starting at a position, returning
    /// the removed nodes.
    pub(crate) fn remove(
        &mut self,
        position: &Position,
        how_many: usize,
    ) -> ModelResult<Vec<ModelNode>> {
        let (list, offset) = self.resolve_parent_mut(position)?;
        list.remove_range(offset, how_many)
    }

    /// Walk a position's ancestor path down to the parent node list it
    /// addresses.
    fn resolve_parent_mut(&mut self, position: &Position) -> ModelResult<(&mut NodeList, usize)> {
        let root = self
            .roots
            .get_mut(&position.root)
            .ok_or_else(|| ModelError::root_not_found(&position.root))?;

        let (last, ancestors) = position
            .path
            .split_last()
            .ok_or_else(|| ModelError::malformed_position("position path is empty"))?;

        let mut list = &mut root.children;
        for &step in ancestors {
            let element = list.element_at_offset_mut(step)?;
            list = &mut element.children;
        }
        Ok((list, *last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ModelText;
    use crate::operations::InsertOperation;

    #[test]
    fn test_create_root_is_idempotent() {
        let mut doc = Document::new();
        doc.create_root("main");
        doc.root_mut("main")
            .unwrap()
            .children
            .push(ModelText::new("keep"));
        doc.create_root("main");

        assert_eq!(doc.root("main").unwrap().children.len(), 1);
    }

    #[test]
    fn test_apply_rejects_stale_base_version() {
        let mut doc = Document::new();
        doc.create_root("main");

        let mut op = Operation::Insert(InsertOperation::new(
            Position::new("main", vec![0]),
            "ab",
            7,
        ));
        let err = doc.apply(&mut op).unwrap_err();
        assert!(matches!(
            err,
            ModelError::VersionMismatch {
                expected: 0,
                found: 7
            }
        ));
        assert_eq!(doc.version(), 0);
    }

    #[test]
    fn test_nested_position_resolution() {
        let mut doc = Document::new();
        doc.create_root("main");
        doc.root_mut("main")
            .unwrap()
            .children
            .push(ModelElement::new("paragraph"));

        // Insert inside the paragraph: path [0, 0].
        let mut op = Operation::Insert(InsertOperation::new(
            Position::new("main", vec![0, 0]),
            "hi",
            0,
        ));
        doc.apply(&mut op).unwrap();

        let paragraph = doc.root("main").unwrap().children.nodes()[0]
            .as_element()
            .unwrap();
        assert_eq!(paragraph.children.nodes()[0].as_text().unwrap().data, "hi");
    }

    #[test]
    fn test_position_through_text_is_malformed() {
        let mut doc = Document::new();
        doc.create_root("main");
        doc.root_mut("main")
            .unwrap()
            .children
            .push(ModelText::new("ab"));

        let mut op = Operation::Insert(InsertOperation::new(
            Position::new("main", vec![0, 0]),
            "x",
            0,
        ));
        let err = doc.apply(&mut op).unwrap_err();
        assert!(matches!(err, ModelError::MalformedPosition { .. }));
    }
}
