//! # Document Operations
//!
//! Atomic, reversible, serializable edit primitives applied against a
//! versioned document.
//!
//! ## Operation Semantics
//!
//! ### Insert
//! - Inserts an ordered node list at a position
//! - Executes with the original node objects so in-tree normalization
//!   (adjacent text merging) applies to them; the operation itself retains
//!   deep clones taken before the insert, so its record always reflects
//!   "nodes as they were when inserted"
//! - Reversal is a removal of the inserted width at the same position
//!
//! ### Remove
//! - Removes a span of offsets; partially covered text nodes are split at
//!   the boundaries
//! - Exists as insert's inverse; reversing a removal needs graveyard
//!   bookkeeping from the wider transformation system and is a contract
//!   error here
//!
//! ## Wire format
//!
//! Operations serialize as JSON records tagged by `className`, with node
//! records discriminating element-vs-text by presence of a `name` field:
//!
//! ```json
//! {
//!   "className": "InsertOperation",
//!   "baseVersion": 5,
//!   "position": { "root": "main", "path": [0] },
//!   "nodes": [ { "data": "ab" }, { "name": "x" } ]
//! }
//! ```

use crate::document::Document;
use crate::error::{ModelError, ModelResult};
use crate::node::{IntoModelNodes, ModelNode};
use crate::position::{Position, Range};
use serde::{Deserialize, Serialize};

/// One atomic document edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "className")]
pub enum Operation {
    #[serde(rename = "InsertOperation")]
    Insert(InsertOperation),
    #[serde(rename = "RemoveOperation")]
    Remove(RemoveOperation),
}

impl Operation {
    /// Stable type tag used to discriminate serialized operations.
    pub fn class_name(&self) -> &'static str {
        match self {
            Operation::Insert(_) => "InsertOperation",
            Operation::Remove(_) => "RemoveOperation",
        }
    }

    /// Document version this operation assumes when applying.
    pub fn base_version(&self) -> u64 {
        match self {
            Operation::Insert(op) => op.base_version,
            Operation::Remove(op) => op.base_version,
        }
    }

    pub fn position(&self) -> &Position {
        match self {
            Operation::Insert(op) => &op.position,
            Operation::Remove(op) => &op.position,
        }
    }

    /// Formal inverse for undo. Defined for insertions; removal inversion is
    /// out of scope for this slice.
    pub fn get_reversed(&self) -> ModelResult<Operation> {
        match self {
            Operation::Insert(op) => Ok(Operation::Remove(op.get_reversed())),
            Operation::Remove(_) => Err(ModelError::NotReversible {
                class_name: "RemoveOperation",
            }),
        }
    }

    pub(crate) fn execute(&mut self, document: &mut Document) -> ModelResult<Range> {
        match self {
            Operation::Insert(op) => op.execute(document),
            Operation::Remove(op) => op.execute(document),
        }
    }

    pub fn to_json(&self) -> ModelResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Decode an operation against a live document. The document is needed to
    /// resolve the position's root; an unknown root is a contract error.
    pub fn from_json(value: serde_json::Value, document: &Document) -> ModelResult<Operation> {
        let operation: Operation = serde_json::from_value(value)?;
        let root = &operation.position().root;
        if document.root(root).is_none() {
            return Err(ModelError::root_not_found(root));
        }
        Ok(operation)
    }
}

/// "Insert this node list at this position."
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOperation {
    pub position: Position,
    pub nodes: Vec<ModelNode>,
    pub base_version: u64,
}

impl InsertOperation {
    /// `nodes` accepts a single node, a string (text shorthand), or a node
    /// list; see [`IntoModelNodes`].
    pub fn new(position: Position, nodes: impl IntoModelNodes, base_version: u64) -> Self {
        Self {
            position,
            nodes: nodes.into_model_nodes(),
            base_version,
        }
    }

    /// Nodes as they were at construction (or as of the last execution's
    /// pre-insert snapshot).
    pub fn nodes(&self) -> &[ModelNode] {
        &self.nodes
    }

    /// Total width of the node list in parent offsets.
    pub fn width(&self) -> usize {
        self.nodes.iter().map(ModelNode::offset_size).sum()
    }

    /// Removal of the inserted span at the same position, with the base
    /// version advanced past this insertion.
    pub fn get_reversed(&self) -> RemoveOperation {
        RemoveOperation {
            position: self.position.clone(),
            how_many: self.width(),
            base_version: self.base_version + 1,
        }
    }

    fn execute(&mut self, document: &mut Document) -> ModelResult<Range> {
        let width = self.width();

        // The tree receives the original nodes, so in-tree merge
        // normalization mutates them, not this operation's record. The
        // retained list is swapped for clones taken before the insert.
        let retained = self.nodes.clone();
        let originals = std::mem::replace(&mut self.nodes, retained);
        document.insert(&self.position, originals)?;

        Ok(Range::from_position_and_width(self.position.clone(), width))
    }
}

/// "Remove `how_many` offsets starting at this position."
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveOperation {
    pub position: Position,
    pub how_many: usize,
    pub base_version: u64,
}

impl RemoveOperation {
    pub fn new(position: Position, how_many: usize, base_version: u64) -> Self {
        Self {
            position,
            how_many,
            base_version,
        }
    }

    fn execute(&mut self, document: &mut Document) -> ModelResult<Range> {
        document.remove(&self.position, self.how_many)?;
        Ok(Range::collapsed_at(self.position.clone()))
    }
}
