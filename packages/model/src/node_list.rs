use crate::error::{ModelError, ModelResult};
use crate::node::{ModelElement, ModelNode, ModelText};
use serde::{Deserialize, Serialize};

/// Ordered list of model nodes addressed by offset.
///
/// Offsets count characters inside text nodes and one per element, so a list
/// holding `Text("ab"), Element("x")` has total offset 3. Insertion merges
/// adjacent text nodes with equal attributes in place; removal splits text
/// nodes at the span boundaries and re-merges at the seam, so an insert
/// followed by the matching remove restores the original node shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeList {
    nodes: Vec<ModelNode>,
}

impl NodeList {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn nodes(&self) -> &[ModelNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ModelNode> {
        self.nodes.iter()
    }

    /// Total width of the list in offsets.
    pub fn total_offset(&self) -> usize {
        self.nodes.iter().map(ModelNode::offset_size).sum()
    }

    /// Append a node without normalization.
    pub fn push(&mut self, node: impl Into<ModelNode>) {
        self.nodes.push(node.into());
    }

    /// Insert nodes at `offset`, splitting a covering text node if the offset
    /// falls inside one, then merging adjacent text nodes around the span.
    pub fn insert_at_offset(&mut self, offset: usize, nodes: Vec<ModelNode>) -> ModelResult<()> {
        let index = self.boundary_index(offset)?;
        let count = nodes.len();
        self.nodes.splice(index..index, nodes);
        self.merge_text_range(index.saturating_sub(1), index + count);
        Ok(())
    }

    /// Remove the span `[offset, offset + how_many)` and return the removed
    /// nodes. Text nodes partially covered by the span are split at the
    /// boundaries; the seam left behind is re-merged.
    pub fn remove_range(&mut self, offset: usize, how_many: usize) -> ModelResult<Vec<ModelNode>> {
        let start = self.boundary_index(offset)?;
        let end = self.boundary_index(offset + how_many)?;
        let removed: Vec<ModelNode> = self.nodes.drain(start..end).collect();
        if start > 0 {
            self.merge_text_range(start - 1, start - 1);
        }
        Ok(removed)
    }

    /// Node starting at exactly `offset`, which must be an element. Used to
    /// resolve ancestor steps of a position path.
    pub(crate) fn element_at_offset_mut(&mut self, offset: usize) -> ModelResult<&mut ModelElement> {
        let mut start = 0;
        for node in &mut self.nodes {
            let size = node.offset_size();
            if start == offset {
                return match node {
                    ModelNode::Element(el) => Ok(el),
                    ModelNode::Text(_) => Err(ModelError::malformed_position(
                        "position path steps through a text node",
                    )),
                };
            }
            if offset < start + size {
                return Err(ModelError::malformed_position(
                    "position path step does not land on a node boundary",
                ));
            }
            start += size;
        }
        Err(ModelError::PositionOutOfBounds {
            offset,
            length: start,
        })
    }

    /// Index of the node boundary at `offset`, splitting a text node in two
    /// when the offset falls inside it.
    fn boundary_index(&mut self, offset: usize) -> ModelResult<usize> {
        let mut start = 0;
        for index in 0..self.nodes.len() {
            if start == offset {
                return Ok(index);
            }
            let size = self.nodes[index].offset_size();
            if offset < start + size {
                let split = match &mut self.nodes[index] {
                    ModelNode::Text(text) => {
                        let inner = offset - start;
                        let byte = text
                            .data
                            .char_indices()
                            .nth(inner)
                            .map(|(b, _)| b)
                            .unwrap_or(text.data.len());
                        ModelText {
                            data: text.data.split_off(byte),
                            attributes: text.attributes.clone(),
                        }
                    }
                    // Elements span one offset, so "inside" cannot happen.
                    ModelNode::Element(_) => {
                        return Err(ModelError::malformed_position(
                            "offset falls inside an element",
                        ))
                    }
                };
                self.nodes.insert(index + 1, ModelNode::Text(split));
                return Ok(index + 1);
            }
            start += size;
        }
        if offset == start {
            Ok(self.nodes.len())
        } else {
            Err(ModelError::PositionOutOfBounds {
                offset,
                length: start,
            })
        }
    }

    /// Merge text pairs `(i, i + 1)` for `i` in `[from, to]`, right to left so
    /// earlier indexes stay valid as nodes disappear.
    fn merge_text_range(&mut self, from: usize, to: usize) {
        if self.nodes.is_empty() {
            return;
        }
        let mut i = to.min(self.nodes.len() - 1);
        loop {
            if i + 1 < self.nodes.len() {
                let mergeable = match (&self.nodes[i], &self.nodes[i + 1]) {
                    (ModelNode::Text(a), ModelNode::Text(b)) => a.attributes == b.attributes,
                    _ => false,
                };
                if mergeable {
                    if let ModelNode::Text(right) = self.nodes.remove(i + 1) {
                        if let ModelNode::Text(left) = &mut self.nodes[i] {
                            left.data.push_str(&right.data);
                        }
                    }
                }
            }
            if i <= from || i == 0 {
                break;
            }
            i -= 1;
        }
    }
}

impl From<Vec<ModelNode>> for NodeList {
    fn from(nodes: Vec<ModelNode>) -> Self {
        Self { nodes }
    }
}

impl<'a> IntoIterator for &'a NodeList {
    type Item = &'a ModelNode;
    type IntoIter = std::slice::Iter<'a, ModelNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
