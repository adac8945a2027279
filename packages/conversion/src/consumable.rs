//! Per-pass consumption bookkeeping for view content.
//!
//! Created fresh from a snapshot of the whole input subtree at the start of
//! each top-level conversion, discarded when the pass finishes. A facet can
//! be claimed at most once per pass; a second claim fails with `false` rather
//! than an error, so converters check-and-branch instead of assuming success.

use std::collections::HashMap;
use vellum_common::NodeId;
use vellum_view::ViewNode;

/// A claimable aspect of one view node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViewFacet {
    /// The element's name, or the node as a whole for text and fragments.
    Name,
    /// A single attribute by name. Elements only.
    Attribute(String),
}

#[derive(Debug, Default)]
pub struct ViewConsumable {
    // true = still available, false = consumed
    facets: HashMap<NodeId, HashMap<ViewFacet, bool>>,
}

impl ViewConsumable {
    /// Snapshot every consumable facet in the subtree rooted at `node`.
    pub fn from_subtree(node: &ViewNode) -> Self {
        let mut consumable = Self::default();
        consumable.add_subtree(node);
        consumable
    }

    fn add_subtree(&mut self, node: &ViewNode) {
        let entry = self.facets.entry(node.id()).or_default();
        entry.insert(ViewFacet::Name, true);
        if let ViewNode::Element(el) = node {
            for name in el.attributes.keys() {
                entry.insert(ViewFacet::Attribute(name.clone()), true);
            }
        }
        for child in node.children() {
            self.add_subtree(child);
        }
    }

    /// Is the facet still available? Nodes outside the snapshot test `false`.
    pub fn test(&self, node: &ViewNode, facet: &ViewFacet) -> bool {
        self.facets
            .get(&node.id())
            .and_then(|entry| entry.get(facet))
            .copied()
            .unwrap_or(false)
    }

    /// Claim the facet. Returns `false` when it was already consumed or never
    /// part of the snapshot.
    pub fn consume(&mut self, node: &ViewNode, facet: &ViewFacet) -> bool {
        match self
            .facets
            .get_mut(&node.id())
            .and_then(|entry| entry.get_mut(facet))
        {
            Some(available) if *available => {
                *available = false;
                true
            }
            _ => false,
        }
    }
}
