use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque identity of a single view node.
///
/// Ids are minted once at node construction and copied by `Clone`, so a clone
/// of a node is a snapshot of the same logical node, not a new one. The
/// consumable tracker keys its per-node facet maps on this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    /// Mint the next process-unique id.
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        NodeId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Sequential id generator scoped to one document or tree builder.
///
/// Use this instead of [`NodeId::next`] when ids must be reproducible across
/// runs (snapshot tests, deterministic fixtures).
#[derive(Debug, Clone)]
pub struct NodeIdGenerator {
    count: u64,
}

impl NodeIdGenerator {
    pub fn new() -> Self {
        Self { count: 0 }
    }

    /// Generate the next sequential id.
    pub fn new_id(&mut self) -> NodeId {
        self.count += 1;
        NodeId(self.count)
    }
}

impl Default for NodeIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
