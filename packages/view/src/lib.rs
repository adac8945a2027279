//! # Vellum View Tree
//!
//! The rendered-structure representation that conversion walks away from.
//!
//! A view tree is a plain owned tree of three node kinds: elements (named,
//! with attributes and children), text, and document fragments (unnamed
//! containers, typically the root of a parsed chunk). Every node carries a
//! [`vellum_common::NodeId`] so per-pass bookkeeping (the consumable tracker)
//! can address nodes without relying on pointer identity.

pub mod node;

pub use node::*;
