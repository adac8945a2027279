//! # Vellum Model
//!
//! The abstract document representation that conversion produces, and the
//! operation layer that mutates it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ conversion: view tree → model nodes         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ model: Document + operations                │
//! │  - Named roots holding node trees           │
//! │  - Versioned, atomic operation application  │
//! │  - Insert/Remove with inverses              │
//! │  - JSON wire format for operation logs      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Operations are the only mutation path**: `Document::apply` checks the
//!    operation's base version against the live document and bumps the
//!    version on success.
//! 2. **Offsets, not indexes**: positions address content by offset, where a
//!    text node spans one offset per character and an element spans one.
//! 3. **Normalization happens in the tree**: inserting text next to text
//!    merges the nodes in place; operations retain pre-insert clones so the
//!    normalization never leaks back into their own record.

pub mod document;
pub mod error;
pub mod node;
pub mod node_list;
pub mod operations;
pub mod position;
pub mod schema;

pub use document::Document;
pub use error::{ModelError, ModelResult};
pub use node::{IntoModelNodes, ModelElement, ModelNode, ModelText};
pub use node_list::NodeList;
pub use operations::{InsertOperation, Operation, RemoveOperation};
pub use position::{Position, Range};
pub use schema::{PermissiveSchema, Schema};
