//! # Vellum Conversion
//!
//! View-to-model conversion pipeline: walks a tree of rendered view nodes and
//! produces model content, mediated by pluggable converter callbacks.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ view: rendered tree (element/text/fragment) │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ conversion: event-driven dispatch           │
//! │  - viewCleanup pre-pass                     │
//! │  - per-pass consumable tracking             │
//! │  - named events → registered converters     │
//! │  - re-entrant child conversion              │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ model: nodes, handed to the operation layer │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vellum_conversion::{converters, ConversionExtras, ViewConversionDispatcher};
//!
//! let mut dispatcher = ViewConversionDispatcher::new();
//! converters::add_element_converter(&mut dispatcher, "p", "paragraph");
//! converters::add_text_converter(&mut dispatcher);
//!
//! let output = dispatcher.convert(&mut view, ConversionExtras::default());
//! ```

pub mod consumable;
pub mod converters;
pub mod dispatcher;
pub mod events;

pub use consumable::{ViewConsumable, ViewFacet};
pub use dispatcher::{
    CleanupCallback, ContextStack, ConversionApi, ConversionData, ConversionExtras,
    ConverterCallback, ViewConversionDispatcher,
};
pub use events::EventRegistry;
