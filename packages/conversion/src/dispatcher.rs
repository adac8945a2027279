//! # View Conversion Dispatcher
//!
//! Turns a depth-first walk of a view subtree into a named-event broadcast:
//! externally registered converters subscribe to `element:<name>`, `text`,
//! and `documentFragment` events and build model content, coordinating
//! through a shared consumable tracker and a shared conversion record.
//!
//! ## Contract
//!
//! - One `viewCleanup` pass fires before anything else in a top-level
//!   [`ViewConversionDispatcher::convert`] call; cleanup listeners may prune
//!   or normalize the view tree, and pruned content never enters the
//!   consumable snapshot.
//! - Exactly one conversion event fires per item, selected by the item's
//!   kind. Callbacks for that event run synchronously in registration order
//!   (namespace listeners interleaved, see [`crate::events::EventRegistry`]),
//!   all sharing the same [`ConversionData`] and [`ViewConsumable`].
//! - Callbacks recurse through the [`ConversionApi`]; nested conversions get
//!   a fresh record seeded with a shallow clone of the extras, so siblings
//!   never see each other's `output` but share the context stack.
//! - The dispatcher itself raises no errors: an unhandled node yields `None`,
//!   a consumable miss is an ordinary `false`, and a panicking callback
//!   propagates to the caller of `convert`.

use crate::consumable::ViewConsumable;
use crate::events::EventRegistry;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, trace};
use vellum_model::{ModelNode, PermissiveSchema, Schema};
use vellum_view::ViewNode;

/// Conversion event names, as fired: `viewCleanup` once per pass, then one of
/// `element:<name>`, `text`, or `documentFragment` per converted item.
pub const EVENT_TEXT: &str = "text";
pub const EVENT_DOCUMENT_FRAGMENT: &str = "documentFragment";
pub const EVENT_ELEMENT_PREFIX: &str = "element";

/// Converter callback. May read and refine `data.output`, claim facets on the
/// tracker, and recurse through the api.
pub type ConverterCallback =
    Rc<dyn for<'a> Fn(&mut ConversionData<'a>, &mut ViewConsumable, &ConversionApi<'a>)>;

/// Pre-pass cleanup callback; runs on the raw view item before the consumable
/// snapshot is taken.
pub type CleanupCallback = Rc<dyn Fn(&mut ViewNode)>;

/// Shared mutable record for one item's conversion.
///
/// Exactly one record exists per `convert_item` call; `output` is per-call
/// while `extras` is shallow-cloned into nested calls, aliasing the shared
/// context stack across the whole traversal.
pub struct ConversionData<'a> {
    /// The view item currently being converted.
    pub input: &'a ViewNode,
    /// Model content produced so far; `None` until some callback acts.
    pub output: Option<Vec<ModelNode>>,
    /// Caller-supplied accumulator, visible to every callback in the pass.
    pub extras: ConversionExtras,
}

/// Typed accumulator threaded through a conversion pass.
///
/// Cloning is shallow: the context stack is shared by reference, which is the
/// deliberate aliasing contract converters rely on to communicate ancestor
/// structure downward (push before descending, pop after).
#[derive(Debug, Clone, Default)]
pub struct ConversionExtras {
    pub context: ContextStack,
}

/// Shared stack of ancestor model element names.
#[derive(Debug, Clone, Default)]
pub struct ContextStack(Rc<RefCell<Vec<String>>>);

impl ContextStack {
    pub fn push(&self, name: impl Into<String>) {
        self.0.borrow_mut().push(name.into());
    }

    pub fn pop(&self) -> Option<String> {
        self.0.borrow_mut().pop()
    }

    /// Snapshot of the current ancestor names, outermost first.
    pub fn names(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

/// Entry points exposed to converter callbacks so they can recurse without
/// holding the dispatcher itself, plus the capabilities the dispatcher's
/// owner injected (the schema, forwarded opaquely).
pub struct ConversionApi<'a> {
    dispatcher: &'a ViewConversionDispatcher,
    pub schema: &'a dyn Schema,
}

impl<'a> ConversionApi<'a> {
    /// Convert a single item with the shared tracker and extras.
    pub fn convert_item(
        &self,
        item: &ViewNode,
        consumable: &mut ViewConsumable,
        extras: &ConversionExtras,
    ) -> Option<Vec<ModelNode>> {
        self.dispatcher.convert_item(item, consumable, extras)
    }

    /// Convert every child of `parent` in document order, flattening results
    /// and dropping declined children.
    pub fn convert_children(
        &self,
        parent: &ViewNode,
        consumable: &mut ViewConsumable,
        extras: &ConversionExtras,
    ) -> Vec<ModelNode> {
        self.dispatcher.convert_children(parent, consumable, extras)
    }
}

/// Event-driven view-to-model conversion orchestrator.
///
/// Stateless across `convert` calls: per-pass state lives in the consumable
/// tracker and the conversion records, both created fresh per pass.
pub struct ViewConversionDispatcher {
    converters: EventRegistry<ConverterCallback>,
    cleanup: Vec<CleanupCallback>,
    schema: Rc<dyn Schema>,
}

impl ViewConversionDispatcher {
    pub fn new() -> Self {
        Self::with_schema(Rc::new(PermissiveSchema))
    }

    /// Dispatcher with an injected schema capability, forwarded to callbacks
    /// through the [`ConversionApi`].
    pub fn with_schema(schema: Rc<dyn Schema>) -> Self {
        Self {
            converters: EventRegistry::new(),
            cleanup: Vec::new(),
            schema,
        }
    }

    /// Register a converter for an event name (`element:p`, `element`,
    /// `text`, `documentFragment`).
    pub fn on(
        &mut self,
        event: impl Into<String>,
        callback: impl for<'a> Fn(&mut ConversionData<'a>, &mut ViewConsumable, &ConversionApi<'a>)
            + 'static,
    ) {
        self.converters.on(event, Rc::new(callback));
    }

    /// Register a `viewCleanup` listener.
    pub fn on_cleanup(&mut self, callback: impl Fn(&mut ViewNode) + 'static) {
        self.cleanup.push(Rc::new(callback));
    }

    /// Convert a view subtree to model content.
    ///
    /// Fires the cleanup pass, snapshots the whole (possibly pruned) subtree
    /// into a fresh consumable tracker, then converts the root item. `None`
    /// means no registered converter claimed the root.
    pub fn convert(
        &self,
        view_item: &mut ViewNode,
        extras: ConversionExtras,
    ) -> Option<Vec<ModelNode>> {
        debug!("starting conversion pass");
        for callback in &self.cleanup {
            (**callback)(view_item);
        }

        let mut consumable = ViewConsumable::from_subtree(view_item);
        self.convert_item(view_item, &mut consumable, &extras)
    }

    /// Convert one item: build a fresh conversion record, fire exactly one of
    /// the three conversion events, and return the record's final `output`.
    pub fn convert_item(
        &self,
        item: &ViewNode,
        consumable: &mut ViewConsumable,
        extras: &ConversionExtras,
    ) -> Option<Vec<ModelNode>> {
        let event_name = match item {
            ViewNode::Element(el) => format!("{EVENT_ELEMENT_PREFIX}:{}", el.name),
            ViewNode::Text(_) => EVENT_TEXT.to_string(),
            ViewNode::DocumentFragment(_) => EVENT_DOCUMENT_FRAGMENT.to_string(),
        };

        let callbacks = self.converters.callbacks_for(&event_name);
        trace!(
            event = %event_name,
            listeners = callbacks.len(),
            "dispatching conversion event"
        );

        let mut data = ConversionData {
            input: item,
            output: None,
            extras: extras.clone(),
        };
        let api = ConversionApi {
            dispatcher: self,
            schema: self.schema.as_ref(),
        };

        for callback in callbacks {
            (*callback)(&mut data, consumable, &api);
        }
        data.output
    }

    /// Convert the children of `parent` in document order. Children whose
    /// conversion yields `None` contribute nothing, not a gap.
    pub fn convert_children(
        &self,
        parent: &ViewNode,
        consumable: &mut ViewConsumable,
        extras: &ConversionExtras,
    ) -> Vec<ModelNode> {
        let mut result = Vec::new();
        for child in parent.children() {
            if let Some(nodes) = self.convert_item(child, consumable, extras) {
                result.extend(nodes);
            }
        }
        result
    }
}

impl Default for ViewConversionDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_model::ModelText;
    use vellum_view::{ViewDocumentFragment, ViewElement, ViewText};

    #[test]
    fn test_unhandled_item_yields_none() {
        let dispatcher = ViewConversionDispatcher::new();
        let mut view: ViewNode = ViewElement::new("p").into();
        assert!(dispatcher
            .convert(&mut view, ConversionExtras::default())
            .is_none());
    }

    #[test]
    fn test_event_selection_by_node_kind() {
        let mut dispatcher = ViewConversionDispatcher::new();
        let fired = Rc::new(RefCell::new(Vec::new()));

        for event in ["element:p", "text", "documentFragment"] {
            let fired = fired.clone();
            dispatcher.on(event, move |_, _, _| fired.borrow_mut().push(event));
        }

        let extras = ConversionExtras::default();
        let mut consumable = ViewConsumable::default();
        dispatcher.convert_item(&ViewElement::new("p").into(), &mut consumable, &extras);
        dispatcher.convert_item(&ViewText::new("t").into(), &mut consumable, &extras);
        dispatcher.convert_item(&ViewDocumentFragment::new().into(), &mut consumable, &extras);

        assert_eq!(
            *fired.borrow(),
            vec!["element:p", "text", "documentFragment"]
        );
    }

    #[test]
    fn test_handler_output_is_returned() {
        let mut dispatcher = ViewConversionDispatcher::new();
        dispatcher.on("text", |data, _, _| {
            let text = data.input.as_text().unwrap();
            data.output = Some(vec![ModelText::new(text.data.clone()).into()]);
        });

        let mut view: ViewNode = ViewText::new("hi").into();
        let output = dispatcher
            .convert(&mut view, ConversionExtras::default())
            .unwrap();
        assert_eq!(output[0].as_text().unwrap().data, "hi");
    }

    #[test]
    fn test_cleanup_runs_before_snapshot() {
        let mut dispatcher = ViewConversionDispatcher::new();

        // Prune every "junk" child before the consumable snapshot exists.
        dispatcher.on_cleanup(|node| {
            if let Some(children) = node.children_mut() {
                children.retain(|child| {
                    child.as_element().map(|el| el.name != "junk").unwrap_or(true)
                });
            }
        });

        let junk_fired = Rc::new(RefCell::new(false));
        {
            let junk_fired = junk_fired.clone();
            dispatcher.on("element:junk", move |_, _, _| {
                *junk_fired.borrow_mut() = true;
            });
        }
        dispatcher.on("element:div", |data, consumable, api| {
            data.output = Some(api.convert_children(data.input, consumable, &data.extras));
        });

        let mut view: ViewNode = ViewElement::new("div")
            .with_child(ViewElement::new("junk"))
            .into();
        dispatcher.convert(&mut view, ConversionExtras::default());

        assert!(!*junk_fired.borrow());
        assert_eq!(view.children().len(), 0);
    }
}
