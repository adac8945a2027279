//! Stock converter registrations.
//!
//! Ready-made callbacks for the common cases: a named view element becoming a
//! named model element (children converted recursively), view text becoming
//! model text, and a document fragment passing its converted children
//! through. Each one claims its consumable facet and declines quietly when
//! the facet is gone, an earlier converter already produced output, or the
//! schema rejects the candidate under the current ancestor context.

use crate::consumable::ViewFacet;
use crate::dispatcher::ViewConversionDispatcher;
use vellum_model::{ModelElement, ModelNode, ModelText};

/// Convert `<view_name>` view elements into `model_name` model elements,
/// converting children recursively with the element pushed onto the shared
/// context stack.
pub fn add_element_converter(
    dispatcher: &mut ViewConversionDispatcher,
    view_name: &str,
    model_name: &str,
) {
    let model_name = model_name.to_string();
    dispatcher.on(
        format!("element:{view_name}"),
        move |data, consumable, api| {
            if data.output.is_some() {
                return;
            }
            if !consumable.test(data.input, &ViewFacet::Name) {
                return;
            }
            if !api.schema.check_child(&data.extras.context.names(), &model_name) {
                return;
            }
            if !consumable.consume(data.input, &ViewFacet::Name) {
                return;
            }

            data.extras.context.push(model_name.clone());
            let children = api.convert_children(data.input, consumable, &data.extras);
            data.extras.context.pop();

            let mut element = ModelElement::new(model_name.clone());
            for child in children {
                element.children.push(child);
            }
            data.output = Some(vec![ModelNode::Element(element)]);
        },
    );
}

/// Convert view text into model text.
pub fn add_text_converter(dispatcher: &mut ViewConversionDispatcher) {
    dispatcher.on("text", |data, consumable, api| {
        if data.output.is_some() {
            return;
        }
        if !api.schema.check_child(&data.extras.context.names(), "$text") {
            return;
        }
        if !consumable.consume(data.input, &ViewFacet::Name) {
            return;
        }

        let text = match data.input.as_text() {
            Some(text) => text,
            None => return,
        };
        data.output = Some(vec![ModelNode::Text(ModelText::new(text.data.clone()))]);
    });
}

/// Convert a document fragment by passing its converted children through.
pub fn add_fragment_converter(dispatcher: &mut ViewConversionDispatcher) {
    dispatcher.on("documentFragment", |data, consumable, api| {
        if data.output.is_some() {
            return;
        }
        if !consumable.consume(data.input, &ViewFacet::Name) {
            return;
        }
        data.output = Some(api.convert_children(data.input, consumable, &data.extras));
    });
}
