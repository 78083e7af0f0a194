// Copyright 2025 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small `web-sys` helpers shared by the surface, the page host and the session.

use std::rc::Rc;

use lookout_viewer::event::{Outcome, UiEvent};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssStyleDeclaration, Document, Element, Event, HtmlElement, SvgElement};

/// Feeds a classified event into the page session and returns its outcome.
pub(crate) type EventSink = Rc<dyn Fn(UiEvent<Element>) -> Outcome>;

pub(crate) fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document available"))
}

/// Creates `<tag class="...">`.
pub(crate) fn create(document: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let element = document.create_element(tag)?;
    if !class.is_empty() {
        element.set_class_name(class);
    }
    Ok(element)
}

/// All elements matching `selector` under `root`, in document order.
pub(crate) fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        log::warn!("invalid selector `{selector}`");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn style_of(element: &Element) -> Option<CssStyleDeclaration> {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        return Some(html.style());
    }
    element.dyn_ref::<SvgElement>().map(SvgElement::style)
}

/// Sets an inline style property. Elements without inline style are skipped.
pub(crate) fn set_style(element: &Element, property: &str, value: &str) -> Result<(), JsValue> {
    match style_of(element) {
        Some(style) => style.set_property(property, value),
        None => Ok(()),
    }
}

/// The element an event was dispatched to.
pub(crate) fn target_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// Applies the viewer's propagation decision to the native event.
pub(crate) fn apply_outcome(event: &Event, outcome: Outcome) {
    if outcome.prevents_default() {
        event.prevent_default();
    }
    if outcome.stops_propagation() {
        event.stop_propagation();
    }
}
