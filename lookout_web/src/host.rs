// Copyright 2025 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`DiagramHost`] over the live document.
//!
//! Listeners attached here live as long as the diagram element; they are
//! leaked with [`EventListener::forget`] instead of being tracked.

use gloo::events::EventListener;
use lookout_viewer::config::LookoutConfig;
use lookout_viewer::event::{ClickTarget, UiEvent};
use lookout_viewer::layout::AffordanceSpec;
use lookout_viewer::scanner::{DiagramHost, ScanPass};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Event};

use crate::dom::{self, EventSink};

pub(crate) struct PageHost<'a> {
    document: &'a Document,
    config: &'a LookoutConfig,
    sink: &'a EventSink,
}

impl<'a> PageHost<'a> {
    pub(crate) fn new(
        document: &'a Document,
        config: &'a LookoutConfig,
        sink: &'a EventSink,
    ) -> Self {
        Self {
            document,
            config,
            sink,
        }
    }

    fn affordance_selector(&self) -> String {
        format!(".{}", self.config.selectors.affordance_class)
    }

    fn add_button(&self, diagram: &Element) -> Result<(), JsValue> {
        let spec = AffordanceSpec::STANDARD;
        let button = dom::create(
            self.document,
            "button",
            &self.config.selectors.affordance_class,
        )?;
        button.set_text_content(Some(spec.label));
        button.set_attribute("title", spec.title)?;
        button.set_attribute("style", spec.style)?;

        dom::set_style(diagram, "position", "relative")?;
        diagram.append_child(&button)?;

        for (kind, opacity) in [
            ("mouseenter", AffordanceSpec::VISIBLE_OPACITY),
            ("mouseleave", AffordanceSpec::HIDDEN_OPACITY),
        ] {
            let button = button.clone();
            EventListener::new(diagram, kind, move |_| {
                if let Err(err) = dom::set_style(&button, "opacity", opacity) {
                    log::warn!("failed to fade fullscreen button: {err:?}");
                }
            })
            .forget();
        }

        let sink = self.sink.clone();
        let source = diagram.clone();
        EventListener::new(&button, "click", move |event: &Event| {
            let outcome = sink(UiEvent::Click(ClickTarget::Affordance(source.clone())));
            dom::apply_outcome(event, outcome);
        })
        .forget();
        Ok(())
    }
}

impl DiagramHost for PageHost<'_> {
    type Diagram = Element;

    fn diagrams(&self, pass: ScanPass) -> Vec<Element> {
        let selector = match pass {
            ScanPass::Bootstrap => self.config.selectors.diagram.clone(),
            ScanPass::Mutation => self.config.untagged_diagram_selector(),
        };
        dom::query_all(self.document, &selector)
    }

    fn has_affordance(&self, diagram: &Element) -> bool {
        matches!(diagram.query_selector(&self.affordance_selector()), Ok(Some(_)))
    }

    fn mark(&mut self, diagram: &Element) {
        if let Err(err) = diagram.set_attribute(&self.config.selectors.marker_attribute, "true") {
            log::warn!("failed to tag diagram: {err:?}");
        }
    }

    fn attach_affordance(&mut self, diagram: &Element) {
        if let Err(err) = self.add_button(diagram) {
            log::warn!("failed to add fullscreen button: {err:?}");
        }
    }

    fn attach_open_handler(&mut self, diagram: &Element) {
        let sink = self.sink.clone();
        let source = diagram.clone();
        let affordance = self.affordance_selector();
        EventListener::new(diagram, "click", move |event: &Event| {
            let on_affordance = dom::target_element(event)
                .and_then(|target| target.closest(&affordance).ok().flatten())
                .is_some();
            let outcome = sink(UiEvent::Click(ClickTarget::Diagram {
                diagram: source.clone(),
                on_affordance,
            }));
            dom::apply_outcome(event, outcome);
        })
        .forget();
    }
}
