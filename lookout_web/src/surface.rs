// Copyright 2025 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The viewer overlay, built from and written to the live document.

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use kurbo::Size;
use lookout_view::{CssTransform, TRANSFORM_ORIGIN};
use lookout_viewer::config::Selectors;
use lookout_viewer::event::{ClickTarget, UiEvent};
use lookout_viewer::layout::{
    ACTIVE_CLASS, ButtonSpec, CONTENT_CLASS, CONTROLS_CLASS, DIAGRAM_CONTAINER_CLASS, DIAGRAM_ID,
    GRAPHIC_STYLES, ModalLayout,
};
use lookout_viewer::surface::{ContentKind, ViewerSurface};
use lookout_viewer::theme::Theme;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, KeyboardEvent};

use crate::dom::{self, EventSink};

/// One overlay on the page and the listeners wired into it.
struct Overlay {
    root: Element,
    diagram: Element,
    theme_toggle: Element,
    // Dropping these detaches them.
    _listeners: Vec<EventListener>,
}

/// [`ViewerSurface`] over the live document.
pub(crate) struct DomSurface {
    document: Document,
    selectors: Selectors,
    sink: EventSink,
    overlay: Option<Overlay>,
    keys: Option<EventListener>,
}

impl core::fmt::Debug for DomSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomSurface")
            .field("overlay", &self.overlay.is_some())
            .field("keys", &self.keys.is_some())
            .finish_non_exhaustive()
    }
}

impl DomSurface {
    pub(crate) fn new(document: Document, selectors: Selectors, sink: EventSink) -> Self {
        Self {
            document,
            selectors,
            sink,
            overlay: None,
            keys: None,
        }
    }

    fn button(&self, spec: &ButtonSpec) -> Result<Element, JsValue> {
        let button = dom::create(&self.document, "button", spec.class)?;
        if let Some(action) = spec.action {
            button.set_attribute("data-action", action.as_str())?;
            button.set_attribute("title", spec.title)?;
        }
        button.set_text_content(Some(spec.label));
        Ok(button)
    }

    fn control_listener(&self, button: &Element, id: &'static str) -> EventListener {
        let sink = self.sink.clone();
        EventListener::new(button, "click", move |event| {
            let outcome = sink(UiEvent::Click(ClickTarget::Control(id.to_owned())));
            dom::apply_outcome(event, outcome);
        })
    }

    fn build(&mut self, source: &Element, layout: &ModalLayout) -> Result<ContentKind, JsValue> {
        let root = dom::create(
            &self.document,
            "div",
            &format!("{} {ACTIVE_CLASS}", self.selectors.overlay_class),
        )?;
        let content = dom::create(&self.document, "div", CONTENT_CLASS)?;
        content.append_child(&self.button(&layout.close)?)?;
        let theme_toggle = self.button(&layout.theme_toggle)?;
        content.append_child(&theme_toggle)?;

        let container = dom::create(&self.document, "div", DIAGRAM_CONTAINER_CLASS)?;
        let diagram = dom::create(&self.document, "div", "")?;
        diagram.set_id(DIAGRAM_ID);
        container.append_child(&diagram)?;
        content.append_child(&container)?;

        let controls = dom::create(&self.document, "div", CONTROLS_CLASS)?;
        for spec in &layout.controls {
            controls.append_child(&self.button(spec)?)?;
        }
        content.append_child(&controls)?;
        root.append_child(&content)?;

        let mut listeners = Vec::new();
        for spec in layout.wired_buttons() {
            let Some(action) = spec.action else {
                continue;
            };
            let id = action.as_str();
            match root.query_selector(&format!("button[data-action=\"{id}\"]"))? {
                Some(button) => listeners.push(self.control_listener(&button, id)),
                None => log::warn!("overlay has no `{id}` button"),
            }
        }

        let sink = self.sink.clone();
        let backdrop = root.clone();
        listeners.push(EventListener::new(&root, "click", move |event: &Event| {
            let on_backdrop =
                dom::target_element(event).is_some_and(|target| target == backdrop);
            let outcome = sink(UiEvent::Click(ClickTarget::Overlay { on_backdrop }));
            dom::apply_outcome(event, outcome);
        }));

        let body = self
            .document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        body.append_child(&root)?;

        let kind = self.copy_diagram(source, &diagram)?;
        self.overlay = Some(Overlay {
            root,
            diagram,
            theme_toggle,
            _listeners: listeners,
        });
        Ok(kind)
    }

    /// Copies the source's graphic into `target`, or its markup without one.
    fn copy_diagram(&self, source: &Element, target: &Element) -> Result<ContentKind, JsValue> {
        let graphic = &self.selectors.graphic;
        let kind = if let Some(original) = source.query_selector(graphic)? {
            target.set_inner_html(&original.outer_html());
            ContentKind::Graphic
        } else {
            let markup = source.inner_html();
            if markup.is_empty() {
                ContentKind::Empty
            } else {
                target.set_inner_html(&markup);
                // The copied markup carries the source's fullscreen button.
                let button = format!(".{}", self.selectors.affordance_class);
                if let Some(copy) = target.query_selector(&button)? {
                    copy.remove();
                }
                ContentKind::Markup
            }
        };
        if let Some(copy) = target.query_selector(graphic)? {
            for (property, value) in GRAPHIC_STYLES {
                dom::set_style(&copy, property, value)?;
            }
        }
        Ok(kind)
    }

    fn graphic(&self) -> Option<Element> {
        let overlay = self.overlay.as_ref()?;
        overlay
            .diagram
            .query_selector(&self.selectors.graphic)
            .ok()
            .flatten()
    }
}

impl ViewerSurface for DomSurface {
    type Diagram = Element;

    fn remove_modal(&mut self) -> bool {
        let mut removed = false;
        if let Some(overlay) = self.overlay.take() {
            overlay.root.remove();
            removed = true;
        }
        let selector = format!(".{}", self.selectors.overlay_class);
        for stale in dom::query_all(&self.document, &selector) {
            stale.remove();
            removed = true;
        }
        removed
    }

    fn build_modal(&mut self, source: &Element, layout: &ModalLayout) -> ContentKind {
        match self.build(source, layout) {
            Ok(kind) => kind,
            Err(err) => {
                log::warn!("failed to build diagram overlay: {err:?}");
                ContentKind::Empty
            }
        }
    }

    fn listen_keys(&mut self) {
        let sink = self.sink.clone();
        self.keys = Some(EventListener::new(
            &self.document,
            "keydown",
            move |event: &Event| {
                if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                    let outcome = sink(UiEvent::KeyDown(key.key()));
                    dom::apply_outcome(event, outcome);
                }
            },
        ));
    }

    fn unlisten_keys(&mut self) {
        self.keys = None;
    }

    fn graphic_size(&self) -> Option<Size> {
        let rect = self.graphic()?.get_bounding_client_rect();
        Some(Size::new(rect.width(), rect.height()))
    }

    fn write_transform(&mut self, css: CssTransform) {
        let Some(graphic) = self.graphic() else {
            return;
        };
        let written = dom::set_style(&graphic, "transform", &css.to_string())
            .and_then(|()| dom::set_style(&graphic, "transform-origin", TRANSFORM_ORIGIN));
        match written {
            Ok(()) => log::debug!("applied transform {css}"),
            Err(err) => log::warn!("failed to write transform: {err:?}"),
        }
    }

    fn write_theme(&mut self, theme: Theme) {
        if let Some(overlay) = &self.overlay {
            overlay.theme_toggle.set_text_content(Some(theme.toggle_icon()));
        }
        if let Some(graphic) = self.graphic() {
            if let Err(err) = dom::set_style(&graphic, "filter", theme.filter()) {
                log::warn!("failed to write theme filter: {err:?}");
            }
        }
    }

    fn schedule_layout_retry(&mut self, delay_ms: u32) {
        let sink = self.sink.clone();
        Timeout::new(delay_ms, move || {
            sink(UiEvent::LayoutRetry);
        })
        .forget();
    }
}
