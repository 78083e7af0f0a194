// Copyright 2025 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser binding for the Lookout diagram viewer.
//!
//! This crate wires [`lookout_viewer`] to a live page when targeting `wasm32`:
//! a DOM overlay surface, a page host for the diagram scanner, a mutation
//! watcher, and the bootstrap of the page's render library (`window.mermaid`).
//!
//! # Usage
//!
//! Build the crate with `wasm-bindgen` and load the module on a page whose
//! diagrams are `.mermaid` elements. The module starts itself:
//!
//! - on DOM-ready it waits 2000ms, then starts the render bridge, which polls
//!   for the library every 100ms, configures it once and triggers a render;
//! - on window load it waits 1000ms and starts the bridge unless it already has;
//! - 500ms after the render pass it attaches a fullscreen button and a click
//!   handler to every diagram;
//! - 3000ms after start-up it installs a mutation watcher that does the same
//!   for diagrams inserted later.
//!
//! Every delay and selector can be overridden with a JSON block on the page:
//!
//! ```html
//! <script type="application/json" id="lookout-config">
//!   { "zoom": { "max": 8 }, "timings": { "domReadyDelayMs": 500 } }
//! </script>
//! ```
//!
//! The viewer's actions are also exported as functions and installed on
//! `window`, for pages that drive the overlay from their own markup:
//! `closeMermaidModal`, `toggleMermaidTheme`, `zoomIn`, `zoomOut`, `panUp`,
//! `panDown`, `panLeft`, `panRight` and `resetView`. Each one is a no-op while
//! no overlay is shown.
//!
//! On other targets the crate is empty.

#[cfg(target_arch = "wasm32")]
mod bridge;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod host;
#[cfg(target_arch = "wasm32")]
mod session;
#[cfg(target_arch = "wasm32")]
mod surface;
#[cfg(target_arch = "wasm32")]
mod watcher;

#[cfg(target_arch = "wasm32")]
pub use web::*;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gloo::events::EventListener;
    use gloo::timers::callback::Timeout;
    use js_sys::Reflect;
    use lookout_view::PanDirection;
    use lookout_viewer::action::Action;
    use lookout_viewer::config::LookoutConfig;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::prelude::*;
    use web_sys::Document;

    use crate::dom;
    use crate::session::PageSession;

    /// Id of the optional page configuration block.
    pub const CONFIG_ELEMENT_ID: &str = "lookout-config";

    thread_local! {
        static SESSION: RefCell<Option<Rc<PageSession>>> = const { RefCell::new(None) };
    }

    /// Global functions installed on `window`.
    const GLOBALS: [(&str, Action); 9] = [
        ("closeMermaidModal", Action::Close),
        ("toggleMermaidTheme", Action::ToggleTheme),
        ("zoomIn", Action::ZoomIn),
        ("zoomOut", Action::ZoomOut),
        ("panUp", Action::Pan(PanDirection::Up)),
        ("panDown", Action::Pan(PanDirection::Down)),
        ("panLeft", Action::Pan(PanDirection::Left)),
        ("panRight", Action::Pan(PanDirection::Right)),
        ("resetView", Action::ResetView),
    ];

    /// Module entry point: sets up logging and the page session.
    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            // Another module on the page already installed a logger.
            log::debug!("logger already installed");
        }

        let document = dom::document()?;
        let config = read_config(&document);
        let session = PageSession::new(document.clone(), config);
        SESSION.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&session)));

        schedule_lifecycle(&document, &session);
        install_globals()?;
        log::info!("diagram viewer loaded");
        Ok(())
    }

    fn read_config(document: &Document) -> LookoutConfig {
        let Some(text) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|element| element.text_content())
        else {
            return LookoutConfig::default();
        };
        LookoutConfig::from_json(&text).unwrap_or_else(|err| {
            log::warn!("ignoring page configuration: {err}");
            LookoutConfig::default()
        })
    }

    fn schedule_lifecycle(document: &Document, session: &Rc<PageSession>) {
        let timings = session.config().timings;

        let on_dom_ready = {
            let session = Rc::clone(session);
            move || {
                log::info!("DOM ready, starting render bridge shortly");
                let session = Rc::clone(&session);
                Timeout::new(timings.dom_ready_delay_ms, move || session.start_bridge()).forget();
            }
        };
        // The module may load after the event already fired.
        if document.ready_state() == "loading" {
            EventListener::once(document, "DOMContentLoaded", move |_| on_dom_ready()).forget();
        } else {
            on_dom_ready();
        }

        let on_load = {
            let session = Rc::clone(session);
            move || {
                let session = Rc::clone(&session);
                Timeout::new(timings.load_delay_ms, move || {
                    if !session.is_initialized() {
                        log::info!("window loaded, retrying render bridge");
                        session.start_bridge();
                    }
                })
                .forget();
            }
        };
        match web_sys::window() {
            Some(window) if document.ready_state() != "complete" => {
                EventListener::once(&window, "load", move |_| on_load()).forget();
            }
            _ => on_load(),
        }

        let session = Rc::clone(session);
        Timeout::new(timings.watcher_delay_ms, move || {
            if let Err(err) = session.install_watcher() {
                log::warn!("failed to install mutation watcher: {err:?}");
            }
        })
        .forget();
    }

    fn install_globals() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        for (name, action) in GLOBALS {
            let function = Closure::<dyn Fn()>::new(move || perform(action)).into_js_value();
            Reflect::set(&window, &JsValue::from_str(name), &function)?;
        }
        Ok(())
    }

    fn perform(action: Action) {
        let session = SESSION.with(|slot| slot.borrow().clone());
        match session {
            Some(session) => session.perform(action),
            None => log::debug!("no page session for `{action}`"),
        }
    }

    /// Closes the overlay.
    #[wasm_bindgen(js_name = closeMermaidModal)]
    pub fn close_mermaid_modal() {
        perform(Action::Close);
    }

    /// Flips the overlay between the light and dark filter.
    #[wasm_bindgen(js_name = toggleMermaidTheme)]
    pub fn toggle_mermaid_theme() {
        perform(Action::ToggleTheme);
    }

    /// Zooms in by one step.
    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in() {
        perform(Action::ZoomIn);
    }

    /// Zooms out by one step.
    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out() {
        perform(Action::ZoomOut);
    }

    /// Pans up by one step.
    #[wasm_bindgen(js_name = panUp)]
    pub fn pan_up() {
        perform(Action::Pan(PanDirection::Up));
    }

    /// Pans down by one step.
    #[wasm_bindgen(js_name = panDown)]
    pub fn pan_down() {
        perform(Action::Pan(PanDirection::Down));
    }

    /// Pans left by one step.
    #[wasm_bindgen(js_name = panLeft)]
    pub fn pan_left() {
        perform(Action::Pan(PanDirection::Left));
    }

    /// Pans right by one step.
    #[wasm_bindgen(js_name = panRight)]
    pub fn pan_right() {
        perform(Action::Pan(PanDirection::Right));
    }

    /// Restores identity scale and pan.
    #[wasm_bindgen(js_name = resetView)]
    pub fn reset_view() {
        perform(Action::ResetView);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use gloo::timers::future::TimeoutFuture;
    use lookout_viewer::config::LookoutConfig;
    use lookout_viewer::event::{ClickTarget, Outcome, UiEvent};
    use lookout_viewer::layout::DIAGRAM_ID;
    use lookout_viewer::scanner::ScanPass;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::{Document, Element, HtmlElement};

    use crate::dom;
    use crate::session::PageSession;
    use crate::watcher::MutationWatcher;

    wasm_bindgen_test_configure!(run_in_browser);

    fn diagram(document: &Document, markup: &str) -> Element {
        let element = dom::create(document, "div", "mermaid").unwrap();
        element.set_inner_html(markup);
        document.body().unwrap().append_child(&element).unwrap();
        element
    }

    fn buttons(element: &Element) -> u32 {
        element
            .query_selector_all(".mermaid-fullscreen-btn")
            .unwrap()
            .length()
    }

    fn overlays(document: &Document) -> u32 {
        document
            .query_selector_all(".mermaid-modal-overlay")
            .unwrap()
            .length()
    }

    fn click(root: &Element, selector: &str) {
        root.query_selector(selector)
            .unwrap()
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap()
            .click();
    }

    #[wasm_bindgen_test]
    fn diagram_without_graphic_opens_with_markup() {
        let document = dom::document().unwrap();
        let session = PageSession::new(document.clone(), LookoutConfig::default());
        let source = diagram(&document, "<p>graph TD; A--&gt;B</p>");

        let outcome = session.dispatch(UiEvent::Click(ClickTarget::Diagram {
            diagram: source.clone(),
            on_affordance: false,
        }));
        assert_eq!(outcome, Outcome::Continue);
        assert!(session.is_open());

        let copy = document.get_element_by_id(DIAGRAM_ID).unwrap();
        assert!(copy.inner_html().contains("graph TD"));
        assert!(copy.query_selector("svg").unwrap().is_none());

        session.dispatch(UiEvent::KeyDown("Escape".into()));
        assert!(!session.is_open());
        assert!(document.get_element_by_id(DIAGRAM_ID).is_none());
        source.remove();
    }

    #[wasm_bindgen_test]
    fn reopening_keeps_one_overlay() {
        let document = dom::document().unwrap();
        let session = PageSession::new(document.clone(), LookoutConfig::default());
        let first = diagram(&document, "<svg width=\"40\" height=\"40\"></svg>");
        let second = diagram(&document, "<svg width=\"20\" height=\"20\"></svg>");

        for source in [&first, &second] {
            session.dispatch(UiEvent::Click(ClickTarget::Affordance(source.clone())));
        }
        let overlays = document.query_selector_all(".mermaid-modal-overlay").unwrap();
        assert_eq!(overlays.length(), 1);

        session.dispatch(UiEvent::Click(ClickTarget::Control("close".into())));
        assert_eq!(
            document
                .query_selector_all(".mermaid-modal-overlay")
                .unwrap()
                .length(),
            0
        );
        first.remove();
        second.remove();
    }

    #[wasm_bindgen_test(async)]
    async fn late_diagram_gets_one_button() {
        let document = dom::document().unwrap();
        let session = PageSession::new(document.clone(), LookoutConfig::default());
        session.install_watcher().unwrap();

        let late = diagram(&document, "<svg width=\"40\" height=\"40\"></svg>");
        TimeoutFuture::new(50).await;
        assert_eq!(buttons(&late), 1);
        assert_eq!(
            late.get_attribute("data-controls-added").as_deref(),
            Some("true")
        );

        let unrelated = dom::create(&document, "div", "").unwrap();
        document.body().unwrap().append_child(&unrelated).unwrap();
        TimeoutFuture::new(50).await;
        assert_eq!(buttons(&late), 1);

        // A later bootstrap pass skips the existing button as well.
        session.scan(ScanPass::Bootstrap);
        assert_eq!(buttons(&late), 1);

        late.remove();
        unrelated.remove();
    }

    #[wasm_bindgen_test(async)]
    async fn dropped_watcher_stops_observing() {
        let document = dom::document().unwrap();
        let root = dom::create(&document, "div", "").unwrap();
        let first_calls = Rc::new(Cell::new(0_u32));
        let second_calls = Rc::new(Cell::new(0_u32));

        let first = {
            let calls = Rc::clone(&first_calls);
            MutationWatcher::observe(&root, move || calls.set(calls.get() + 1)).unwrap()
        };
        let second = {
            let calls = Rc::clone(&second_calls);
            MutationWatcher::observe(&root, move || calls.set(calls.get() + 1)).unwrap()
        };
        drop(first);

        let child = dom::create(&document, "div", "").unwrap();
        root.append_child(&child).unwrap();
        TimeoutFuture::new(50).await;
        assert_eq!(first_calls.get(), 0);
        assert_eq!(second_calls.get(), 1);
        drop(second);
    }

    #[wasm_bindgen_test(async)]
    async fn reinstalled_watcher_still_tags_late_diagrams() {
        let document = dom::document().unwrap();
        let session = PageSession::new(document.clone(), LookoutConfig::default());
        session.install_watcher().unwrap();
        session.install_watcher().unwrap();

        let late = diagram(&document, "<svg width=\"40\" height=\"40\"></svg>");
        TimeoutFuture::new(50).await;
        assert_eq!(buttons(&late), 1);
        assert_eq!(
            late.get_attribute("data-controls-added").as_deref(),
            Some("true")
        );
        late.remove();
    }

    #[wasm_bindgen_test(async)]
    async fn native_clicks_drive_the_overlay() {
        let document = dom::document().unwrap();
        let session = PageSession::new(document.clone(), LookoutConfig::default());
        let source = diagram(
            &document,
            "<svg width=\"40\" height=\"40\"></svg><p class=\"caption\">A</p>",
        );
        session.scan(ScanPass::Bootstrap);
        // The mutation pass adds a second open handler but no second button.
        session.scan(ScanPass::Mutation);
        assert_eq!(buttons(&source), 1);

        // The button click opens once and does not bubble into the diagram.
        click(&source, ".mermaid-fullscreen-btn");
        assert!(session.is_open());
        assert_eq!(overlays(&document), 1);

        let overlay = document
            .query_selector(".mermaid-modal-overlay")
            .unwrap()
            .unwrap();
        click(&overlay, "button.zoom-in");
        TimeoutFuture::new(250).await;
        assert!(session.is_open());
        let graphic = document
            .get_element_by_id(DIAGRAM_ID)
            .unwrap()
            .query_selector("svg")
            .unwrap()
            .unwrap();
        let style = graphic.get_attribute("style").unwrap_or_default();
        assert!(style.contains("scale(1.2)"), "{style}");

        click(&overlay, "button.mermaid-modal-close");
        assert!(!session.is_open());
        assert_eq!(overlays(&document), 0);

        // Both open handlers fire; the second open replaces the first overlay.
        click(&source, "p.caption");
        assert!(session.is_open());
        assert_eq!(overlays(&document), 1);

        session.dispatch(UiEvent::KeyDown("Escape".into()));
        assert_eq!(overlays(&document), 0);
        source.remove();
    }
}
