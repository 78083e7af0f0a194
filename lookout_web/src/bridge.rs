// Copyright 2025 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding to the page's render library, `window.mermaid`.

use gloo::timers::future::TimeoutFuture;
use js_sys::{JSON, Promise, Reflect};
use lookout_viewer::bridge::RenderConfig;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};

#[wasm_bindgen]
extern "C" {
    /// The render library's global object.
    #[derive(Debug, Clone)]
    pub(crate) type Mermaid;

    #[wasm_bindgen(method, catch)]
    fn initialize(this: &Mermaid, config: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn run(this: &Mermaid) -> Result<JsValue, JsValue>;
}

const GLOBAL: &str = "mermaid";

/// The library object, if the page has loaded it.
pub(crate) fn find_library() -> Option<Mermaid> {
    let window = web_sys::window()?;
    let value = Reflect::get(&window, &JsValue::from_str(GLOBAL)).ok()?;
    if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value.unchecked_into())
    }
}

/// Checks every `interval_ms` until the library shows up.
pub(crate) async fn wait_for_library(interval_ms: u32) -> Mermaid {
    loop {
        if let Some(library) = find_library() {
            log::info!("render library found");
            return library;
        }
        log::debug!("waiting for the render library");
        TimeoutFuture::new(interval_ms).await;
    }
}

/// Configures the library and triggers a render pass over the page.
///
/// Failures are logged; the caller scans for diagrams regardless. The render
/// pass may finish asynchronously; a rejection is logged when it arrives.
pub(crate) fn configure(library: &Mermaid, config: &RenderConfig) {
    match JSON::parse(&config.to_json()) {
        Ok(options) => {
            if let Err(err) = library.initialize(&options) {
                log::warn!("render library failed to initialize: {err:?}");
            }
        }
        Err(err) => log::warn!("render configuration rejected: {err:?}"),
    }
    match library.run() {
        Ok(pending) => {
            if let Ok(promise) = pending.dyn_into::<Promise>() {
                spawn_local(async move {
                    if let Err(err) = JsFuture::from(promise).await {
                        log::warn!("render pass failed: {err:?}");
                    }
                });
            }
        }
        Err(err) => log::warn!("render library failed to run: {err:?}"),
    }
    log::info!("render library initialized and run");
}
