// Copyright 2025 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Watches the page for inserted elements.

use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{MutationObserver, MutationObserverInit, MutationRecord, Node};

/// A mutation observer on a subtree; disconnected on drop.
pub(crate) struct MutationWatcher {
    observer: MutationObserver,
    _callback: Closure<dyn FnMut(Array, MutationObserver)>,
}

impl core::fmt::Debug for MutationWatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MutationWatcher").finish_non_exhaustive()
    }
}

impl MutationWatcher {
    /// Calls `on_insert` after every batch of records that contains a
    /// child-list change anywhere under `root`.
    pub(crate) fn observe(
        root: &Node,
        mut on_insert: impl FnMut() + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Array, MutationObserver)>::new(
            move |records: Array, _observer: MutationObserver| {
                let child_list = records.iter().any(|record| {
                    record
                        .dyn_into::<MutationRecord>()
                        .is_ok_and(|record| record.type_() == "childList")
                });
                if child_list {
                    on_insert();
                }
            },
        );
        let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
        let options = MutationObserverInit::new();
        options.set_child_list(true);
        options.set_subtree(true);
        observer.observe_with_options(root, &options)?;
        log::info!("mutation watcher installed");
        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for MutationWatcher {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
