// Copyright 2025 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One page's worth of viewer state.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::timers::future::TimeoutFuture;
use lookout_viewer::action::Action;
use lookout_viewer::bridge::{InitLatch, ReadySignal};
use lookout_viewer::config::LookoutConfig;
use lookout_viewer::event::{Outcome, UiEvent};
use lookout_viewer::scanner::{self, ScanPass, ScanReport};
use lookout_viewer::viewer::Viewer;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element};

use crate::bridge::{self, Mermaid};
use crate::dom::EventSink;
use crate::host::PageHost;
use crate::surface::DomSurface;
use crate::watcher::MutationWatcher;

/// Shared state of one page: the viewer, the bridge start-up and the watcher.
///
/// Event listeners reach the session through a weak handle, so dropping the
/// last strong handle turns every listener into a no-op.
#[derive(Debug)]
pub(crate) struct PageSession {
    document: Document,
    config: LookoutConfig,
    viewer: RefCell<Viewer<DomSurface>>,
    latch: InitLatch,
    ready: ReadySignal<Mermaid>,
    watcher: RefCell<Option<MutationWatcher>>,
    sink: EventSinkHandle,
}

/// Wrapper so the session can derive `Debug`.
struct EventSinkHandle(EventSink);

impl core::fmt::Debug for EventSinkHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("EventSink")
    }
}

impl PageSession {
    pub(crate) fn new(document: Document, config: LookoutConfig) -> Rc<Self> {
        Rc::new_cyclic(|session: &Weak<Self>| {
            let session = session.clone();
            let sink: EventSink = Rc::new(move |event: UiEvent<Element>| {
                session
                    .upgrade()
                    .map_or(Outcome::Continue, |session| session.dispatch(event))
            });
            let surface =
                DomSurface::new(document.clone(), config.selectors.clone(), sink.clone());
            Self {
                viewer: RefCell::new(Viewer::from_config(surface, &config)),
                document,
                config,
                latch: InitLatch::new(),
                ready: ReadySignal::new(),
                watcher: RefCell::new(None),
                sink: EventSinkHandle(sink),
            }
        })
    }

    pub(crate) fn config(&self) -> &LookoutConfig {
        &self.config
    }

    /// Routes one event through the viewer.
    pub(crate) fn dispatch(&self, event: UiEvent<Element>) -> Outcome {
        match self.viewer.try_borrow_mut() {
            Ok(mut viewer) => viewer.handle(event),
            Err(_) => {
                log::warn!("viewer busy, dropping event");
                Outcome::Continue
            }
        }
    }

    /// Performs `action` on the open viewer; a no-op while it is closed.
    pub(crate) fn perform(&self, action: Action) {
        match self.viewer.try_borrow_mut() {
            Ok(mut viewer) => {
                viewer.perform(action);
            }
            Err(_) => log::warn!("viewer busy, dropping `{action}`"),
        }
    }

    #[cfg(test)]
    pub(crate) fn is_open(&self) -> bool {
        self.viewer.try_borrow().is_ok_and(|viewer| viewer.is_open())
    }

    /// Runs one scan over the document.
    pub(crate) fn scan(&self, pass: ScanPass) -> ScanReport {
        let mut host = PageHost::new(&self.document, &self.config, &self.sink.0);
        scanner::scan(&mut host, pass)
    }

    /// Starts the render bridge, unless it already started.
    ///
    /// A polling task resolves the readiness signal once the library is found.
    /// The initialization task waits on that signal, configures the library
    /// once, and schedules the bootstrap scan.
    pub(crate) fn start_bridge(self: &Rc<Self>) {
        if !self.latch.begin() {
            log::debug!("render bridge already started ({:?})", self.latch.phase());
            return;
        }
        log::info!("starting render bridge");

        let session = Rc::clone(self);
        spawn_local(async move {
            let library = bridge::wait_for_library(session.config.timings.poll_interval_ms).await;
            session.ready.resolve(library);
        });

        let session = Rc::clone(self);
        let ready = self.ready.wait();
        spawn_local(async move {
            let Some(library) = ready.await else {
                return;
            };
            if !session.latch.finish() {
                return;
            }
            bridge::configure(&library, &session.config.render);
            TimeoutFuture::new(session.config.timings.scan_delay_ms).await;
            session.scan(ScanPass::Bootstrap);
        });
    }

    /// Returns `true` once the bridge configured the library.
    pub(crate) fn is_initialized(&self) -> bool {
        self.latch.is_initialized()
    }

    /// Installs the mutation watcher on the body, replacing any earlier one.
    pub(crate) fn install_watcher(self: &Rc<Self>) -> Result<(), JsValue> {
        // Dropping the old watcher disconnects it.
        self.watcher.borrow_mut().take();
        let body = self
            .document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        let session = Rc::downgrade(self);
        let watcher = MutationWatcher::observe(&body, move || {
            if let Some(session) = session.upgrade() {
                session.scan(ScanPass::Mutation);
            }
        })?;
        *self.watcher.borrow_mut() = Some(watcher);
        Ok(())
    }
}
