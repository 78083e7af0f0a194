// Copyright 2025 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-library bootstrap: one-time initialization and a readiness signal.
//!
//! The render library is loaded by the page independently of this crate and
//! may show up late. Start-up is requested from more than one page life-cycle
//! event, so the bridge keeps two pieces of state:
//!
//! - An [`InitLatch`] that lets exactly one caller start waiting, and exactly
//!   one caller perform the configuration.
//! - A [`ReadySignal`] resolved once when the library is found; everything
//!   that depends on the library awaits it instead of polling on its own.
//!
//! ```
//! use futures::executor::block_on;
//! use lookout_viewer::bridge::{InitLatch, ReadySignal};
//!
//! let latch = InitLatch::new();
//! assert!(latch.begin());
//! assert!(!latch.begin());
//!
//! let ready = ReadySignal::new();
//! let waiter = ready.wait();
//! assert!(ready.resolve("mermaid"));
//! assert_eq!(block_on(waiter), Some("mermaid"));
//! assert!(latch.finish());
//! assert!(!latch.finish());
//! ```

use core::fmt;
use core::future::Future;
use std::cell::{Cell, RefCell};

use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::Shared;
use serde::{Deserialize, Serialize};

/// Where the bridge is in its one-time start-up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BridgePhase {
    /// Nobody asked for start-up yet.
    #[default]
    Idle,
    /// Waiting for the render library to appear.
    Waiting,
    /// The library was configured and a render pass triggered.
    Initialized,
}

/// Guards the bridge's one-time start-up.
#[derive(Debug, Default)]
pub struct InitLatch {
    phase: Cell<BridgePhase>,
}

impl InitLatch {
    /// Creates an idle latch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> BridgePhase {
        self.phase.get()
    }

    /// Returns `true` once initialization has run.
    pub fn is_initialized(&self) -> bool {
        self.phase.get() == BridgePhase::Initialized
    }

    /// Moves from idle to waiting. Returns `false` if someone already started.
    pub fn begin(&self) -> bool {
        if self.phase.get() != BridgePhase::Idle {
            return false;
        }
        self.phase.set(BridgePhase::Waiting);
        true
    }

    /// Marks initialization as done. Returns `false` if it already was.
    pub fn finish(&self) -> bool {
        if self.is_initialized() {
            return false;
        }
        self.phase.set(BridgePhase::Initialized);
        true
    }
}

/// A value that becomes available once, observed by any number of waiters.
pub struct ReadySignal<T: Clone> {
    sender: RefCell<Option<oneshot::Sender<T>>>,
    receiver: Shared<oneshot::Receiver<T>>,
}

impl<T: Clone> ReadySignal<T> {
    /// Creates an unresolved signal.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = oneshot::channel();
        Self {
            sender: RefCell::new(Some(sender)),
            receiver: receiver.shared(),
        }
    }

    /// Resolves the signal with `value`. Returns `false` if it was already resolved.
    pub fn resolve(&self, value: T) -> bool {
        match self.sender.borrow_mut().take() {
            Some(sender) => sender.send(value).is_ok(),
            None => false,
        }
    }

    /// Returns `true` once [`ReadySignal::resolve`] has been called.
    pub fn is_resolved(&self) -> bool {
        self.sender.borrow().is_none()
    }

    /// Completes with the resolved value, or `None` if the signal is dropped
    /// unresolved.
    pub fn wait(&self) -> impl Future<Output = Option<T>> + use<T> {
        self.receiver.clone().map(Result::ok)
    }
}

impl<T: Clone> Default for ReadySignal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> fmt::Debug for ReadySignal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadySignal")
            .field("resolved", &self.is_resolved())
            .finish_non_exhaustive()
    }
}

/// Options passed to the render library's `initialize` entry point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    /// Let the library render on its own page-load hook as well.
    pub start_on_load: bool,
    /// Library theme name.
    pub theme: String,
    /// Flowchart options.
    pub flowchart: FlowchartOptions,
    /// Sequence-diagram options.
    pub sequence: DiagramOptions,
    /// Gantt-chart options.
    pub gantt: DiagramOptions,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            start_on_load: true,
            theme: "default".to_owned(),
            flowchart: FlowchartOptions::default(),
            sequence: DiagramOptions::default(),
            gantt: DiagramOptions::default(),
        }
    }
}

impl RenderConfig {
    /// JSON text of this configuration, ready to hand to the library.
    pub fn to_json(&self) -> String {
        // Plain strings and booleans always serialize.
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}

/// Per-diagram-type sizing options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiagramOptions {
    /// Scale the rendered graphic down to the container width.
    pub use_max_width: bool,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            use_max_width: true,
        }
    }
}

/// Flowchart options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlowchartOptions {
    /// Scale the rendered graphic down to the container width.
    pub use_max_width: bool,
    /// Render labels as HTML rather than SVG text.
    pub html_labels: bool,
}

impl Default for FlowchartOptions {
    fn default() -> Self {
        Self {
            use_max_width: true,
            html_labels: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::*;

    #[test]
    fn latch_runs_initialization_once() {
        let latch = InitLatch::new();
        assert_eq!(latch.phase(), BridgePhase::Idle);
        assert!(latch.begin());
        assert_eq!(latch.phase(), BridgePhase::Waiting);
        assert!(!latch.begin());
        assert!(latch.finish());
        assert!(latch.is_initialized());
        assert!(!latch.finish());
        assert!(!latch.begin());
    }

    #[test]
    fn every_waiter_sees_the_same_value() {
        let ready = ReadySignal::new();
        let early = ready.wait();
        assert!(!ready.is_resolved());
        assert!(ready.resolve(7_u32));
        assert!(!ready.resolve(8));
        let late = ready.wait();
        assert_eq!(block_on(early), Some(7));
        assert_eq!(block_on(late), Some(7));
    }

    #[test]
    fn dropped_signal_completes_waiters_with_none() {
        let ready = ReadySignal::<u32>::new();
        let waiter = ready.wait();
        drop(ready);
        assert_eq!(block_on(waiter), None);
    }

    #[test]
    fn render_config_uses_library_key_names() {
        let value: serde_json::Value =
            serde_json::from_str(&RenderConfig::default().to_json()).unwrap();
        assert_eq!(
            value,
            json!({
                "startOnLoad": true,
                "theme": "default",
                "flowchart": { "useMaxWidth": true, "htmlLabels": true },
                "sequence": { "useMaxWidth": true },
                "gantt": { "useMaxWidth": true },
            })
        );
    }
}
