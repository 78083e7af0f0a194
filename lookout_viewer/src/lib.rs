// Copyright 2025 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lookout Viewer: the headless half of an interactive diagram viewer.
//!
//! This crate holds every piece of state and every decision behind the
//! fullscreen diagram viewer, without touching a real page. Each module
//! handles one concern:
//!
//! - [`viewer`]: the Closed ⇄ Open state machine and the transform it drives
//! - [`action`]: control actions and their key bindings
//! - [`theme`]: the light/dark filter toggle
//! - [`event`]: the UI events the controller consumes and the propagation
//!   outcome it answers with
//! - [`surface`]: the presentation capability set the controller drives
//! - [`layout`]: the buttons an overlay is built from
//! - [`scanner`]: attaching affordances to rendered diagrams
//! - [`bridge`]: one-shot initialization and readiness of the render library
//! - [`config`]: page-level configuration
//!
//! ## Design Philosophy
//!
//! The presentation layer (a browser binding, or a recording surface in tests)
//! implements [`surface::ViewerSurface`] and [`scanner::DiagramHost`] and feeds
//! [`event::UiEvent`]s into a [`viewer::Viewer`]. Everything the user can observe
//! (which overlay exists, which transform is written, whether the key handler is
//! attached) flows through those traits, so the state machine is testable
//! without a DOM.
//!
//! ## Usage
//!
//! ```rust
//! use kurbo::Size;
//! use lookout_view::CssTransform;
//! use lookout_viewer::event::{ClickTarget, Outcome, UiEvent};
//! use lookout_viewer::layout::ModalLayout;
//! use lookout_viewer::surface::{ContentKind, ViewerSurface};
//! use lookout_viewer::theme::Theme;
//! use lookout_viewer::viewer::Viewer;
//!
//! #[derive(Default)]
//! struct Console {
//!     modal: bool,
//!     transforms: Vec<String>,
//! }
//!
//! impl ViewerSurface for Console {
//!     type Diagram = &'static str;
//!
//!     fn remove_modal(&mut self) -> bool {
//!         std::mem::take(&mut self.modal)
//!     }
//!     fn build_modal(&mut self, _source: &&'static str, _layout: &ModalLayout) -> ContentKind {
//!         self.modal = true;
//!         ContentKind::Graphic
//!     }
//!     fn listen_keys(&mut self) {}
//!     fn unlisten_keys(&mut self) {}
//!     fn graphic_size(&self) -> Option<Size> {
//!         Some(Size::new(640.0, 480.0))
//!     }
//!     fn write_transform(&mut self, css: CssTransform) {
//!         self.transforms.push(css.to_string());
//!     }
//!     fn write_theme(&mut self, _theme: Theme) {}
//!     fn schedule_layout_retry(&mut self, _delay_ms: u32) {}
//! }
//!
//! let mut viewer = Viewer::new(Console::default());
//! let outcome = viewer.handle(UiEvent::Click(ClickTarget::Affordance("flowchart")));
//! assert_eq!(outcome, Outcome::Stop);
//!
//! viewer.handle(UiEvent::KeyDown("+".into()));
//! assert_eq!(viewer.surface().transforms, ["translate(0px, 0px) scale(1.2)"]);
//!
//! viewer.handle(UiEvent::KeyDown("Escape".into()));
//! assert!(!viewer.is_open());
//! ```

pub mod action;
pub mod bridge;
pub mod config;
pub mod event;
pub mod layout;
pub mod scanner;
pub mod surface;
pub mod theme;
pub mod viewer;

mod error;

pub use error::Error;
