// Copyright 2025 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fullscreen viewer controller: a Closed ⇄ Open state machine.
//!
//! ## States
//!
//! - **Closed** (initial): no overlay, no key handler. Control actions are ignored.
//! - **Open**: exactly one overlay holding a copy of one diagram, a key handler
//!   on the document, and a session (theme flag, what was copied).
//!
//! ## Transitions
//!
//! - Closed/Open → Open: a diagram click (not on its fullscreen button) or a
//!   fullscreen-button click. Any overlay already on the page is removed first,
//!   the transform is reset to identity and the theme to light.
//! - Open → Closed: the close control, a backdrop click, or Escape. The overlay is
//!   removed and the key handler detached. The transform keeps its last value
//!   until the next open resets it.
//! - Open → Open: pan, zoom, reset and theme actions. Each one updates the
//!   transform or theme and writes it to the overlay immediately.
//!
//! ## Transform application
//!
//! A transform is only written onto a graphic with a non-zero rendered size.
//! While layout has not settled, the viewer asks its surface for a
//! [`UiEvent::LayoutRetry`] and tries again when it arrives. Retries that arrive
//! after the viewer closed do nothing.

use lookout_view::ViewTransform;

use crate::action::Action;
use crate::config::LookoutConfig;
use crate::event::{ClickTarget, Outcome, UiEvent};
use crate::layout::ModalLayout;
use crate::surface::{ContentKind, ViewerSurface};
use crate::theme::Theme;

/// Delay before retrying a transform on a graphic without layout.
pub const DEFAULT_LAYOUT_RETRY_MS: u32 = 100;

/// State of an open viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Session {
    /// Filter currently shown on the diagram copy.
    pub theme: Theme,
    /// What was copied into the overlay.
    pub content: ContentKind,
}

/// Result of trying to write the transform onto the overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Application {
    /// The transform was written.
    Written,
    /// The graphic has no layout yet; a retry was scheduled.
    Deferred,
    /// The overlay has no graphic to transform.
    NoGraphic,
    /// The viewer is closed.
    Closed,
}

/// Drives one [`ViewerSurface`] through the viewer's life cycle.
///
/// One `Viewer` serves a whole page session. It owns the transform state,
/// which is only meaningful while a session is open.
#[derive(Debug)]
pub struct Viewer<S: ViewerSurface> {
    surface: S,
    transform: ViewTransform,
    session: Option<Session>,
    layout: ModalLayout,
    layout_retry_ms: u32,
}

impl<S: ViewerSurface> Viewer<S> {
    /// Creates a closed viewer with default limits, steps and timings.
    pub fn new(surface: S) -> Self {
        Self::with_transform(surface, ViewTransform::new(), DEFAULT_LAYOUT_RETRY_MS)
    }

    /// Creates a closed viewer configured from page configuration.
    pub fn from_config(surface: S, config: &LookoutConfig) -> Self {
        Self::with_transform(
            surface,
            config.view_transform(),
            config.timings.layout_retry_ms,
        )
    }

    /// Creates a closed viewer around a preconfigured transform.
    ///
    /// Only the transform's limits and steps matter; it is reset on every open.
    pub fn with_transform(surface: S, transform: ViewTransform, layout_retry_ms: u32) -> Self {
        Self {
            surface,
            transform,
            session: None,
            layout: ModalLayout::STANDARD,
            layout_retry_ms,
        }
    }

    /// Returns `true` while an overlay is shown.
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// The open session, if any.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Current transform state.
    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    /// The surface being driven.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface being driven.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Opens an overlay showing `diagram`, replacing any overlay already shown.
    pub fn open(&mut self, diagram: &S::Diagram) {
        if self.surface.remove_modal() {
            log::debug!("removed existing diagram overlay before opening a new one");
        }
        self.surface.unlisten_keys();

        let content = self.surface.build_modal(diagram, &self.layout);
        match content {
            ContentKind::Graphic => log::debug!("diagram graphic copied into overlay"),
            ContentKind::Markup => log::debug!("no graphic found, copied raw diagram markup"),
            ContentKind::Empty => log::debug!("diagram has no content to copy"),
        }

        self.transform.reset();
        self.session = Some(Session {
            theme: Theme::Light,
            content,
        });
        self.surface.listen_keys();
        log::info!("diagram viewer opened");
    }

    /// Closes the overlay. Returns `false` if the viewer was already closed.
    pub fn close(&mut self) -> bool {
        if self.session.take().is_none() {
            return false;
        }
        self.surface.remove_modal();
        self.surface.unlisten_keys();
        log::info!("diagram viewer closed");
        true
    }

    /// Performs `action` on the open overlay.
    ///
    /// Returns `false` without touching any state while the viewer is closed.
    pub fn perform(&mut self, action: Action) -> bool {
        let Some(session) = self.session.as_mut() else {
            log::debug!("ignoring `{action}` while the viewer is closed");
            return false;
        };
        match action {
            Action::ZoomIn => {
                self.transform.zoom_in();
            }
            Action::ZoomOut => {
                self.transform.zoom_out();
            }
            Action::Pan(direction) => self.transform.pan(direction),
            Action::ResetView => self.transform.reset(),
            Action::ToggleTheme => {
                session.theme = session.theme.toggled();
                let theme = session.theme;
                self.surface.write_theme(theme);
                log::debug!("viewer theme set to {theme:?}");
                return true;
            }
            Action::Close => return self.close(),
        }
        log::debug!(
            "{action}: scale {}, pan ({}, {})",
            self.transform.scale(),
            self.transform.pan_offset().x,
            self.transform.pan_offset().y
        );
        self.apply();
        true
    }

    /// Writes the current transform onto the overlay's graphic, or schedules a
    /// retry if the graphic has no layout yet.
    pub fn apply(&mut self) -> Application {
        if self.session.is_none() {
            return Application::Closed;
        }
        let Some(size) = self.surface.graphic_size() else {
            log::debug!("no graphic in the overlay to transform");
            return Application::NoGraphic;
        };
        if size.width == 0.0 || size.height == 0.0 {
            log::debug!(
                "graphic has zero size, retrying in {}ms",
                self.layout_retry_ms
            );
            self.surface.schedule_layout_retry(self.layout_retry_ms);
            return Application::Deferred;
        }
        self.surface.write_transform(self.transform.css());
        Application::Written
    }

    /// Handles a control button's declared action identifier.
    ///
    /// Control clicks never reach the backdrop or trigger a default action,
    /// whether or not the identifier is known.
    pub fn control(&mut self, id: &str) -> Outcome {
        match id.parse::<Action>() {
            Ok(action) => {
                self.perform(action);
            }
            Err(err) => log::warn!("{err}"),
        }
        Outcome::StopAndConsume
    }

    /// Handles a document-level key press.
    pub fn key_down(&mut self, key: &str) -> Outcome {
        if !self.is_open() {
            return Outcome::Continue;
        }
        if let Some(action) = Action::from_key(key) {
            self.perform(action);
        }
        Outcome::Continue
    }

    /// Dispatches one UI event and reports how it should propagate.
    pub fn handle(&mut self, event: UiEvent<S::Diagram>) -> Outcome {
        match event {
            UiEvent::Click(ClickTarget::Diagram {
                diagram,
                on_affordance,
            }) => {
                // The fullscreen button handles its own clicks.
                if !on_affordance {
                    self.open(&diagram);
                }
                Outcome::Continue
            }
            UiEvent::Click(ClickTarget::Affordance(diagram)) => {
                self.open(&diagram);
                Outcome::Stop
            }
            UiEvent::Click(ClickTarget::Overlay { on_backdrop }) => {
                if on_backdrop {
                    self.close();
                }
                Outcome::Continue
            }
            UiEvent::Click(ClickTarget::Control(id)) => self.control(&id),
            UiEvent::KeyDown(key) => self.key_down(&key),
            UiEvent::LayoutRetry => {
                if self.apply() == Application::Closed {
                    log::debug!("dropping layout retry for a closed viewer");
                }
                Outcome::Continue
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;
    use lookout_view::CssTransform;

    use super::*;

    #[derive(Debug, Default)]
    struct Recording {
        modals: usize,
        keys: bool,
        size: Option<Size>,
        written: Vec<CssTransform>,
        retries: Vec<u32>,
    }

    impl ViewerSurface for Recording {
        type Diagram = u32;

        fn remove_modal(&mut self) -> bool {
            let had = self.modals > 0;
            self.modals = 0;
            had
        }

        fn build_modal(&mut self, _source: &u32, _layout: &ModalLayout) -> ContentKind {
            self.modals += 1;
            ContentKind::Graphic
        }

        fn listen_keys(&mut self) {
            self.keys = true;
        }

        fn unlisten_keys(&mut self) {
            self.keys = false;
        }

        fn graphic_size(&self) -> Option<Size> {
            self.size
        }

        fn write_transform(&mut self, css: CssTransform) {
            self.written.push(css);
        }

        fn write_theme(&mut self, _theme: Theme) {}

        fn schedule_layout_retry(&mut self, delay_ms: u32) {
            self.retries.push(delay_ms);
        }
    }

    fn laid_out() -> Recording {
        Recording {
            size: Some(Size::new(300.0, 200.0)),
            ..Recording::default()
        }
    }

    #[test]
    fn actions_are_ignored_while_closed() {
        let mut viewer = Viewer::new(laid_out());
        assert!(!viewer.perform(Action::ZoomIn));
        assert_eq!(viewer.transform().scale(), 1.0);
        assert!(viewer.surface().written.is_empty());
    }

    #[test]
    fn open_resets_transform_and_theme() {
        let mut viewer = Viewer::new(laid_out());
        viewer.open(&1);
        viewer.perform(Action::ZoomIn);
        viewer.perform(Action::ToggleTheme);
        viewer.close();
        assert!(viewer.transform().scale() > 1.0);

        viewer.open(&2);
        assert!(viewer.transform().is_identity());
        assert_eq!(viewer.session().unwrap().theme, Theme::Light);
    }

    #[test]
    fn zero_size_defers_and_retry_writes_once_laid_out() {
        let mut viewer = Viewer::new(Recording {
            size: Some(Size::ZERO),
            ..Recording::default()
        });
        viewer.open(&1);
        viewer.perform(Action::ZoomIn);
        assert_eq!(viewer.surface().retries, [DEFAULT_LAYOUT_RETRY_MS]);
        assert!(viewer.surface().written.is_empty());

        viewer.surface_mut().size = Some(Size::new(10.0, 10.0));
        viewer.handle(UiEvent::LayoutRetry);
        assert_eq!(viewer.surface().written.len(), 1);
        assert_eq!(viewer.surface().written[0].scale, viewer.transform().scale());
    }

    #[test]
    fn retry_after_close_is_a_noop() {
        let mut viewer = Viewer::new(Recording {
            size: Some(Size::new(0.0, 40.0)),
            ..Recording::default()
        });
        viewer.open(&1);
        viewer.perform(Action::Pan(lookout_view::PanDirection::Up));
        viewer.close();

        viewer.surface_mut().size = Some(Size::new(40.0, 40.0));
        assert_eq!(viewer.handle(UiEvent::LayoutRetry), Outcome::Continue);
        assert_eq!(viewer.apply(), Application::Closed);
        assert!(viewer.surface().written.is_empty());
    }

    #[test]
    fn missing_graphic_skips_application() {
        let mut viewer = Viewer::new(Recording::default());
        viewer.open(&1);
        assert!(viewer.perform(Action::ZoomOut));
        assert_eq!(viewer.apply(), Application::NoGraphic);
        assert!(viewer.surface().retries.is_empty());
    }

    #[test]
    fn unknown_control_is_consumed_and_ignored() {
        let mut viewer = Viewer::new(laid_out());
        viewer.open(&1);
        assert_eq!(viewer.control("spin"), Outcome::StopAndConsume);
        assert!(viewer.is_open());
        assert!(viewer.transform().is_identity());
    }
}
