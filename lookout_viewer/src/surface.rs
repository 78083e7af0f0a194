// Copyright 2025 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The presentation capability set a [`Viewer`](crate::viewer::Viewer) drives.
//!
//! A surface owns the overlay element and everything attached to it. The
//! viewer decides *when* to build, tear down, write a transform or switch the
//! filter; the surface decides *how*. A browser binding implements this over
//! `web-sys`; tests implement it with a recorder.

use kurbo::Size;
use lookout_view::CssTransform;

use crate::layout::ModalLayout;
use crate::theme::Theme;

/// What was copied from the source diagram into a freshly built overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// The diagram's graphic was deep-copied and given presentation styles.
    Graphic,
    /// No graphic was found; the diagram's raw markup was copied instead.
    Markup,
    /// The diagram had nothing to copy; the content area is empty.
    Empty,
}

/// Overlay operations of one presentation layer.
pub trait ViewerSurface {
    /// Handle to a rendered diagram on the page.
    type Diagram;

    /// Removes any overlay present on the page.
    ///
    /// Returns `true` if one was removed.
    fn remove_modal(&mut self) -> bool;

    /// Builds an overlay from `layout` and copies `source`'s rendered output
    /// into its content container.
    ///
    /// The copy prefers the diagram's graphic; without one it falls back to
    /// the raw markup. A graphic found in the fallback markup still gets the
    /// presentation styles.
    fn build_modal(&mut self, source: &Self::Diagram, layout: &ModalLayout) -> ContentKind;

    /// Attaches the document-level key handler.
    fn listen_keys(&mut self);

    /// Detaches the document-level key handler. Detaching twice is harmless.
    fn unlisten_keys(&mut self);

    /// Rendered size of the graphic inside the overlay, or `None` if there is
    /// no overlay or no graphic in it.
    fn graphic_size(&self) -> Option<Size>;

    /// Writes the composed transform onto the overlay's graphic.
    fn write_transform(&mut self, css: CssTransform);

    /// Shows `theme`: the toggle's icon always, the filter if there is a graphic.
    fn write_theme(&mut self, theme: Theme);

    /// Arranges for [`UiEvent::LayoutRetry`](crate::event::UiEvent::LayoutRetry)
    /// to be delivered after `delay_ms` milliseconds.
    ///
    /// The request cannot be cancelled; it may arrive after the overlay is gone.
    fn schedule_layout_retry(&mut self, delay_ms: u32);
}
