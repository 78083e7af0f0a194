// Copyright 2025 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lookout View: the pan/zoom state behind a fullscreen diagram viewer.
//!
//! This crate provides a small, headless model of the transform applied to a
//! diagram while it is shown in a viewer. It focuses on:
//! - A uniform zoom factor clamped to a configurable range.
//! - Geometric zoom steps, so repeated zooms feel proportional at any scale.
//! - Additive, unbounded pan offsets in CSS pixels.
//! - Rendering the state as a CSS `transform` value.
//!
//! It does **not** touch the DOM. Callers are expected to:
//! - Own the element the transform is written to.
//! - Decide when the element is laid out well enough to receive a transform.
//! - Map their own input events onto [`ViewTransform::zoom_in`],
//!   [`ViewTransform::zoom_out`], [`ViewTransform::pan`] and
//!   [`ViewTransform::reset`].
//!
//! ## Minimal example
//!
//! ```rust
//! use lookout_view::{PanDirection, ViewTransform};
//!
//! let mut view = ViewTransform::new();
//! view.zoom_in();
//! view.pan(PanDirection::Left);
//!
//! assert_eq!(view.css().to_string(), "translate(50px, 0px) scale(1.2)");
//!
//! view.reset();
//! assert!(view.is_identity());
//! ```
//!
//! ## Design notes
//!
//! - The composed transform is "translate by pan, then scale", anchored at the
//!   element's visual center (`transform-origin: center center`).
//! - Zoom-out divides by the step rather than multiplying by its inverse, so a
//!   zoom-in followed by a zoom-out lands back on the starting scale away from
//!   the clamp boundaries.
//! - Pan is never clamped.
//!
//! This crate is `no_std`.

#![no_std]

mod limits;
mod transform;

pub use limits::{PanDirection, ZoomLimits};
pub use transform::{CssTransform, TRANSFORM_ORIGIN, ViewTransform, ViewTransformDebugInfo};
