// Copyright 2025 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Affine, Vec2};

use crate::limits::{PanDirection, ZoomLimits};

/// CSS `transform-origin` the composed transform is meant to be anchored at.
pub const TRANSFORM_ORIGIN: &str = "center center";

/// Pan + zoom state of a diagram shown in a viewer.
///
/// `ViewTransform` tracks a uniform zoom factor and a pan offset in CSS pixels.
/// It can be used to:
/// - Step the zoom geometrically, clamped to [`ZoomLimits`].
/// - Step the pan by a fixed amount in one of four directions.
/// - Produce the composed "translate, then scale" transform for rendering.
#[derive(Clone, Debug)]
pub struct ViewTransform {
    scale: f64,
    pan: Vec2,
    limits: ZoomLimits,
    zoom_step: f64,
    pan_step: f64,
}

impl ViewTransform {
    /// Factor applied by one zoom step unless configured otherwise.
    pub const DEFAULT_ZOOM_STEP: f64 = 1.2;
    /// Pixels moved by one pan step unless configured otherwise.
    pub const DEFAULT_PAN_STEP: f64 = 50.0;

    /// Creates an identity transform with default limits and steps.
    ///
    /// - Initial scale is `1.0` and pan is zero.
    /// - Scale is clamped to `[0.1, 5.0]`.
    /// - One zoom step is a factor of `1.2`; one pan step is `50` pixels.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            pan: Vec2::ZERO,
            limits: ZoomLimits::default(),
            zoom_step: Self::DEFAULT_ZOOM_STEP,
            pan_step: Self::DEFAULT_PAN_STEP,
        }
    }

    /// Returns this transform with different zoom limits.
    ///
    /// The current scale is clamped into the new range.
    #[must_use]
    pub fn with_limits(mut self, limits: ZoomLimits) -> Self {
        self.limits = limits;
        self.scale = limits.clamp(self.scale);
        self
    }

    /// Returns this transform with different zoom and pan steps.
    ///
    /// A zoom step that is not a finite number greater than `1.0` would make
    /// "zoom in" shrink the diagram, so such values keep the current step.
    #[must_use]
    pub fn with_steps(mut self, zoom_step: f64, pan_step: f64) -> Self {
        if zoom_step.is_finite() && zoom_step > 1.0 {
            self.zoom_step = zoom_step;
        }
        if pan_step.is_finite() {
            self.pan_step = pan_step.abs();
        }
        self
    }

    /// Returns the current uniform zoom factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the current pan offset in CSS pixels.
    #[must_use]
    pub fn pan_offset(&self) -> Vec2 {
        self.pan
    }

    /// Returns the configured zoom limits.
    #[must_use]
    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Returns the factor applied by one zoom step.
    #[must_use]
    pub fn zoom_step(&self) -> f64 {
        self.zoom_step
    }

    /// Returns the distance covered by one pan step.
    #[must_use]
    pub fn pan_step(&self) -> f64 {
        self.pan_step
    }

    /// Sets the zoom factor, clamping it into the configured limits.
    ///
    /// Returns `true` if the scale changed.
    pub fn set_scale(&mut self, scale: f64) -> bool {
        if scale.is_nan() {
            return false;
        }
        let clamped = self.limits.clamp(scale);
        if (self.scale - clamped).abs() < f64::EPSILON {
            return false;
        }
        self.scale = clamped;
        true
    }

    /// Multiplies the scale by one zoom step.
    ///
    /// Returns `true` if the scale changed; at the upper limit this is a no-op.
    pub fn zoom_in(&mut self) -> bool {
        self.set_scale(self.scale * self.zoom_step)
    }

    /// Divides the scale by one zoom step.
    ///
    /// Returns `true` if the scale changed; at the lower limit this is a no-op.
    pub fn zoom_out(&mut self) -> bool {
        self.set_scale(self.scale / self.zoom_step)
    }

    /// Moves the content one pan step in `direction`.
    pub fn pan(&mut self, direction: PanDirection) {
        self.pan_by(direction.offset(self.pan_step));
    }

    /// Moves the content by an arbitrary offset in CSS pixels.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Restores scale `1.0` (or the nearest limit if `1.0` lies outside the
    /// limits) and zero pan. Limits and steps are kept.
    pub fn reset(&mut self) {
        self.scale = self.limits.clamp(1.0);
        self.pan = Vec2::ZERO;
    }

    /// Returns `true` for scale `1.0` and zero pan.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.scale == 1.0 && self.pan == Vec2::ZERO
    }

    /// Composed transform relative to the element's center: translate, then scale.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.pan) * Affine::scale(self.scale)
    }

    /// CSS rendition of [`ViewTransform::to_affine`].
    #[must_use]
    pub fn css(&self) -> CssTransform {
        CssTransform {
            pan: self.pan,
            scale: self.scale,
        }
    }

    /// Snapshot of the current state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewTransformDebugInfo {
        ViewTransformDebugInfo {
            scale: self.scale,
            pan: self.pan,
            limits: self.limits,
            zoom_step: self.zoom_step,
            pan_step: self.pan_step,
        }
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new()
    }
}

/// A CSS `transform` value: `translate(<x>px, <y>px) scale(<s>)`.
///
/// Numbers are written with their shortest round-trip representation, so a
/// scale of `1.0` renders as `scale(1)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CssTransform {
    /// Translation in CSS pixels.
    pub pan: Vec2,
    /// Uniform scale factor.
    pub scale: f64,
}

impl fmt::Display for CssTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({}px, {}px) scale({})",
            self.pan.x, self.pan.y, self.scale
        )
    }
}

/// Debug snapshot of a [`ViewTransform`] state.
#[derive(Clone, Copy, Debug)]
pub struct ViewTransformDebugInfo {
    /// Current uniform zoom factor.
    pub scale: f64,
    /// Current pan offset in CSS pixels.
    pub pan: Vec2,
    /// Zoom limits.
    pub limits: ZoomLimits,
    /// Factor of one zoom step.
    pub zoom_step: f64,
    /// Distance of one pan step.
    pub pan_step: f64,
}
