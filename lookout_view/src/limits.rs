// Copyright 2025 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;

/// Inclusive range the zoom factor of a [`crate::ViewTransform`] is clamped to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomLimits {
    min: f64,
    max: f64,
}

impl ZoomLimits {
    /// Creates a new range, normalized so that `min <= max`.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Smallest allowed zoom factor.
    #[must_use]
    pub fn min(self) -> f64 {
        self.min
    }

    /// Largest allowed zoom factor.
    #[must_use]
    pub fn max(self) -> f64 {
        self.max
    }

    /// Clamps `zoom` into this range. Never panics, even for NaN bounds.
    #[must_use]
    pub fn clamp(self, zoom: f64) -> f64 {
        zoom.max(self.min).min(self.max)
    }

    /// Returns `true` if `zoom` lies inside this range.
    #[must_use]
    pub fn contains(self, zoom: f64) -> bool {
        zoom >= self.min && zoom <= self.max
    }
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self { min: 0.1, max: 5.0 }
    }
}

/// Direction of a single pan step.
///
/// The offsets move the *content*, matching the arrow glyphs on the viewer
/// controls: "up" shifts the diagram down the page so that the area above it
/// comes into view, and likewise for the other directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanDirection {
    /// Positive Y.
    Up,
    /// Negative Y.
    Down,
    /// Positive X.
    Left,
    /// Negative X.
    Right,
}

impl PanDirection {
    /// Offset produced by one step of `step` pixels in this direction.
    #[must_use]
    pub fn offset(self, step: f64) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, step),
            Self::Down => Vec2::new(0.0, -step),
            Self::Left => Vec2::new(step, 0.0),
            Self::Right => Vec2::new(-step, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Vec2;

    use super::{PanDirection, ZoomLimits};

    #[test]
    fn limits_are_normalized() {
        let limits = ZoomLimits::new(5.0, 0.1);
        assert_eq!(limits, ZoomLimits::default());
        assert_eq!(limits.min(), 0.1);
        assert_eq!(limits.max(), 5.0);
    }

    #[test]
    fn clamp_tolerates_nan_bounds() {
        let limits = ZoomLimits::new(f64::NAN, 2.0);
        assert!(limits.clamp(3.0) <= 3.0);
        let limits = ZoomLimits::new(0.5, 2.0);
        assert_eq!(limits.clamp(9.0), 2.0);
        assert_eq!(limits.clamp(0.0), 0.5);
    }

    #[test]
    fn opposite_directions_cancel() {
        let up = PanDirection::Up.offset(50.0);
        let down = PanDirection::Down.offset(50.0);
        let left = PanDirection::Left.offset(50.0);
        let right = PanDirection::Right.offset(50.0);
        assert_eq!(up + down, Vec2::ZERO);
        assert_eq!(left + right, Vec2::ZERO);
        assert_eq!(up, Vec2::new(0.0, 50.0));
        assert_eq!(right, Vec2::new(-50.0, 0.0));
    }
}
