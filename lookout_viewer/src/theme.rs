// Copyright 2025 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Light/dark filter applied to the diagram copy inside a viewer.
//!
//! Diagrams are rendered for a light page. "Dark" is an inversion filter with a
//! half-turn hue rotation, which keeps hues recognizable while flipping
//! lightness. The flag is tracked explicitly by the viewer session;
//! [`Theme::from_filter`] recovers it from a CSS `filter` value when a caller
//! only has the element to go by.

/// CSS `filter` value applied in [`Theme::Dark`].
pub const DARK_FILTER: &str = "invert(1) hue-rotate(180deg)";

/// Which filter the diagram copy currently shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    /// No filter; the diagram as rendered.
    #[default]
    Light,
    /// [`DARK_FILTER`] applied.
    Dark,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// CSS `filter` value for this theme.
    #[must_use]
    pub fn filter(self) -> &'static str {
        match self {
            Self::Light => "none",
            Self::Dark => DARK_FILTER,
        }
    }

    /// Glyph shown on the toggle button while this theme is active.
    ///
    /// A moon offers the dark filter; a sun offers to go back.
    #[must_use]
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Self::Light => "🌙",
            Self::Dark => "☀️",
        }
    }

    /// Derives the theme from a CSS `filter` value: any inversion counts as dark.
    #[must_use]
    pub fn from_filter(filter: &str) -> Self {
        if filter.contains("invert") {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_clears_the_filter() {
        let theme = Theme::default().toggled().toggled();
        assert_eq!(theme, Theme::Light);
        assert_eq!(theme.filter(), "none");
    }

    #[test]
    fn filter_round_trips_through_derivation() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(Theme::from_filter(theme.filter()), theme);
        }
        assert_eq!(Theme::from_filter(""), Theme::Light);
        assert_eq!(Theme::from_filter("invert(0.9)"), Theme::Dark);
    }

    #[test]
    fn icons_differ() {
        assert_ne!(Theme::Light.toggle_icon(), Theme::Dark.toggle_icon());
    }
}
