// Copyright 2025 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Control actions of an open viewer and the keys bound to them.
//!
//! Overlay buttons declare their action through an identifier (the
//! `data-action` attribute in the browser binding); [`Action::from_str`]
//! parses it back. Keyboard input goes through [`Action::from_key`], which
//! takes the `KeyboardEvent.key` value.
//!
//! ```
//! use lookout_viewer::action::Action;
//!
//! assert_eq!("zoomIn".parse::<Action>().unwrap(), Action::ZoomIn);
//! assert_eq!(Action::from_key("="), Some(Action::ZoomIn));
//! assert_eq!(Action::from_key("t"), None);
//! ```

use core::fmt;
use core::str::FromStr;

use lookout_view::PanDirection;

use crate::Error;

/// Something the user can ask an open viewer to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Multiply the scale by one zoom step.
    ZoomIn,
    /// Divide the scale by one zoom step.
    ZoomOut,
    /// Pan one step.
    Pan(PanDirection),
    /// Restore the identity transform.
    ResetView,
    /// Switch between the light and dark filter.
    ToggleTheme,
    /// Close the viewer.
    Close,
}

impl Action {
    /// Every action, in overlay order.
    pub const ALL: [Self; 9] = [
        Self::Close,
        Self::ToggleTheme,
        Self::ZoomIn,
        Self::Pan(PanDirection::Up),
        Self::ZoomOut,
        Self::Pan(PanDirection::Left),
        Self::ResetView,
        Self::Pan(PanDirection::Right),
        Self::Pan(PanDirection::Down),
    ];

    /// The identifier a control button declares for this action.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ZoomIn => "zoomIn",
            Self::ZoomOut => "zoomOut",
            Self::Pan(PanDirection::Up) => "panUp",
            Self::Pan(PanDirection::Down) => "panDown",
            Self::Pan(PanDirection::Left) => "panLeft",
            Self::Pan(PanDirection::Right) => "panRight",
            Self::ResetView => "resetView",
            Self::ToggleTheme => "toggleTheme",
            Self::Close => "close",
        }
    }

    /// Maps a `KeyboardEvent.key` value to its action.
    ///
    /// Theme toggling has no key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let action = match key {
            "Escape" => Self::Close,
            "+" | "=" => Self::ZoomIn,
            "-" => Self::ZoomOut,
            "ArrowUp" => Self::Pan(PanDirection::Up),
            "ArrowDown" => Self::Pan(PanDirection::Down),
            "ArrowLeft" => Self::Pan(PanDirection::Left),
            "ArrowRight" => Self::Pan(PanDirection::Right),
            "0" => Self::ResetView,
            _ => return None,
        };
        Some(action)
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| Error::UnknownAction(s.to_owned()))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_round_trip() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn unknown_identifier_is_an_error() {
        let err = "spin".parse::<Action>().unwrap_err();
        assert!(matches!(err, Error::UnknownAction(ref id) if id == "spin"));
        assert_eq!(err.to_string(), "unknown control action `spin`");
    }

    #[test]
    fn key_bindings() {
        assert_eq!(Action::from_key("Escape"), Some(Action::Close));
        assert_eq!(Action::from_key("+"), Some(Action::ZoomIn));
        assert_eq!(Action::from_key("="), Some(Action::ZoomIn));
        assert_eq!(Action::from_key("-"), Some(Action::ZoomOut));
        assert_eq!(
            Action::from_key("ArrowUp"),
            Some(Action::Pan(PanDirection::Up))
        );
        assert_eq!(
            Action::from_key("ArrowDown"),
            Some(Action::Pan(PanDirection::Down))
        );
        assert_eq!(
            Action::from_key("ArrowLeft"),
            Some(Action::Pan(PanDirection::Left))
        );
        assert_eq!(
            Action::from_key("ArrowRight"),
            Some(Action::Pan(PanDirection::Right))
        );
        assert_eq!(Action::from_key("0"), Some(Action::ResetView));
    }

    #[test]
    fn no_key_toggles_theme() {
        for key in ["t", "T", "d", "Enter", " ", "Tab", "1"] {
            assert_ne!(Action::from_key(key), Some(Action::ToggleTheme));
        }
        assert_eq!(Action::from_key("Esc"), None);
    }
}
