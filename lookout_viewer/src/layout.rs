// Copyright 2025 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The buttons a viewer overlay and a diagram affordance are built from.
//!
//! Class names are part of the page's styling contract: the documentation
//! theme ships CSS that targets them, so they are fixed here rather than
//! configurable.

use lookout_view::PanDirection;

use crate::action::Action;

/// Class of the box holding buttons and diagram inside the overlay.
pub const CONTENT_CLASS: &str = "mermaid-modal-content";
/// Class of the element wrapping the diagram copy.
pub const DIAGRAM_CONTAINER_CLASS: &str = "mermaid-modal-diagram-container";
/// Id of the element the diagram copy is placed in.
pub const DIAGRAM_ID: &str = "mermaid-modal-diagram";
/// Class of the 3×3 control grid.
pub const CONTROLS_CLASS: &str = "mermaid-controls";
/// Extra class an overlay carries while shown.
pub const ACTIVE_CLASS: &str = "active";
/// Class of placeholder cells in the control grid.
pub const SPACER_CLASS: &str = "spacer";

/// One button of the overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonSpec {
    /// CSS class.
    pub class: &'static str,
    /// Visible glyph.
    pub label: &'static str,
    /// Tooltip.
    pub title: &'static str,
    /// Declared action; `None` for spacers.
    pub action: Option<Action>,
}

impl ButtonSpec {
    const fn control(
        class: &'static str,
        label: &'static str,
        title: &'static str,
        action: Action,
    ) -> Self {
        Self {
            class,
            label,
            title,
            action: Some(action),
        }
    }

    const fn spacer() -> Self {
        Self {
            class: SPACER_CLASS,
            label: "",
            title: "",
            action: None,
        }
    }

    /// Returns `true` for placeholder cells that must not be wired to anything.
    #[must_use]
    pub fn is_spacer(&self) -> bool {
        self.action.is_none()
    }
}

/// Buttons of the viewer overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModalLayout {
    /// Close button, top right.
    pub close: ButtonSpec,
    /// Theme toggle, next to the close button. Its label tracks the theme.
    pub theme_toggle: ButtonSpec,
    /// Control grid, row by row.
    pub controls: [ButtonSpec; 9],
}

impl ModalLayout {
    /// The layout every overlay uses.
    pub const STANDARD: Self = Self {
        close: ButtonSpec::control("mermaid-modal-close", "×", "Close", Action::Close),
        theme_toggle: ButtonSpec::control(
            "mermaid-theme-toggle",
            "🌙",
            "Toggle theme",
            Action::ToggleTheme,
        ),
        controls: [
            ButtonSpec::control("zoom-in", "+", "Zoom in", Action::ZoomIn),
            ButtonSpec::control("up", "↑", "Up", Action::Pan(PanDirection::Up)),
            ButtonSpec::control("zoom-out", "−", "Zoom out", Action::ZoomOut),
            ButtonSpec::control("left", "←", "Left", Action::Pan(PanDirection::Left)),
            ButtonSpec::control("reset", "⟲", "Reset", Action::ResetView),
            ButtonSpec::control("right", "→", "Right", Action::Pan(PanDirection::Right)),
            ButtonSpec::spacer(),
            ButtonSpec::control("down", "↓", "Down", Action::Pan(PanDirection::Down)),
            ButtonSpec::spacer(),
        ],
    };

    /// All buttons in document order: close, theme toggle, then the grid.
    pub fn buttons(&self) -> impl Iterator<Item = &ButtonSpec> {
        [&self.close, &self.theme_toggle]
            .into_iter()
            .chain(self.controls.iter())
    }

    /// Buttons that carry an action.
    pub fn wired_buttons(&self) -> impl Iterator<Item = &ButtonSpec> {
        self.buttons().filter(|button| !button.is_spacer())
    }
}

impl Default for ModalLayout {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// The fullscreen button attached to each diagram.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AffordanceSpec {
    /// Visible glyph.
    pub label: &'static str,
    /// Tooltip.
    pub title: &'static str,
    /// Inline style; the button starts hidden and fades in on hover.
    pub style: &'static str,
}

impl AffordanceSpec {
    /// The affordance every diagram gets.
    pub const STANDARD: Self = Self {
        label: "⛶",
        title: "Open fullscreen",
        style: "position: absolute; top: 5px; right: 5px; \
                background: rgba(52, 152, 219, 0.9); color: white; border: none; \
                border-radius: 4px; width: 25px; height: 25px; font-size: 12px; \
                cursor: pointer; z-index: 10; opacity: 0; transition: opacity 0.2s ease;",
    };

    /// Opacity while the pointer is over the diagram.
    pub const VISIBLE_OPACITY: &'static str = "1";
    /// Opacity otherwise.
    pub const HIDDEN_OPACITY: &'static str = "0";
}

/// Inline styles given to the diagram copy's graphic: bounded by the overlay,
/// auto-sized, centered block.
pub const GRAPHIC_STYLES: [(&str, &str); 8] = [
    ("max-width", "100%"),
    ("max-height", "100%"),
    ("width", "auto"),
    ("height", "auto"),
    ("transform-origin", lookout_view::TRANSFORM_ORIGIN),
    ("object-fit", "contain"),
    ("display", "block"),
    ("margin", "auto"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    #[test]
    fn every_action_has_exactly_one_button() {
        let layout = ModalLayout::STANDARD;
        for action in Action::ALL {
            let count = layout
                .wired_buttons()
                .filter(|button| button.action == Some(action))
                .count();
            assert_eq!(count, 1, "{action}");
        }
    }

    #[test]
    fn spacers_are_not_wired() {
        let layout = ModalLayout::STANDARD;
        assert_eq!(layout.buttons().count(), 11);
        assert_eq!(layout.wired_buttons().count(), 9);
        let spacers: Vec<_> = layout.buttons().filter(|b| b.is_spacer()).collect();
        assert_eq!(spacers.len(), 2);
        assert!(spacers.iter().all(|b| b.class == SPACER_CLASS));
    }

    #[test]
    fn toggle_starts_light() {
        assert_eq!(
            ModalLayout::STANDARD.theme_toggle.label,
            Theme::Light.toggle_icon()
        );
    }
}
