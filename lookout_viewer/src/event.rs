// Copyright 2025 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Events fed into a [`Viewer`](crate::viewer::Viewer) and the propagation
//! outcome it answers with.
//!
//! The presentation layer classifies each native event before handing it over:
//! a click is reported together with *what* was clicked, a key press with its
//! `key` value. The controller never sees native event objects.
//!
//! After [`Viewer::handle`](crate::viewer::Viewer::handle) returns, the binding
//! applies the [`Outcome`]:
//!
//! - [`Outcome::Continue`]: let the event propagate as usual.
//! - [`Outcome::Stop`]: stop propagation, so ancestors' handlers do not run.
//! - [`Outcome::StopAndConsume`]: stop propagation and prevent the default action.

/// What a click landed on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickTarget<D> {
    /// The body of a rendered diagram.
    Diagram {
        /// The diagram whose handler fired.
        diagram: D,
        /// `true` when the click originated on (or inside) the diagram's
        /// fullscreen button.
        on_affordance: bool,
    },
    /// The fullscreen button attached to a diagram.
    Affordance(D),
    /// The viewer overlay.
    Overlay {
        /// `true` when the click target is the backdrop itself, not the
        /// content it contains.
        on_backdrop: bool,
    },
    /// A control button of the overlay, with its declared action identifier.
    Control(String),
}

/// An input the viewer reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent<D> {
    /// A mouse click.
    Click(ClickTarget<D>),
    /// A document-level key press, carrying `KeyboardEvent.key`.
    KeyDown(String),
    /// A deferred transform application came due.
    LayoutRetry,
}

/// How the native event should propagate after handling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Outcome {
    /// Keep propagating.
    #[default]
    Continue,
    /// Stop propagation.
    Stop,
    /// Stop propagation and prevent the default action.
    StopAndConsume,
}

impl Outcome {
    /// Returns `true` for [`Outcome::Stop`] and [`Outcome::StopAndConsume`].
    #[must_use]
    pub fn stops_propagation(self) -> bool {
        !matches!(self, Self::Continue)
    }

    /// Returns `true` for [`Outcome::StopAndConsume`].
    #[must_use]
    pub fn prevents_default(self) -> bool {
        matches!(self, Self::StopAndConsume)
    }
}

#[cfg(test)]
mod tests {
    use super::Outcome;

    #[test]
    fn outcome_flags() {
        assert!(!Outcome::Continue.stops_propagation());
        assert!(!Outcome::Continue.prevents_default());
        assert!(Outcome::Stop.stops_propagation());
        assert!(!Outcome::Stop.prevents_default());
        assert!(Outcome::StopAndConsume.stops_propagation());
        assert!(Outcome::StopAndConsume.prevents_default());
    }
}
