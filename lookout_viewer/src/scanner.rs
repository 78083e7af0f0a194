// Copyright 2025 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attaching viewer affordances to rendered diagrams.
//!
//! ## Usage
//!
//! 1) Once the render library has had time to render, run a
//!    [`ScanPass::Bootstrap`] over every diagram on the page.
//! 2) Whenever elements are added to the page, run a [`ScanPass::Mutation`].
//!    It only sees diagrams without the marker attribute and tags each one
//!    before attaching anything, so repeated mutations never attach twice.
//!
//! The bootstrap pass does not tag. A diagram it handled is seen once more by
//! the first mutation pass, which skips the existing button but attaches a
//! second open handler; both handlers open the same diagram and the viewer
//! replaces the first overlay with the second.

/// Which diagrams a scan covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScanPass {
    /// Every diagram on the page; nothing is tagged.
    Bootstrap,
    /// Only diagrams without the marker attribute; each is tagged.
    Mutation,
}

/// Page operations the scanner needs.
pub trait DiagramHost {
    /// Handle to a rendered diagram.
    type Diagram;

    /// Diagrams covered by `pass`, in document order.
    fn diagrams(&self, pass: ScanPass) -> Vec<Self::Diagram>;

    /// Returns `true` if `diagram` already carries a fullscreen button.
    fn has_affordance(&self, diagram: &Self::Diagram) -> bool;

    /// Sets the marker attribute on `diagram`.
    fn mark(&mut self, diagram: &Self::Diagram);

    /// Adds the fullscreen button, shown on hover, that opens the viewer for
    /// `diagram` without letting the click reach the diagram's own handler.
    fn attach_affordance(&mut self, diagram: &Self::Diagram);

    /// Makes clicks on `diagram` open the viewer, except clicks that
    /// originate on its fullscreen button.
    fn attach_open_handler(&mut self, diagram: &Self::Diagram);
}

/// What a scan did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Diagrams covered by the pass.
    pub found: usize,
    /// Diagrams tagged with the marker attribute.
    pub marked: usize,
    /// Fullscreen buttons added.
    pub buttons_added: usize,
    /// Diagrams that already had a button.
    pub buttons_skipped: usize,
    /// Open handlers attached.
    pub handlers_attached: usize,
}

/// Runs one scan over `host`.
pub fn scan<H: DiagramHost>(host: &mut H, pass: ScanPass) -> ScanReport {
    let diagrams = host.diagrams(pass);
    let mut report = ScanReport {
        found: diagrams.len(),
        ..ScanReport::default()
    };
    for diagram in &diagrams {
        if pass == ScanPass::Mutation {
            host.mark(diagram);
            report.marked += 1;
        }
        if host.has_affordance(diagram) {
            report.buttons_skipped += 1;
        } else {
            host.attach_affordance(diagram);
            report.buttons_added += 1;
        }
        host.attach_open_handler(diagram);
        report.handlers_attached += 1;
    }
    if report.found > 0 {
        log::info!(
            "{pass:?} scan: {} diagram(s), {} button(s) added",
            report.found,
            report.buttons_added
        );
    }
    report
}
