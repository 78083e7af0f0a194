// Copyright 2025 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page-level configuration.
//!
//! Every field has a default matching the documentation theme's markup and
//! stylesheet, so a page only spells out what it changes:
//!
//! ```
//! use lookout_viewer::config::LookoutConfig;
//!
//! let config = LookoutConfig::from_json(r#"{ "zoom": { "max": 8 }, "panStep": 25 }"#).unwrap();
//! assert_eq!(config.zoom.max, 8.0);
//! assert_eq!(config.zoom.min, 0.1);
//! assert_eq!(config.pan_step, 25.0);
//! assert_eq!(config.selectors.diagram, ".mermaid");
//! ```

use lookout_view::{ViewTransform, ZoomLimits};
use serde::{Deserialize, Serialize};

use crate::Error;
use crate::bridge::RenderConfig;

/// Everything a page can tune.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LookoutConfig {
    /// How diagrams and the elements built around them are found.
    pub selectors: Selectors,
    /// Zoom step and limits.
    pub zoom: ZoomConfig,
    /// Pixels moved by one pan step.
    pub pan_step: f64,
    /// Delays and intervals, in milliseconds.
    pub timings: Timings,
    /// Options handed to the render library.
    pub render: RenderConfig,
}

impl Default for LookoutConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            zoom: ZoomConfig::default(),
            pan_step: ViewTransform::DEFAULT_PAN_STEP,
            timings: Timings::default(),
            render: RenderConfig::default(),
        }
    }
}

impl LookoutConfig {
    /// Parses a JSON object; missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(text)?)
    }

    /// An identity transform with this configuration's limits and steps.
    #[must_use]
    pub fn view_transform(&self) -> ViewTransform {
        ViewTransform::new()
            .with_limits(ZoomLimits::new(self.zoom.min, self.zoom.max))
            .with_steps(self.zoom.step, self.pan_step)
    }

    /// Selector for diagrams the mutation pass has not tagged yet.
    #[must_use]
    pub fn untagged_diagram_selector(&self) -> String {
        format!(
            "{}:not([{}])",
            self.selectors.diagram, self.selectors.marker_attribute
        )
    }
}

/// Selectors, class names and attribute names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Selectors {
    /// Selector matching diagram containers.
    pub diagram: String,
    /// Attribute the mutation pass tags diagrams with.
    pub marker_attribute: String,
    /// Class of the fullscreen button.
    pub affordance_class: String,
    /// Class of the viewer overlay.
    pub overlay_class: String,
    /// Selector of the graphic inside a rendered diagram.
    pub graphic: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            diagram: ".mermaid".to_owned(),
            marker_attribute: "data-controls-added".to_owned(),
            affordance_class: "mermaid-fullscreen-btn".to_owned(),
            overlay_class: "mermaid-modal-overlay".to_owned(),
            graphic: "svg".to_owned(),
        }
    }
}

/// Zoom step and limits.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Factor of one zoom step.
    pub step: f64,
    /// Smallest scale.
    pub min: f64,
    /// Largest scale.
    pub max: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        let limits = ZoomLimits::default();
        Self {
            step: ViewTransform::DEFAULT_ZOOM_STEP,
            min: limits.min(),
            max: limits.max(),
        }
    }
}

/// Delays and intervals, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Timings {
    /// Interval between checks for the render library.
    pub poll_interval_ms: u32,
    /// Delay between triggering a render pass and scanning for diagrams.
    pub scan_delay_ms: u32,
    /// Delay between DOM-ready and starting the bridge.
    pub dom_ready_delay_ms: u32,
    /// Delay between window load and the second start attempt.
    pub load_delay_ms: u32,
    /// Delay between start-up and installing the mutation watcher.
    pub watcher_delay_ms: u32,
    /// Delay before retrying a transform on a graphic without layout.
    pub layout_retry_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            scan_delay_ms: 500,
            dom_ready_delay_ms: 2000,
            load_delay_ms: 1000,
            watcher_delay_ms: 3000,
            layout_retry_ms: crate::viewer::DEFAULT_LAYOUT_RETRY_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_the_default() {
        assert_eq!(LookoutConfig::from_json("{}").unwrap(), LookoutConfig::default());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = LookoutConfig::from_json("{ zoom: ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn untagged_selector_excludes_marked_diagrams() {
        let config = LookoutConfig::default();
        assert_eq!(
            config.untagged_diagram_selector(),
            ".mermaid:not([data-controls-added])"
        );
    }

    #[test]
    fn view_transform_follows_config() {
        let config = LookoutConfig::from_json(
            r#"{ "zoom": { "step": 2.0, "min": 0.5, "max": 4.0 }, "panStep": 10 }"#,
        )
        .unwrap();
        let mut view = config.view_transform();
        for _ in 0..5 {
            view.zoom_in();
        }
        assert_eq!(view.scale(), 4.0);
        assert_eq!(view.pan_step(), 10.0);
    }

    #[test]
    fn configured_limits_hold_across_reset() {
        let config =
            LookoutConfig::from_json(r#"{ "zoom": { "min": 2.0, "max": 4.0 } }"#).unwrap();
        let mut view = config.view_transform();
        view.zoom_in();
        view.reset();
        assert!(
            view.limits().contains(view.scale()),
            "scale {} outside {:?}",
            view.scale(),
            view.limits()
        );
    }

    #[test]
    fn nested_render_options_merge_with_defaults() {
        let config = LookoutConfig::from_json(
            r#"{ "render": { "theme": "forest", "flowchart": { "htmlLabels": false } } }"#,
        )
        .unwrap();
        assert_eq!(config.render.theme, "forest");
        assert!(!config.render.flowchart.html_labels);
        assert!(config.render.flowchart.use_max_width);
        assert!(config.render.start_on_load);
    }
}
