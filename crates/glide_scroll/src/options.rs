//! Surface configuration
//!
//! [`Options`] is what embedders hand to [`create`](crate::create):
//! every field has a default, the struct deserializes from config, and
//! chainable setters cover the common adjustments. Normalization merges it
//! over the defaults and freezes the result as [`ResolvedOptions`], the
//! read-only configuration the orchestrator and the motion engine consume.

use glide_core::events::Point;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// User-supplied configuration for a scrolling surface
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Which child of the wrapper becomes the content element
    pub content_index: usize,
    /// Initial horizontal scroll position
    pub start_x: f64,
    /// Initial vertical scroll position
    pub start_y: f64,
    /// Blur a focused text-entry element when a scroll gesture begins
    pub auto_blur: bool,
    /// Let the engine rebound past the boundary (passthrough knob)
    pub bounce: bool,
    /// Let the engine keep momentum after release (passthrough knob)
    pub momentum: bool,
    /// Per-plugin activation flags, keyed by registered plugin name.
    /// Absent means off: plugins are opt-in.
    pub plugins: FxHashMap<String, bool>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            content_index: 0,
            start_x: 0.0,
            start_y: 0.0,
            auto_blur: false,
            bounce: true,
            momentum: true,
            plugins: FxHashMap::default(),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the wrapper's child at `index` as content
    pub fn with_content_index(mut self, index: usize) -> Self {
        self.content_index = index;
        self
    }

    /// Set the initial scroll position
    pub fn starting_at(mut self, x: f64, y: f64) -> Self {
        self.start_x = x;
        self.start_y = y;
        self
    }

    /// Enable or disable auto-blur of focused text entries
    pub fn with_auto_blur(mut self, on: bool) -> Self {
        self.auto_blur = on;
        self
    }

    /// Activate a registered plugin for this surface
    pub fn with_plugin(mut self, name: &str) -> Self {
        self.plugins.insert(name.to_string(), true);
        self
    }

    /// Merge over defaults and freeze
    pub fn resolve(self) -> ResolvedOptions {
        ResolvedOptions {
            content_index: self.content_index,
            start_x: self.start_x,
            start_y: self.start_y,
            auto_blur: self.auto_blur,
            bounce: self.bounce,
            momentum: self.momentum,
            plugins: self.plugins,
        }
    }
}

/// Immutable-after-construction configuration
///
/// Produced once during initialization; the orchestrator and the motion
/// engine only ever read it.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    content_index: usize,
    start_x: f64,
    start_y: f64,
    auto_blur: bool,
    bounce: bool,
    momentum: bool,
    plugins: FxHashMap<String, bool>,
}

impl ResolvedOptions {
    pub fn content_index(&self) -> usize {
        self.content_index
    }

    pub fn start_x(&self) -> f64 {
        self.start_x
    }

    pub fn start_y(&self) -> f64 {
        self.start_y
    }

    /// The initial scroll position as a point
    pub fn start_position(&self) -> Point {
        Point::new(self.start_x, self.start_y)
    }

    pub fn auto_blur(&self) -> bool {
        self.auto_blur
    }

    pub fn bounce(&self) -> bool {
        self.bounce
    }

    pub fn momentum(&self) -> bool {
        self.momentum
    }

    /// Whether the plugin with this name is activated for the surface
    pub fn plugin_enabled(&self, name: &str) -> bool {
        self.plugins.get(name).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = Options::default().resolve();
        assert_eq!(opts.content_index(), 0);
        assert_eq!(opts.start_position(), Point::ZERO);
        assert!(!opts.auto_blur());
        assert!(opts.bounce());
        assert!(opts.momentum());
    }

    #[test]
    fn test_plugin_flags_are_opt_in() {
        let opts = Options::new().with_plugin("pull_up").resolve();
        assert!(opts.plugin_enabled("pull_up"));
        assert!(!opts.plugin_enabled("wheel"));
    }

    #[test]
    fn test_explicit_false_stays_off() {
        let mut user = Options::new();
        user.plugins.insert("wheel".to_string(), false);
        let opts = user.resolve();
        assert!(!opts.plugin_enabled("wheel"));
    }

    #[test]
    fn test_builder_chain() {
        let opts = Options::new()
            .with_content_index(1)
            .starting_at(0.0, -40.0)
            .with_auto_blur(true)
            .resolve();
        assert_eq!(opts.content_index(), 1);
        assert_eq!(opts.start_y(), -40.0);
        assert!(opts.auto_blur());
    }
}
