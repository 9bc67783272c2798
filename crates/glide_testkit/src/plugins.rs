//! Tracer plugins for registry and lifecycle tests
//!
//! Plugin constructors are plain `fn` pointers, so construction is
//! observed through a thread-local build log instead of captured state.
//! Reset the log at the start of a test, create the surface, then assert
//! on [`build_log`].

use std::any::Any;
use std::cell::RefCell;

use glide_core::events::Outcome;
use glide_scroll::events::hook;
use glide_scroll::orchestrator::OrchestratorHandle;
use glide_scroll::plugin::{Plugin, PluginDescriptor, PluginOrder};

thread_local! {
    static BUILD_LOG: RefCell<Vec<&'static str>> = const { RefCell::new(Vec::new()) };
}

/// Clear the per-thread construction log
pub fn reset_build_log() {
    BUILD_LOG.with(|log| log.borrow_mut().clear());
}

/// Plugin names in construction order since the last reset
pub fn build_log() -> Vec<&'static str> {
    BUILD_LOG.with(|log| log.borrow().clone())
}

fn record(name: &'static str) {
    BUILD_LOG.with(|log| log.borrow_mut().push(name));
}

/// A plugin that only records its construction
pub struct TracerPlugin {
    pub name: &'static str,
}

impl Plugin for TracerPlugin {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub fn build_observe_size(_surface: &OrchestratorHandle) -> Box<dyn Plugin> {
    record("observe_size");
    Box::new(TracerPlugin {
        name: "observe_size",
    })
}

pub fn build_wheel(_surface: &OrchestratorHandle) -> Box<dyn Plugin> {
    record("wheel");
    Box::new(TracerPlugin { name: "wheel" })
}

pub fn build_pull_up(_surface: &OrchestratorHandle) -> Box<dyn Plugin> {
    record("pull_up");
    Box::new(TracerPlugin { name: "pull_up" })
}

pub fn build_scroll_bar(_surface: &OrchestratorHandle) -> Box<dyn Plugin> {
    record("scroll_bar");
    Box::new(TracerPlugin { name: "scroll_bar" })
}

/// Pre-ordered: wants to observe before other plugins attach
pub fn observe_size_descriptor() -> PluginDescriptor {
    PluginDescriptor::new("observe_size", build_observe_size).with_order(PluginOrder::Pre)
}

pub fn wheel_descriptor() -> PluginDescriptor {
    PluginDescriptor::new("wheel", build_wheel)
}

pub fn pull_up_descriptor() -> PluginDescriptor {
    PluginDescriptor::new("pull_up", build_pull_up)
}

/// Post-ordered: wants every other plugin applied first
pub fn scroll_bar_descriptor() -> PluginDescriptor {
    PluginDescriptor::new("scroll_bar", build_scroll_bar).with_order(PluginOrder::Post)
}

/// A plugin that keeps its own saved position: it vetoes the surface's
/// initial scroll by stopping the `before_initial_scroll_to` checkpoint
pub struct AnchorPlugin;

impl Plugin for AnchorPlugin {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub fn build_anchor(surface: &OrchestratorHandle) -> Box<dyn Plugin> {
    record("anchor");
    surface
        .hooks()
        .once(hook::BEFORE_INITIAL_SCROLL_TO, |_payload| Outcome::Stop);
    Box::new(AnchorPlugin)
}

pub fn anchor_descriptor() -> PluginDescriptor {
    PluginDescriptor::new("anchor", build_anchor)
}

/// A plugin that shifts the initial scroll target in place (the payload
/// of `before_initial_scroll_to` passes by reference)
pub struct StartOffsetPlugin;

impl Plugin for StartOffsetPlugin {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub fn build_start_offset(surface: &OrchestratorHandle) -> Box<dyn Plugin> {
    record("start_offset");
    surface
        .hooks()
        .once(hook::BEFORE_INITIAL_SCROLL_TO, |payload| {
            if let Some(position) = payload.point_mut() {
                position.y -= 200.0;
            }
        });
    Box::new(StartOffsetPlugin)
}

pub fn start_offset_descriptor() -> PluginDescriptor {
    PluginDescriptor::new("start_offset", build_start_offset)
}
