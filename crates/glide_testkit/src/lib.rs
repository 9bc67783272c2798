//! Glide Test Support
//!
//! Mocks and fixtures shared by the Glide test suites:
//!
//! - [`MockEngine`] / [`EngineProbe`]: a recording motion engine and the
//!   probe that inspects it from outside the orchestrator
//! - Tracer plugins with a per-thread build log, for registry ordering
//!   and activation tests
//! - Host-tree fixtures for the common wrapper/content shapes

pub mod engine;
pub mod plugins;
pub mod tree;

pub use engine::{EngineCall, EngineProbe, MockEngine};
pub use plugins::{
    anchor_descriptor, build_log, observe_size_descriptor, pull_up_descriptor,
    reset_build_log, scroll_bar_descriptor, start_offset_descriptor, wheel_descriptor,
    AnchorPlugin, StartOffsetPlugin, TracerPlugin,
};
pub use tree::{surface_tree, surface_tree_with_focused_input};
