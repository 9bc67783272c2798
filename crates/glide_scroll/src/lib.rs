//! Glide Scroll Orchestrator
//!
//! The lifecycle-and-event core of a Glide scrolling surface:
//!
//! - **Orchestrator**: binds a wrapper and content node, owns the motion
//!   engine, drives enable/disable/refresh/destroy
//! - **Dual event surface**: public events for application code, internal
//!   hooks for plugins — parallel registries with distinct vocabularies
//! - **Plugin registry**: process-wide, append-only, ordered by
//!   Pre/Unordered/Post hints; plugins activate per surface through
//!   option flags
//! - **Property bridge**: enumerated live delegation of scroll state
//!   (`x`, `y`, `max_scroll_x`, …) to the engine
//!
//! Gesture physics, momentum, and boundary math live behind the
//! [`MotionEngine`] contract; this crate orchestrates, it never measures.
//!
//! # Example
//!
//! ```ignore
//! use glide_scroll::{create, register_plugin, Options};
//!
//! register_plugin(wheel_descriptor());
//!
//! let surface = create::<Scroller>(
//!     &tree,
//!     "#viewport",
//!     Options::new().with_plugin("wheel").starting_at(0.0, -120.0),
//! );
//!
//! surface.on("scroll_end", |_| {
//!     // bubbled from the engine
//! });
//! ```

pub mod bridge;
pub mod engine;
pub mod events;
pub mod options;
pub mod orchestrator;
pub mod plugin;

pub use bridge::{PropertyBridge, DELEGATED_FIELDS};
pub use engine::{EngineField, FieldValue, MotionEngine};
pub use options::{Options, ResolvedOptions};
pub use orchestrator::{
    create, create_with, BindTarget, Orchestrator, OrchestratorHandle, Phase,
};
pub use plugin::{
    register_plugin, with_global_registry, GlobalRegistry, Plugin, PluginCtor,
    PluginDescriptor, PluginOrder, PluginRegistry,
};
