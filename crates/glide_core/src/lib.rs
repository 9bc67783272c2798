//! Glide Core Runtime
//!
//! This crate provides the foundational primitives for the Glide scrolling
//! surface orchestrator:
//!
//! - **Event Registries**: declared-vocabulary synchronous pub/sub with
//!   ordered delivery, one-shot listeners, and an aggregated stop/veto
//!   result used as a cancellation checkpoint
//! - **Host Tree**: the retained element tree a surface binds against,
//!   with `#id` selector resolution, focus tracking, and managed-wrapper
//!   marking
//!
//! # Example
//!
//! ```rust
//! use glide_core::events::{EventPayload, EventRegistry, Outcome, Point};
//!
//! let registry = EventRegistry::with_names(&["before_initial_scroll_to"]);
//! registry.on("before_initial_scroll_to", |payload| {
//!     if let Some(p) = payload.point_mut() {
//!         p.y = 100.0;
//!     }
//!     Outcome::Continue
//! });
//!
//! let mut payload = EventPayload::Point(Point::ZERO);
//! let vetoed = registry.trigger("before_initial_scroll_to", &mut payload);
//! assert!(!vetoed);
//! assert_eq!(payload.point().unwrap().y, 100.0);
//! ```

pub mod error;
pub mod events;
pub mod host;

pub use error::HostError;
pub use events::{EventPayload, EventRegistry, ListenerId, Outcome, Point};
pub use host::{HostTree, HostTreeHandle, NodeId, NodeKind};
