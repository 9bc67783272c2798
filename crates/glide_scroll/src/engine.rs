//! Motion engine contract
//!
//! The orchestrator delegates all gesture capture, momentum, boundary and
//! animation work to a motion engine. Any engine implementation satisfies
//! this trait; the orchestrator only ever talks to it through these
//! methods and through the hook registry it owns.
//!
//! # Hook vocabulary
//!
//! The engine's [`hooks`](MotionEngine::hooks) registry must declare and
//! emit at least [`events::engine::RESIZE`](crate::events::engine::RESIZE)
//! plus the gesture names in [`events::BUBBLED`](crate::events::BUBBLED).
//! The orchestrator subscribes to `resize` (to drive its own refresh) and
//! forwards the gesture names to its public registry.
//!
//! # Reentrancy
//!
//! Engine methods called by the orchestrator must not synchronously
//! trigger engine hooks from within the call; hooks fire from the host
//! environment's input/animation callbacks, between orchestrator calls.

use std::rc::Rc;

use glide_core::events::EventRegistry;
use glide_core::host::{HostTreeHandle, NodeId};

use crate::options::ResolvedOptions;

/// Engine fields readable and writable through the property bridge
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EngineField {
    /// Current horizontal scroll position
    X,
    /// Current vertical scroll position
    Y,
    /// Most negative reachable horizontal position
    MaxScrollX,
    /// Most negative reachable vertical position
    MaxScrollY,
    /// Horizontal direction of the gesture in flight (-1, 0, 1)
    MovingDirectionX,
    /// Vertical direction of the gesture in flight (-1, 0, 1)
    MovingDirectionY,
    /// Horizontal direction of the last settled scroll (-1, 0, 1)
    DirectionX,
    /// Vertical direction of the last settled scroll (-1, 0, 1)
    DirectionY,
}

/// Value of a delegated engine field
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldValue {
    Float(f64),
    Int(i64),
}

impl FieldValue {
    pub fn as_float(self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(v),
            FieldValue::Int(_) => None,
        }
    }

    pub fn as_int(self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(v),
            FieldValue::Float(_) => None,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

/// The motion/physics collaborator the orchestrator drives
pub trait MotionEngine {
    /// Construct an engine bound to a wrapper and its content element
    fn new(
        tree: HostTreeHandle,
        wrapper: NodeId,
        content: NodeId,
        options: &ResolvedOptions,
    ) -> Self
    where
        Self: Sized;

    /// Re-measure against a (possibly new) content element
    fn refresh(&mut self, content: NodeId);

    /// Start responding to input
    fn enable(&mut self);

    /// Stop responding to input
    fn disable(&mut self);

    /// Tear down; the engine is dropped right after
    fn destroy(&mut self);

    /// Animate or jump to a scroll position
    fn scroll_to(&mut self, x: f64, y: f64);

    /// Snap transient position state back within bounds
    fn reset_position(&mut self);

    /// The engine-owned hook registry (see module docs for the required
    /// vocabulary)
    fn hooks(&self) -> Rc<EventRegistry>;

    /// Current value of a delegated field
    fn field(&self, field: EngineField) -> FieldValue;

    /// Forwarded write to a delegated field
    fn set_field(&mut self, field: EngineField, value: FieldValue);
}
