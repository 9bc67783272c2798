//! Recording mock motion engine
//!
//! [`MockEngine`] satisfies the [`MotionEngine`] contract by recording
//! every call and holding scriptable field values. Because the
//! orchestrator constructs its engine internally, tests reach the
//! recording through an [`EngineProbe`]: install one, create the surface,
//! then inspect the calls and fire engine hooks from the outside.
//!
//! ```ignore
//! let probe = EngineProbe::install();
//! let surface = create::<MockEngine>(&tree, wrapper, Options::default());
//!
//! assert!(probe.calls().contains(&EngineCall::Enable));
//! probe.hooks().emit("resize"); // drives surface.refresh()
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use glide_core::events::EventRegistry;
use glide_core::host::{HostTreeHandle, NodeId};
use glide_scroll::engine::{EngineField, FieldValue, MotionEngine};
use glide_scroll::events::engine as engine_events;
use glide_scroll::options::ResolvedOptions;

/// One recorded engine invocation
#[derive(Clone, Debug, PartialEq)]
pub enum EngineCall {
    Construct { wrapper: NodeId, content: NodeId },
    Refresh(NodeId),
    Enable,
    Disable,
    Destroy,
    ScrollTo { x: f64, y: f64 },
    ResetPosition,
}

/// Scriptable values behind the delegated fields
#[derive(Debug, Default)]
struct FieldState {
    x: f64,
    y: f64,
    max_scroll_x: f64,
    max_scroll_y: f64,
    moving_direction_x: i64,
    moving_direction_y: i64,
    direction_x: i64,
    direction_y: i64,
}

impl FieldState {
    fn read(&self, field: EngineField) -> FieldValue {
        match field {
            EngineField::X => FieldValue::Float(self.x),
            EngineField::Y => FieldValue::Float(self.y),
            EngineField::MaxScrollX => FieldValue::Float(self.max_scroll_x),
            EngineField::MaxScrollY => FieldValue::Float(self.max_scroll_y),
            EngineField::MovingDirectionX => FieldValue::Int(self.moving_direction_x),
            EngineField::MovingDirectionY => FieldValue::Int(self.moving_direction_y),
            EngineField::DirectionX => FieldValue::Int(self.direction_x),
            EngineField::DirectionY => FieldValue::Int(self.direction_y),
        }
    }

    fn write(&mut self, field: EngineField, value: FieldValue) {
        match (field, value) {
            (EngineField::X, FieldValue::Float(v)) => self.x = v,
            (EngineField::Y, FieldValue::Float(v)) => self.y = v,
            (EngineField::MaxScrollX, FieldValue::Float(v)) => self.max_scroll_x = v,
            (EngineField::MaxScrollY, FieldValue::Float(v)) => self.max_scroll_y = v,
            (EngineField::MovingDirectionX, FieldValue::Int(v)) => self.moving_direction_x = v,
            (EngineField::MovingDirectionY, FieldValue::Int(v)) => self.moving_direction_y = v,
            (EngineField::DirectionX, FieldValue::Int(v)) => self.direction_x = v,
            (EngineField::DirectionY, FieldValue::Int(v)) => self.direction_y = v,
            _ => {}
        }
    }
}

#[derive(Default)]
struct ProbeState {
    calls: Vec<EngineCall>,
    fields: FieldState,
}

thread_local! {
    static STAGED: RefCell<Option<(Rc<RefCell<ProbeState>>, Rc<EventRegistry>)>> =
        const { RefCell::new(None) };
}

/// Handle into the next [`MockEngine`] constructed on this thread
pub struct EngineProbe {
    state: Rc<RefCell<ProbeState>>,
    hooks: Rc<EventRegistry>,
}

impl Clone for EngineProbe {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            hooks: Rc::clone(&self.hooks),
        }
    }
}

impl EngineProbe {
    /// Stage a probe; the next `MockEngine::new` on this thread adopts it
    pub fn install() -> Self {
        let state = Rc::new(RefCell::new(ProbeState::default()));
        let hooks = Rc::new(EventRegistry::with_names(&engine_events::ALL));
        STAGED.with(|staged| {
            *staged.borrow_mut() = Some((Rc::clone(&state), Rc::clone(&hooks)));
        });
        Self { state, hooks }
    }

    /// Everything the engine was asked to do, in order
    pub fn calls(&self) -> Vec<EngineCall> {
        self.state.borrow().calls.clone()
    }

    /// Whether `MockEngine::new` ran at all
    pub fn was_constructed(&self) -> bool {
        self.state
            .borrow()
            .calls
            .iter()
            .any(|c| matches!(c, EngineCall::Construct { .. }))
    }

    /// Forget recorded calls (keeps field state)
    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// The engine-owned hook registry; trigger it to simulate engine
    /// events (resize, gestures) reaching the orchestrator
    pub fn hooks(&self) -> &Rc<EventRegistry> {
        &self.hooks
    }

    /// Script a delegated field value
    pub fn set_field(&self, field: EngineField, value: FieldValue) {
        self.state.borrow_mut().fields.write(field, value);
    }
}

/// A motion engine that records instead of moving anything
pub struct MockEngine {
    state: Rc<RefCell<ProbeState>>,
    hooks: Rc<EventRegistry>,
}

impl MockEngine {
    fn push(&self, call: EngineCall) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl MotionEngine for MockEngine {
    fn new(
        _tree: HostTreeHandle,
        wrapper: NodeId,
        content: NodeId,
        _options: &ResolvedOptions,
    ) -> Self {
        let (state, hooks) = STAGED
            .with(|staged| staged.borrow_mut().take())
            .unwrap_or_else(|| {
                (
                    Rc::new(RefCell::new(ProbeState::default())),
                    Rc::new(EventRegistry::with_names(&engine_events::ALL)),
                )
            });
        state
            .borrow_mut()
            .calls
            .push(EngineCall::Construct { wrapper, content });
        Self { state, hooks }
    }

    fn refresh(&mut self, content: NodeId) {
        self.push(EngineCall::Refresh(content));
    }

    fn enable(&mut self) {
        self.push(EngineCall::Enable);
    }

    fn disable(&mut self) {
        self.push(EngineCall::Disable);
    }

    fn destroy(&mut self) {
        self.push(EngineCall::Destroy);
    }

    fn scroll_to(&mut self, x: f64, y: f64) {
        self.push(EngineCall::ScrollTo { x, y });
        let mut state = self.state.borrow_mut();
        state.fields.x = x;
        state.fields.y = y;
    }

    fn reset_position(&mut self) {
        self.push(EngineCall::ResetPosition);
        let mut state = self.state.borrow_mut();
        state.fields.x = 0.0;
        state.fields.y = 0.0;
    }

    fn hooks(&self) -> Rc<EventRegistry> {
        Rc::clone(&self.hooks)
    }

    fn field(&self, field: EngineField) -> FieldValue {
        self.state.borrow().fields.read(field)
    }

    fn set_field(&mut self, field: EngineField, value: FieldValue) {
        self.state.borrow_mut().fields.write(field, value);
    }
}
