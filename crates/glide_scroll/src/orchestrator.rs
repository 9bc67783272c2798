//! The scrolling-surface orchestrator
//!
//! [`Orchestrator`] binds a wrapper element and its content element,
//! owns one motion engine, and drives the whole lifecycle: option
//! resolution, plugin application, the dual event surface (public events
//! for applications, internal hooks for plugins), gesture-event bubbling
//! from the engine, and enable/disable/refresh/destroy.
//!
//! # Architecture
//!
//! ```text
//! host input / animation callbacks
//!     ↓
//! MotionEngine hooks (resize, gesture events)
//!     ↓ bubbling (same name, same payload)
//! Orchestrator public EventRegistry  ← application on/once/off
//! Orchestrator hook EventRegistry    ← plugins (can veto checkpoints)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use glide_scroll::{create, Options};
//!
//! let surface = create::<Scroller>(&tree, "#viewport", Options::default());
//! surface.on("scroll", |payload| {
//!     // react to bubbled gesture events
//! });
//! surface.refresh();
//! ```
//!
//! A surface whose wrapper or content cannot be resolved logs a warning
//! and stays inert: the handle exists, every operation on it is a no-op.

use std::cell::{Cell, OnceCell, RefCell};
use std::rc::Rc;

use glide_core::events::{EventPayload, EventRegistry, ListenerId, Outcome};
use glide_core::host::{HostTreeHandle, NodeId};
use indexmap::IndexMap;

use crate::bridge::PropertyBridge;
use crate::engine::{FieldValue, MotionEngine};
use crate::events;
use crate::options::{Options, ResolvedOptions};
use crate::plugin::{with_global_registry, Plugin, PluginDescriptor, PluginRegistry};

/// Shared handle to an orchestrator (single-threaded)
pub type OrchestratorHandle = Rc<Orchestrator>;

/// Where a surface attaches: a node id or a `#id` selector
#[derive(Clone, Debug)]
pub enum BindTarget {
    Node(NodeId),
    Selector(String),
}

impl From<NodeId> for BindTarget {
    fn from(node: NodeId) -> Self {
        BindTarget::Node(node)
    }
}

impl From<&str> for BindTarget {
    fn from(selector: &str) -> Self {
        BindTarget::Selector(selector.to_string())
    }
}

impl From<String> for BindTarget {
    fn from(selector: String) -> Self {
        BindTarget::Selector(selector)
    }
}

/// Lifecycle phase of a surface
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Construction failed; the handle is permanently inactive
    Inert,
    /// Live and accepting lifecycle operations
    Ready,
    /// Torn down; operations are warned no-ops
    Destroyed,
}

/// The wrapper/content pair a live surface is bound to
#[derive(Clone, Copy, Debug)]
struct Binding {
    wrapper: NodeId,
    content: NodeId,
}

/// Lifecycle-and-event orchestrator for one scrolling surface
pub struct Orchestrator {
    tree: HostTreeHandle,
    events: Rc<EventRegistry>,
    hooks: Rc<EventRegistry>,
    options: OnceCell<ResolvedOptions>,
    binding: Cell<Option<Binding>>,
    engine: RefCell<Option<Box<dyn MotionEngine>>>,
    plugins: RefCell<IndexMap<&'static str, Box<dyn Plugin>>>,
    bridge: OnceCell<PropertyBridge>,
    phase: Cell<Phase>,
}

/// Create a surface, applying plugins from the process-wide registry
pub fn create<E: MotionEngine + 'static>(
    tree: &HostTreeHandle,
    target: impl Into<BindTarget>,
    options: Options,
) -> OrchestratorHandle {
    // Snapshot before construction so plugin constructors may register
    // more plugins without re-entering the registry borrow.
    let descriptors = with_global_registry(|registry| registry.ordered());
    create_from_parts::<E>(tree, target.into(), options, descriptors)
}

/// Create a surface against an explicit plugin registry
pub fn create_with<E: MotionEngine + 'static>(
    tree: &HostTreeHandle,
    target: impl Into<BindTarget>,
    options: Options,
    registry: &PluginRegistry,
) -> OrchestratorHandle {
    create_from_parts::<E>(tree, target.into(), options, registry.ordered())
}

fn create_from_parts<E: MotionEngine + 'static>(
    tree: &HostTreeHandle,
    target: BindTarget,
    options: Options,
    descriptors: Vec<PluginDescriptor>,
) -> OrchestratorHandle {
    let orchestrator = Rc::new(Orchestrator {
        tree: Rc::clone(tree),
        events: Rc::new(EventRegistry::with_names(&events::public::ALL)),
        hooks: Rc::new(EventRegistry::with_names(&events::hook::ALL)),
        options: OnceCell::new(),
        binding: Cell::new(None),
        engine: RefCell::new(None),
        plugins: RefCell::new(IndexMap::new()),
        bridge: OnceCell::new(),
        phase: Cell::new(Phase::Inert),
    });
    orchestrator.init::<E>(target, options, descriptors);
    orchestrator
}

impl Orchestrator {
    fn init<E: MotionEngine + 'static>(
        self: &Rc<Self>,
        target: BindTarget,
        options: Options,
        descriptors: Vec<PluginDescriptor>,
    ) {
        let Some(wrapper) = self.resolve_target(&target) else {
            tracing::warn!("can not resolve the wrapper node; the surface stays inert");
            return;
        };

        let resolved = options.resolve();

        let content = self
            .tree
            .borrow()
            .child_at(wrapper, resolved.content_index());
        let Some(content) = content else {
            tracing::warn!(
                index = resolved.content_index(),
                "the wrapper needs a child element as content; the surface stays inert"
            );
            return;
        };

        self.binding.set(Some(Binding { wrapper, content }));
        self.tree.borrow_mut().set_managed(wrapper, true);

        let engine = E::new(Rc::clone(&self.tree), wrapper, content, &resolved);
        let engine_hooks = engine.hooks();
        *self.engine.borrow_mut() = Some(Box::new(engine));
        let _ = self.options.set(resolved.clone());
        self.phase.set(Phase::Ready);

        // Engine-driven re-measure: resize feeds back into refresh().
        let weak = Rc::downgrade(self);
        engine_hooks.on(events::engine::RESIZE, move |_payload| {
            if let Some(orchestrator) = weak.upgrade() {
                orchestrator.refresh();
            }
        });

        // Gesture events bubble to the public registry with the same
        // payload, after the engine's own listeners ran.
        for name in events::BUBBLED {
            let public = Rc::clone(&self.events);
            engine_hooks.on(name, move |payload| {
                public.trigger(name, payload);
            });
        }

        if resolved.auto_blur() {
            let tree = Rc::clone(&self.tree);
            self.events.on(events::public::BEFORE_SCROLL_START, move |_payload| {
                let mut tree = tree.borrow_mut();
                if let Some(focused) = tree.focused() {
                    if tree.is_text_entry(focused) {
                        tree.blur();
                    }
                }
            });
        }

        self.enable();

        let _ = self.bridge.set(PropertyBridge::standard());

        self.apply_plugins(&descriptors, &resolved);

        self.refresh_without_reset(content);

        // Cancellable checkpoint: hook listeners may adjust the position
        // in place or veto the initial scroll entirely.
        let mut payload = EventPayload::Point(resolved.start_position());
        let vetoed = self
            .hooks
            .trigger(events::hook::BEFORE_INITIAL_SCROLL_TO, &mut payload);
        if vetoed {
            tracing::debug!("initial scroll skipped by hook veto");
        } else if let Some(position) = payload.point() {
            if let Some(engine) = self.engine.borrow_mut().as_mut() {
                engine.scroll_to(position.x, position.y);
            }
        }
    }

    fn resolve_target(&self, target: &BindTarget) -> Option<NodeId> {
        match target {
            BindTarget::Node(node) => {
                let tree = self.tree.borrow();
                tree.contains(*node).then_some(*node)
            }
            BindTarget::Selector(selector) => match self.tree.borrow().resolve(selector) {
                Ok(node) => Some(node),
                Err(err) => {
                    tracing::warn!(%err, "wrapper selector did not resolve");
                    None
                }
            },
        }
    }

    fn apply_plugins(
        self: &Rc<Self>,
        descriptors: &[PluginDescriptor],
        options: &ResolvedOptions,
    ) {
        let handle: OrchestratorHandle = Rc::clone(self);
        for descriptor in descriptors {
            if !options.plugin_enabled(descriptor.name) {
                continue;
            }
            // Catalog entries carry no constructor; nothing to build.
            let Some(build) = descriptor.build else {
                continue;
            };
            if self.plugins.borrow().contains_key(descriptor.name) {
                tracing::warn!(
                    plugin = descriptor.name,
                    "second plugin under this name skipped"
                );
                continue;
            }
            let instance = build(&handle);
            self.plugins.borrow_mut().insert(descriptor.name, instance);
            tracing::debug!(plugin = descriptor.name, "plugin applied");
        }
    }

    /// Phase guard shared by the lifecycle operations
    fn live(&self) -> Option<Binding> {
        match self.phase.get() {
            Phase::Ready => self.binding.get(),
            Phase::Inert => None,
            Phase::Destroyed => {
                tracing::warn!("operation on a destroyed surface ignored");
                None
            }
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Re-resolve content and re-measure
    ///
    /// If the wrapper no longer has a child at the configured index the
    /// call is a strict no-op: no hook, no event, no engine call. When the
    /// resolved content element changed, `content_changed` fires (hook
    /// then public) after `refresh` and before the position reset.
    pub fn refresh(&self) {
        let Some(binding) = self.live() else {
            return;
        };
        let Some(options) = self.options.get() else {
            return;
        };

        let resolved = self
            .tree
            .borrow()
            .child_at(binding.wrapper, options.content_index());
        let Some(content) = resolved else {
            tracing::debug!("refresh skipped: no child at the configured content index");
            return;
        };

        let changed = content != binding.content;
        self.binding.set(Some(Binding {
            wrapper: binding.wrapper,
            content,
        }));

        self.refresh_without_reset(content);

        if changed {
            let mut payload = EventPayload::Content(content);
            self.hooks.trigger(events::hook::CONTENT_CHANGED, &mut payload);
            self.events
                .trigger(events::public::CONTENT_CHANGED, &mut payload);
        }

        if let Some(engine) = self.engine.borrow_mut().as_mut() {
            engine.reset_position();
        }
    }

    /// Re-measure without touching transient position state
    ///
    /// Used during initialization so the about-to-be-applied start
    /// position is not clobbered.
    pub fn refresh_without_reset(&self, content: NodeId) {
        if self.live().is_none() {
            return;
        }
        if let Some(engine) = self.engine.borrow_mut().as_mut() {
            engine.refresh(content);
        }
        let mut payload = EventPayload::Content(content);
        self.hooks.trigger(events::hook::REFRESH, &mut payload);
        self.events.trigger(events::public::REFRESH, &mut payload);
    }

    /// Start responding to input: engine first, hook, then public event
    pub fn enable(&self) {
        if self.live().is_none() {
            return;
        }
        if let Some(engine) = self.engine.borrow_mut().as_mut() {
            engine.enable();
        }
        self.hooks.emit(events::hook::ENABLE);
        self.events.emit(events::public::ENABLE);
    }

    /// Stop responding to input: engine first, hook, then public event
    pub fn disable(&self) {
        if self.live().is_none() {
            return;
        }
        if let Some(engine) = self.engine.borrow_mut().as_mut() {
            engine.disable();
        }
        self.hooks.emit(events::hook::DISABLE);
        self.events.emit(events::public::DISABLE);
    }

    /// Tear the surface down; terminal
    ///
    /// The destroy hook and event fire while the engine is still alive;
    /// the engine is torn down last.
    pub fn destroy(&self) {
        match self.phase.get() {
            Phase::Ready => {}
            Phase::Inert => return,
            Phase::Destroyed => {
                tracing::warn!("destroy on an already destroyed surface ignored");
                return;
            }
        }

        self.hooks.emit(events::hook::DESTROY);
        self.events.emit(events::public::DESTROY);

        if let Some(mut engine) = self.engine.borrow_mut().take() {
            engine.destroy();
        }
        self.plugins.borrow_mut().clear();
        self.phase.set(Phase::Destroyed);
        tracing::debug!("surface destroyed");
    }

    // =========================================================================
    // Event surface
    // =========================================================================

    /// Subscribe to a public event
    pub fn on<F, R>(&self, name: &str, listener: F) -> ListenerId
    where
        F: FnMut(&mut EventPayload) -> R + 'static,
        R: Into<Outcome>,
    {
        self.events.on(name, listener)
    }

    /// Subscribe to a public event for at most one delivery
    pub fn once<F, R>(&self, name: &str, listener: F) -> ListenerId
    where
        F: FnMut(&mut EventPayload) -> R + 'static,
        R: Into<Outcome>,
    {
        self.events.once(name, listener)
    }

    /// Remove one public listener
    pub fn off(&self, name: &str, id: ListenerId) {
        self.events.off(name, id);
    }

    /// Remove all public listeners for a name
    pub fn off_all(&self, name: &str) {
        self.events.off_all(name);
    }

    /// Trigger a public event (plugins emitting the names they registered)
    pub fn trigger(&self, name: &str, payload: &mut EventPayload) -> bool {
        self.events.trigger(name, payload)
    }

    /// Extend the public event vocabulary (plugins introducing new names)
    pub fn event_register(&self, names: &[&str]) {
        self.events.declare(names);
    }

    /// The internal hook registry, for plugins holding this handle
    pub fn hooks(&self) -> &Rc<EventRegistry> {
        &self.hooks
    }

    // =========================================================================
    // Delegated properties
    // =========================================================================

    /// Live read of a delegated engine field (`x`, `y`, `max_scroll_x`, …)
    pub fn property(&self, key: &str) -> Option<FieldValue> {
        let field = self.bridge.get()?.field_for(key)?;
        self.engine
            .borrow()
            .as_ref()
            .map(|engine| engine.field(field))
    }

    /// Forwarded write to a delegated engine field
    pub fn set_property(&self, key: &str, value: FieldValue) {
        let Some(bridge) = self.bridge.get() else {
            return;
        };
        let Some(field) = bridge.field_for(key) else {
            tracing::warn!(key, "write to unknown delegated property ignored");
            return;
        };
        if let Some(engine) = self.engine.borrow_mut().as_mut() {
            engine.set_field(field, value);
        }
    }

    // =========================================================================
    // State
    // =========================================================================

    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    pub fn is_ready(&self) -> bool {
        self.phase.get() == Phase::Ready
    }

    /// The wrapper node, when the surface is bound
    pub fn wrapper(&self) -> Option<NodeId> {
        self.binding.get().map(|b| b.wrapper)
    }

    /// The current content node, when the surface is bound
    pub fn content(&self) -> Option<NodeId> {
        self.binding.get().map(|b| b.content)
    }

    /// The resolved configuration, once initialization passed
    pub fn options(&self) -> Option<&ResolvedOptions> {
        self.options.get()
    }

    /// The host tree this surface is bound against
    pub fn tree(&self) -> &HostTreeHandle {
        &self.tree
    }

    // =========================================================================
    // Plugins
    // =========================================================================

    /// Whether a plugin was instantiated for this surface
    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.borrow().contains_key(name)
    }

    /// Names of the instantiated plugins, in application order
    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.borrow().keys().copied().collect()
    }

    /// Look a plugin up by name for a capability downcast
    pub fn with_plugin<R>(&self, name: &str, f: impl FnOnce(&dyn Plugin) -> R) -> Option<R> {
        let plugins = self.plugins.borrow();
        plugins.get(name).map(|plugin| f(plugin.as_ref()))
    }
}
