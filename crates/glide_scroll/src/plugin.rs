//! Plugin registration and ordering
//!
//! Plugins extend a surface without the orchestrator knowing their
//! internals. A [`PluginDescriptor`] names the plugin, carries an ordering
//! hint, and (usually) a constructor. Descriptors accumulate in a
//! [`PluginRegistry`]; each surface applies the registry at construction,
//! instantiating only the plugins its options activate.
//!
//! The process-wide default registry is what [`register_plugin`] feeds and
//! what [`create`](crate::create) applies. It is an ordinary value, not
//! compiler magic: tests build their own [`PluginRegistry`] and hand it to
//! [`create_with`](crate::create_with).
//!
//! # Ordering
//!
//! Application order is a stable three-bucket sort: [`PluginOrder::Pre`]
//! before [`PluginOrder::Unordered`] before [`PluginOrder::Post`], ties
//! within a bucket keeping registration order. Registration order across
//! independently loaded plugin modules is unspecified, so a plugin that
//! must wrap others declares a bucket instead of racing to register first.

use std::any::Any;
use std::cell::RefCell;

use rustc_hash::FxHashSet;

use crate::orchestrator::OrchestratorHandle;

/// A plugin instance owned by one surface
///
/// Cross-cutting capabilities a plugin exposes are reached by looking the
/// plugin up by name and downcasting through `as_any`, not by injecting
/// fields onto the orchestrator.
pub trait Plugin: 'static {
    /// The concrete type, for capability downcasts
    fn as_any(&self) -> &dyn Any;
}

/// Constructs a plugin instance for one surface
pub type PluginCtor = fn(&OrchestratorHandle) -> Box<dyn Plugin>;

/// When a plugin is applied relative to unordered plugins
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PluginOrder {
    /// Apply before unordered plugins
    Pre,
    /// No preference
    #[default]
    Unordered,
    /// Apply after unordered plugins
    Post,
}

impl PluginOrder {
    fn bucket(self) -> u8 {
        match self {
            PluginOrder::Pre => 0,
            PluginOrder::Unordered => 1,
            PluginOrder::Post => 2,
        }
    }
}

/// A registered plugin: name, ordering hint, constructor
///
/// Identity is the constructor. A descriptor without a constructor is a
/// catalog entry: it registers and lists, but application skips it
/// silently.
#[derive(Clone, Copy, Debug)]
pub struct PluginDescriptor {
    pub name: &'static str,
    pub order: PluginOrder,
    pub build: Option<PluginCtor>,
}

impl PluginDescriptor {
    pub fn new(name: &'static str, build: PluginCtor) -> Self {
        Self {
            name,
            order: PluginOrder::Unordered,
            build: Some(build),
        }
    }

    /// A constructor-less catalog entry
    pub fn declaration(name: &'static str) -> Self {
        Self {
            name,
            order: PluginOrder::Unordered,
            build: None,
        }
    }

    pub fn with_order(mut self, order: PluginOrder) -> Self {
        self.order = order;
        self
    }

    fn same_identity(&self, other: &PluginDescriptor) -> bool {
        match (self.build, other.build) {
            (Some(a), Some(b)) => a as usize == b as usize,
            (None, None) => self.name == other.name,
            _ => false,
        }
    }
}

/// Append-only, insertion-ordered list of plugin descriptors
pub struct PluginRegistry {
    entries: Vec<PluginDescriptor>,
    names: FxHashSet<&'static str>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            names: FxHashSet::default(),
        }
    }

    /// Register a descriptor; chainable
    ///
    /// Re-registering the same constructor is a no-op. A descriptor with
    /// an empty name warns and is skipped.
    pub fn register(&mut self, descriptor: PluginDescriptor) -> &mut Self {
        if descriptor.name.is_empty() {
            tracing::warn!("plugin registered without a name; skipped");
            return self;
        }
        if self.entries.iter().any(|e| e.same_identity(&descriptor)) {
            return self;
        }
        tracing::debug!(plugin = descriptor.name, "plugin registered");
        self.names.insert(descriptor.name);
        self.entries.push(descriptor);
        self
    }

    /// Whether any descriptor with this name is registered
    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Descriptors in application order (stable bucket sort)
    pub fn ordered(&self) -> Vec<PluginDescriptor> {
        let mut entries = self.entries.clone();
        entries.sort_by_key(|e| e.order.bucket());
        entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &PluginDescriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    static GLOBAL: RefCell<PluginRegistry> = RefCell::new(PluginRegistry::new());
}

/// Run a closure against the process-wide default registry
///
/// The registry stays borrowed for the duration of `f`; do not call back
/// into the global registry from inside it.
pub fn with_global_registry<R>(f: impl FnOnce(&mut PluginRegistry) -> R) -> R {
    GLOBAL.with(|registry| f(&mut registry.borrow_mut()))
}

/// Chaining handle over the process-wide default registry
#[derive(Clone, Copy, Debug)]
pub struct GlobalRegistry;

impl GlobalRegistry {
    /// Register a descriptor in the default registry; chainable
    pub fn register(self, descriptor: PluginDescriptor) -> Self {
        with_global_registry(|registry| {
            registry.register(descriptor);
        });
        self
    }
}

/// Register a plugin in the process-wide default registry
///
/// Idempotent per constructor; returns a handle for chained registration:
///
/// ```ignore
/// register_plugin(wheel_descriptor()).register(pull_up_descriptor());
/// ```
pub fn register_plugin(descriptor: PluginDescriptor) -> GlobalRegistry {
    GlobalRegistry.register(descriptor)
}
