//! Declared-vocabulary synchronous event registry
//!
//! A registry is created with (or later taught) the set of event names it
//! accepts. Listeners for one name fire strictly in registration order;
//! `once` listeners fire at most one time. Triggering returns whether any
//! listener asked to stop, which callers use as a cancellation checkpoint.
//!
//! Listeners receive the trigger payload by `&mut`, so a payload mutated by
//! one listener is seen by the next — and by any registry the event is
//! forwarded to.
//!
//! # Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use glide_core::events::EventRegistry;
//!
//! let registry = EventRegistry::with_names(&["scroll"]);
//!
//! let seen = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&seen);
//! registry.on("scroll", move |_payload| {
//!     counter.set(counter.get() + 1);
//! });
//!
//! let vetoed = registry.emit("scroll");
//! assert!(!vetoed);
//! assert_eq!(seen.get(), 1);
//! ```

use std::cell::{Cell, RefCell};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::host::NodeId;

/// A point in surface coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Payload carried by a trigger
///
/// Passed to every listener by `&mut`; mutations are visible to listeners
/// that run later in the same trigger and to forwarded registries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EventPayload {
    /// No payload
    None,
    /// A (possibly listener-adjusted) coordinate pair
    Point(Point),
    /// A host node, e.g. the content element of a refresh
    Content(NodeId),
}

impl EventPayload {
    pub fn point(&self) -> Option<Point> {
        match self {
            EventPayload::Point(p) => Some(*p),
            _ => None,
        }
    }

    pub fn point_mut(&mut self) -> Option<&mut Point> {
        match self {
            EventPayload::Point(p) => Some(p),
            _ => None,
        }
    }

    pub fn content(&self) -> Option<NodeId> {
        match self {
            EventPayload::Content(n) => Some(*n),
            _ => None,
        }
    }
}

/// What a listener asks the trigger to do
///
/// The trigger never short-circuits: every listener runs, and `Stop` from
/// any of them makes the trigger report a veto afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Outcome {
    /// Keep going (the default; plain `()`-returning listeners mean this)
    #[default]
    Continue,
    /// Ask the caller to cancel whatever the trigger was a checkpoint for
    Stop,
}

impl From<()> for Outcome {
    fn from(_: ()) -> Self {
        Outcome::Continue
    }
}

/// Handle to a registered listener, used for removal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type BoxedListener = Box<dyn FnMut(&mut EventPayload) -> Outcome>;

/// One registered listener
///
/// The callback sits behind an `Rc<RefCell<_>>` so a trigger can snapshot
/// the list and keep invoking even if a listener mutates the registry.
struct Entry {
    id: ListenerId,
    once: bool,
    call: Rc<RefCell<BoxedListener>>,
}

impl Clone for Entry {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            once: self.once,
            call: Rc::clone(&self.call),
        }
    }
}

/// Synchronous pub/sub over a declared set of event names
///
/// Uses interior mutability throughout: registration and triggering take
/// `&self`, so registries can be shared via `Rc` between the layers that
/// emit and the layers that listen. Single-threaded by construction.
pub struct EventRegistry {
    known: RefCell<FxHashSet<String>>,
    listeners: RefCell<FxHashMap<String, SmallVec<[Entry; 2]>>>,
    next_id: Cell<u64>,
}

impl EventRegistry {
    /// Create a registry with an empty vocabulary
    pub fn new() -> Self {
        Self {
            known: RefCell::new(FxHashSet::default()),
            listeners: RefCell::new(FxHashMap::default()),
            next_id: Cell::new(1),
        }
    }

    /// Create a registry accepting the given names
    pub fn with_names(names: &[&str]) -> Self {
        let registry = Self::new();
        registry.declare(names);
        registry
    }

    /// Extend the legal vocabulary
    pub fn declare(&self, names: &[&str]) {
        let mut known = self.known.borrow_mut();
        for name in names {
            known.insert((*name).to_string());
        }
    }

    /// Whether a name is part of the vocabulary
    pub fn is_declared(&self, name: &str) -> bool {
        self.known.borrow().contains(name)
    }

    /// Register a listener; invoked in registration order on each trigger
    ///
    /// The listener may return `()` (keep going) or an [`Outcome`].
    /// Registering against an undeclared name logs a warning and is a
    /// no-op; the returned id is inert.
    pub fn on<F, R>(&self, name: &str, listener: F) -> ListenerId
    where
        F: FnMut(&mut EventPayload) -> R + 'static,
        R: Into<Outcome>,
    {
        self.insert(name, listener, false)
    }

    /// Register a listener that fires at most once
    ///
    /// The listener is removed from the live list before it runs, so later
    /// listeners of the same trigger (and reentrant triggers) never see it
    /// fire again.
    pub fn once<F, R>(&self, name: &str, listener: F) -> ListenerId
    where
        F: FnMut(&mut EventPayload) -> R + 'static,
        R: Into<Outcome>,
    {
        self.insert(name, listener, true)
    }

    fn insert<F, R>(&self, name: &str, mut listener: F, once: bool) -> ListenerId
    where
        F: FnMut(&mut EventPayload) -> R + 'static,
        R: Into<Outcome>,
    {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);

        if !self.is_declared(name) {
            tracing::warn!(event = name, "listener for undeclared event ignored");
            return id;
        }

        let boxed: BoxedListener = Box::new(move |payload| listener(payload).into());
        self.listeners
            .borrow_mut()
            .entry(name.to_string())
            .or_default()
            .push(Entry {
                id,
                once,
                call: Rc::new(RefCell::new(boxed)),
            });
        id
    }

    /// Remove one listener by id
    pub fn off(&self, name: &str, id: ListenerId) {
        if let Some(list) = self.listeners.borrow_mut().get_mut(name) {
            list.retain(|e| e.id != id);
        }
    }

    /// Remove all listeners for a name
    pub fn off_all(&self, name: &str) {
        self.listeners.borrow_mut().remove(name);
    }

    /// Number of live listeners for a name
    pub fn listener_count(&self, name: &str) -> usize {
        self.listeners
            .borrow()
            .get(name)
            .map(|l| l.len())
            .unwrap_or(0)
    }

    /// Trigger with no payload
    pub fn emit(&self, name: &str) -> bool {
        self.trigger(name, &mut EventPayload::None)
    }

    /// Invoke every listener for `name` in order; returns true if any
    /// listener returned [`Outcome::Stop`]
    ///
    /// The stop result aggregates after all listeners ran; it never
    /// short-circuits delivery. A panicking listener is isolated: the
    /// panic surfaces through the default panic hook, gets logged, and the
    /// remaining listeners still run. Triggering an undeclared name logs a
    /// warning and reports no veto.
    pub fn trigger(&self, name: &str, payload: &mut EventPayload) -> bool {
        if !self.is_declared(name) {
            tracing::warn!(event = name, "trigger of undeclared event ignored");
            return false;
        }

        // Snapshot so listeners can register/remove/trigger reentrantly.
        // Once-listeners leave the live list before anything runs.
        let snapshot: Vec<Entry> = {
            let mut listeners = self.listeners.borrow_mut();
            let Some(list) = listeners.get_mut(name) else {
                return false;
            };
            let snapshot = list.iter().cloned().collect();
            list.retain(|e| !e.once);
            snapshot
        };

        let mut vetoed = false;
        for entry in snapshot {
            let call = Rc::clone(&entry.call);
            let result = {
                let p = &mut *payload;
                catch_unwind(AssertUnwindSafe(move || {
                    let mut listener = call.borrow_mut();
                    (&mut **listener)(p)
                }))
            };
            match result {
                Ok(Outcome::Stop) => vetoed = true,
                Ok(Outcome::Continue) => {}
                Err(_) => {
                    tracing::error!(event = name, "listener panicked; remaining listeners still run");
                }
            }
        }
        vetoed
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_registry(name: &'static str) -> (EventRegistry, Rc<RefCell<Vec<&'static str>>>) {
        let registry = EventRegistry::with_names(&[name]);
        (registry, Rc::new(RefCell::new(Vec::new())))
    }

    #[test]
    fn test_listeners_fire_in_registration_order() {
        let (registry, log) = recording_registry("scroll");

        for label in ["first", "second", "third"] {
            let log = Rc::clone(&log);
            registry.on("scroll", move |_| {
                log.borrow_mut().push(label);
            });
        }

        registry.emit("scroll");
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_once_fires_at_most_once() {
        let (registry, log) = recording_registry("scroll");

        let once_log = Rc::clone(&log);
        registry.once("scroll", move |_| {
            once_log.borrow_mut().push("once");
        });
        let on_log = Rc::clone(&log);
        registry.on("scroll", move |_| {
            on_log.borrow_mut().push("always");
        });

        registry.emit("scroll");
        registry.emit("scroll");
        registry.emit("scroll");

        assert_eq!(*log.borrow(), vec!["once", "always", "always", "always"]);
    }

    #[test]
    fn test_off_removes_one_listener() {
        let (registry, log) = recording_registry("scroll");

        let keep_log = Rc::clone(&log);
        registry.on("scroll", move |_| {
            keep_log.borrow_mut().push("keep");
        });
        let drop_log = Rc::clone(&log);
        let dropped = registry.on("scroll", move |_| {
            drop_log.borrow_mut().push("drop");
        });

        registry.off("scroll", dropped);
        registry.emit("scroll");

        assert_eq!(*log.borrow(), vec!["keep"]);
    }

    #[test]
    fn test_off_all_clears_listeners() {
        let (registry, log) = recording_registry("scroll");
        let l = Rc::clone(&log);
        registry.on("scroll", move |_| {
            l.borrow_mut().push("x");
        });

        registry.off_all("scroll");
        registry.emit("scroll");

        assert!(log.borrow().is_empty());
        assert_eq!(registry.listener_count("scroll"), 0);
    }

    #[test]
    fn test_stop_aggregates_without_short_circuit() {
        let (registry, log) = recording_registry("checkpoint");

        let first = Rc::clone(&log);
        registry.on("checkpoint", move |_| {
            first.borrow_mut().push("first");
            Outcome::Stop
        });
        let second = Rc::clone(&log);
        registry.on("checkpoint", move |_| {
            second.borrow_mut().push("second");
        });

        let vetoed = registry.emit("checkpoint");

        assert!(vetoed);
        // The listener after the Stop still ran.
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_payload_mutation_visible_to_later_listeners() {
        let registry = EventRegistry::with_names(&["position"]);

        registry.on("position", |payload| {
            if let Some(p) = payload.point_mut() {
                p.x += 10.0;
            }
        });
        let seen = Rc::new(Cell::new(0.0));
        let out = Rc::clone(&seen);
        registry.on("position", move |payload| {
            out.set(payload.point().map(|p| p.x).unwrap_or(f64::NAN));
        });

        let mut payload = EventPayload::Point(Point::new(5.0, 0.0));
        registry.trigger("position", &mut payload);

        assert_eq!(seen.get(), 15.0);
        assert_eq!(payload.point(), Some(Point::new(15.0, 0.0)));
    }

    #[test]
    fn test_undeclared_name_is_noop() {
        let (registry, log) = recording_registry("scroll");

        let l = Rc::clone(&log);
        registry.on("unknown", move |_| {
            l.borrow_mut().push("never");
        });
        let vetoed = registry.emit("unknown");

        assert!(!vetoed);
        assert!(log.borrow().is_empty());
        assert_eq!(registry.listener_count("unknown"), 0);
        // The declared vocabulary is untouched.
        assert!(registry.is_declared("scroll"));
        assert!(!registry.is_declared("unknown"));
    }

    #[test]
    fn test_declare_extends_vocabulary() {
        let registry = EventRegistry::with_names(&["a"]);
        assert!(!registry.is_declared("b"));

        registry.declare(&["b"]);
        assert!(registry.is_declared("b"));

        let fired = Rc::new(Cell::new(false));
        let f = Rc::clone(&fired);
        registry.on("b", move |_| f.set(true));
        registry.emit("b");
        assert!(fired.get());
    }

    #[test]
    fn test_panicking_listener_does_not_starve_siblings() {
        let (registry, log) = recording_registry("scroll");

        registry.on::<_, ()>("scroll", |_| {
            panic!("listener failure");
        });
        let l = Rc::clone(&log);
        registry.on("scroll", move |_| {
            l.borrow_mut().push("survivor");
        });

        let vetoed = registry.emit("scroll");

        assert!(!vetoed);
        assert_eq!(*log.borrow(), vec!["survivor"]);
    }

    #[test]
    fn test_listener_registering_during_trigger_does_not_fire_same_trigger() {
        let registry = Rc::new(EventRegistry::with_names(&["scroll"]));
        let log = Rc::new(RefCell::new(Vec::new()));

        let reg = Rc::clone(&registry);
        let outer_log = Rc::clone(&log);
        registry.on("scroll", move |_| {
            outer_log.borrow_mut().push("outer");
            let inner_log = Rc::clone(&outer_log);
            reg.on("scroll", move |_| {
                inner_log.borrow_mut().push("inner");
            });
        });

        registry.emit("scroll");
        assert_eq!(*log.borrow(), vec!["outer"]);

        registry.emit("scroll");
        assert_eq!(*log.borrow(), vec!["outer", "outer", "inner"]);
    }
}
