//! Retained host-element tree
//!
//! A minimal element tree the scrolling surface binds against. It models
//! just what the orchestration layer needs from a host environment: typed
//! nodes with parent/child links, `#id` selector lookup, a focus pointer,
//! and a per-node flag marking a wrapper as managed by a surface.
//!
//! Layout and measurement live entirely in the motion engine; this tree
//! stores structure, not geometry.
//!
//! # Example
//!
//! ```rust
//! use glide_core::host::{HostTree, NodeKind};
//!
//! let mut tree = HostTree::new();
//! let wrapper = tree.spawn_with_id(NodeKind::Container, "viewport");
//! let content = tree.spawn(NodeKind::Container);
//! tree.append_child(wrapper, content);
//!
//! assert_eq!(tree.resolve("#viewport"), Ok(wrapper));
//! assert_eq!(tree.child_at(wrapper, 0), Some(content));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::error::HostError;

new_key_type! {
    /// Unique identifier for a host node
    pub struct NodeId;
}

/// What kind of element a node represents
///
/// Only the distinctions the orchestration layer acts on are modeled;
/// anything else is a plain `Container`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Generic block container
    Container,
    /// Static text
    Text,
    /// Single-line text entry
    TextInput,
    /// Multi-line text entry
    TextArea,
}

impl NodeKind {
    /// Whether this node accepts keyboard text entry (and therefore focus
    /// worth clearing before a scroll gesture)
    pub fn is_text_entry(self) -> bool {
        matches!(self, NodeKind::TextInput | NodeKind::TextArea)
    }
}

/// Internal node storage
struct HostNode {
    kind: NodeKind,
    element_id: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Set by an orchestrator on the wrapper it binds to
    managed: bool,
}

/// Shared handle to a host tree (single-threaded)
pub type HostTreeHandle = Rc<RefCell<HostTree>>;

/// The retained element tree
pub struct HostTree {
    nodes: SlotMap<NodeId, HostNode>,
    ids: FxHashMap<String, NodeId>,
    focused: Option<NodeId>,
}

impl HostTree {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            ids: FxHashMap::default(),
            focused: None,
        }
    }

    /// Create a shared handle around a fresh tree
    pub fn shared() -> HostTreeHandle {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Create a new detached node
    pub fn spawn(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.insert(HostNode {
            kind,
            element_id: None,
            parent: None,
            children: Vec::new(),
            managed: false,
        })
    }

    /// Create a new detached node with an element id (addressable as `#id`)
    pub fn spawn_with_id(&mut self, kind: NodeKind, id: &str) -> NodeId {
        let node = self.spawn(kind);
        if let Some(n) = self.nodes.get_mut(node) {
            n.element_id = Some(id.to_string());
        }
        self.ids.insert(id.to_string(), node);
        node
    }

    /// Append `child` as the last child of `parent`
    ///
    /// Detaches the child from its previous parent first. Missing nodes
    /// make this a no-op.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return;
        }
        self.detach(child);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    /// Remove `child` from its parent's child list, keeping the node alive
    pub fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.nodes.get(child).and_then(|n| n.parent) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.retain(|c| *c != child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = None;
        }
    }

    /// Remove a node and its subtree from the tree
    pub fn remove(&mut self, node: NodeId) {
        self.detach(node);
        self.remove_subtree(node);
    }

    fn remove_subtree(&mut self, node: NodeId) {
        let children = self.children(node);
        for child in children {
            self.remove_subtree(child);
        }
        if let Some(n) = self.nodes.remove(node) {
            if let Some(id) = n.element_id {
                self.ids.remove(&id);
            }
        }
        if self.focused == Some(node) {
            self.focused = None;
        }
    }

    /// Children of a node, in order
    pub fn children(&self, parent: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(parent)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// The child at `index`, if present
    pub fn child_at(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.nodes
            .get(parent)
            .and_then(|n| n.children.get(index).copied())
    }

    /// Number of children of a node
    pub fn child_count(&self, parent: NodeId) -> usize {
        self.nodes.get(parent).map(|n| n.children.len()).unwrap_or(0)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    pub fn kind(&self, node: NodeId) -> Option<NodeKind> {
        self.nodes.get(node).map(|n| n.kind)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    /// Resolve a selector to a node
    ///
    /// Only `#id` selectors are supported.
    pub fn resolve(&self, selector: &str) -> Result<NodeId, HostError> {
        let Some(id) = selector.strip_prefix('#') else {
            return Err(HostError::UnsupportedSelector(selector.to_string()));
        };
        self.ids
            .get(id)
            .copied()
            .ok_or_else(|| HostError::NoMatch(selector.to_string()))
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// The currently focused node
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Move focus to a node (or clear it with `None`)
    pub fn set_focus(&mut self, node: Option<NodeId>) {
        match node {
            Some(n) if self.nodes.contains_key(n) => self.focused = Some(n),
            Some(_) => {}
            None => self.focused = None,
        }
    }

    /// Clear focus
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Whether a node accepts keyboard text entry
    pub fn is_text_entry(&self, node: NodeId) -> bool {
        self.kind(node).is_some_and(NodeKind::is_text_entry)
    }

    // =========================================================================
    // Managed flag
    // =========================================================================

    /// Mark or unmark a node as managed by a scrolling surface
    pub fn set_managed(&mut self, node: NodeId, managed: bool) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.managed = managed;
        }
    }

    /// Whether a surface already manages this node
    pub fn is_managed(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|n| n.managed)
    }
}

impl Default for HostTree {
    fn default() -> Self {
        Self::new()
    }
}
