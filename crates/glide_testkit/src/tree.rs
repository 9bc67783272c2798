//! Host-tree fixtures

use glide_core::host::{HostTree, HostTreeHandle, NodeId, NodeKind};

/// A wrapper (addressable as `#viewport`) with `children` container
/// children
pub fn surface_tree(children: usize) -> (HostTreeHandle, NodeId) {
    let tree = HostTree::shared();
    let wrapper = {
        let mut tree = tree.borrow_mut();
        let wrapper = tree.spawn_with_id(NodeKind::Container, "viewport");
        for _ in 0..children {
            let child = tree.spawn(NodeKind::Container);
            tree.append_child(wrapper, child);
        }
        wrapper
    };
    (tree, wrapper)
}

/// A one-child surface tree plus a detached, focused text input
pub fn surface_tree_with_focused_input() -> (HostTreeHandle, NodeId, NodeId) {
    let (tree, wrapper) = surface_tree(1);
    let input = {
        let mut tree = tree.borrow_mut();
        let input = tree.spawn(NodeKind::TextInput);
        tree.set_focus(Some(input));
        input
    };
    (tree, wrapper, input)
}
