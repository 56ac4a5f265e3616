//! Sibling-list edits shared by insert and move
//!
//! These helpers write into a working copy of a snapshot; callers
//! re-validate the touched lists before returning it.

use crate::config::EngineConfig;
use crate::model::{Node, TreeState};
use crate::order::{normalized_keys, Allocation};

/// Place `node` under `parent_id` according to an allocation
///
/// Sets the node's parent link and key, writes it, and rebuilds the
/// parent's children list (renumbering siblings when the allocation did).
pub(crate) fn attach(state: &mut TreeState, parent_id: &str, mut node: Node, allocation: Allocation) {
    node.parent_id = Some(parent_id.to_string());
    node.order_key = allocation.order_key;

    let children = match allocation.renormalized {
        Some(keys) => {
            for (id, key) in &keys {
                if *id != node.id {
                    state.set_order_key(id, key.clone());
                }
            }
            keys.into_iter().map(|(id, _)| id).collect()
        }
        None => {
            let mut children = state.child_ids(parent_id).to_vec();
            let position = allocation.position.min(children.len());
            children.insert(position, node.id.clone());
            children
        }
    };

    state.put_node(node);
    state.put_children(parent_id, children);
}

/// Remove `node_id` from its parent's children list, if the list exists
pub(crate) fn detach(state: &mut TreeState, parent_id: &str, node_id: &str) {
    if let Some(mut children) = state.take_children(parent_id) {
        children.retain(|id| id != node_id);
        state.put_children(parent_id, children);
    }
}

/// Install `children` as the parent's list and renumber it from zero
pub(crate) fn renumber(
    state: &mut TreeState,
    parent_id: &str,
    children: Vec<String>,
    config: &EngineConfig,
) {
    for (id, key) in normalized_keys(&children, config) {
        state.set_order_key(&id, key);
    }
    state.put_children(parent_id, children);
}
