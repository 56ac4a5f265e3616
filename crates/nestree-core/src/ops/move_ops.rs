use crate::config::EngineConfig;
use crate::errors::{OperationError, Result};
use crate::model::TreeState;
use crate::order::allocate_order_key;
use crate::rules::invariants::{
    check_cycle_free, check_move_valid, check_node_exists, check_order_keys_strict,
    check_parent_exists,
};

use super::placement::{attach, detach, renumber};

/// Move a node (with its subtree) to the end of another parent's children
///
/// See [`move_node_to_with`].
pub fn move_node(state: &TreeState, node_id: &str, parent_id: &str) -> Result<TreeState> {
    move_node_to_with(state, node_id, parent_id, None, &EngineConfig::default())
}

/// Move a node under `parent_id`, appending it after the current children
pub fn move_node_with(
    state: &TreeState,
    node_id: &str,
    parent_id: &str,
    config: &EngineConfig,
) -> Result<TreeState> {
    move_node_to_with(state, node_id, parent_id, None, config)
}

/// Move a node under `parent_id`, optionally at a given index
///
/// See [`move_node_to_with`].
pub fn move_node_to(
    state: &TreeState,
    node_id: &str,
    parent_id: &str,
    target_index: Option<usize>,
) -> Result<TreeState> {
    move_node_to_with(state, node_id, parent_id, target_index, &EngineConfig::default())
}

/// Move a node and its subtree to a new parent
///
/// With no `target_index` the node is appended (gap-allocated key). With an
/// index it is inserted at that position, clamped to the list length, and the
/// destination list is renumbered. Moving within the same parent is allowed.
///
/// # Arguments
/// * `state` - Snapshot to move within (left untouched)
/// * `node_id` - ID of the node to move
/// * `parent_id` - ID of the destination parent
/// * `target_index` - Optional position among the destination's children
/// * `config` - Order-key allocation parameters
///
/// # Errors
/// * `InvalidMove` - If the node would parent itself or an endpoint is missing
/// * `CycleDetected` - If the destination lies inside the node's subtree
/// * `InvalidOrderSequence` - If a touched list ends up out of order
pub fn move_node_to_with(
    state: &TreeState,
    node_id: &str,
    parent_id: &str,
    target_index: Option<usize>,
    config: &EngineConfig,
) -> Result<TreeState> {
    let (node, _) = check_move_valid(state, node_id, parent_id)?;
    let old_parent_id = node.parent_id.clone();

    let mut next = state.clone();
    if let Some(old) = old_parent_id.as_deref() {
        detach(&mut next, old, node_id);
    }

    let mut moving = node.clone();
    match target_index {
        None => {
            moving.order_key.clear();
            let allocation = allocate_order_key(&next, parent_id, &moving, config)?;
            attach(&mut next, parent_id, moving, allocation);
        }
        Some(index) => {
            let mut children = next.child_ids(parent_id).to_vec();
            children.insert(index.min(children.len()), node_id.to_string());
            moving.parent_id = Some(parent_id.to_string());
            next.put_node(moving);
            renumber(&mut next, parent_id, children, config);
        }
    }

    check_order_keys_strict(&next, parent_id)?;
    if let Some(old) = old_parent_id.as_deref().filter(|old| *old != parent_id) {
        check_order_keys_strict(&next, old)?;
    }
    check_cycle_free(&next, node_id)?;

    Ok(next)
}

/// Move a node to `new_index` among its siblings
///
/// See [`reorder_sibling_with`].
pub fn reorder_sibling(state: &TreeState, node_id: &str, new_index: usize) -> Result<TreeState> {
    reorder_sibling_with(state, node_id, new_index, &EngineConfig::default())
}

/// Move a node to `new_index` among its siblings and renumber the list
///
/// The index is clamped to the list length after the node is taken out,
/// so an oversized index moves the node to the end. Every sibling gets a
/// fresh key spaced `order_gap` apart.
///
/// # Errors
/// * `NodeNotFound` - If the node doesn't exist
/// * `ParentNotFound` - If the node is the root or its parent is missing
/// * `InvalidOrderSequence` - If the renumbered list is out of order
pub fn reorder_sibling_with(
    state: &TreeState,
    node_id: &str,
    new_index: usize,
    config: &EngineConfig,
) -> Result<TreeState> {
    check_node_exists(state, node_id)?;
    let parent = check_parent_exists(state, node_id)?;

    let mut children: Vec<String> = state
        .child_ids(&parent.id)
        .iter()
        .filter(|id| id.as_str() != node_id)
        .cloned()
        .collect();
    if children.len() == state.child_ids(&parent.id).len() {
        return Err(OperationError::ParentNotFound {
            node_id: node_id.to_string(),
        });
    }
    children.insert(new_index.min(children.len()), node_id.to_string());

    let mut next = state.clone();
    renumber(&mut next, &parent.id, children, config);
    check_order_keys_strict(&next, &parent.id)?;

    Ok(next)
}
