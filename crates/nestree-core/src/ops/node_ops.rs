use crate::config::EngineConfig;
use crate::errors::{OperationError, Result};
use crate::model::{Node, TreeState};
use crate::order::allocate_order_key;
use crate::queries::subtree_ids;
use crate::rules::invariants::{
    check_children_consistent, check_node_exists, check_node_unique, check_node_valid,
    check_order_keys_strict, check_update_valid,
};

use super::placement::{attach, detach};

/// Insert `node` as a child of `parent_id` using the default engine config
///
/// See [`insert_node_with`].
pub fn insert_node(state: &TreeState, parent_id: &str, node: Node) -> Result<TreeState> {
    insert_node_with(state, parent_id, node, &EngineConfig::default())
}

/// Insert `node` as a child of `parent_id`
///
/// A blank `order_key` appends the node after all current siblings; a
/// numeric one asks for a position, and the final key is chosen by the
/// order-key allocator (renumbering siblings if the gap is exhausted).
/// The incoming `parent_id` field is ignored.
///
/// # Arguments
/// * `state` - Snapshot to insert into (left untouched)
/// * `parent_id` - ID of the new node's parent
/// * `node` - The node to insert
/// * `config` - Order-key allocation parameters
///
/// # Errors
/// * `InvalidNode` - If the node id is empty
/// * `DuplicateNode` - If the node id is already present
/// * `NodeNotFound` - If the parent doesn't exist
/// * `InvalidOrderKey` - If the requested key is not an integer
/// * `InvalidOrderSequence` - If the parent's list ends up out of order
pub fn insert_node_with(
    state: &TreeState,
    parent_id: &str,
    node: Node,
    config: &EngineConfig,
) -> Result<TreeState> {
    check_node_valid(&node)?;
    check_node_unique(state, &node)?;
    check_node_exists(state, parent_id)?;
    check_children_consistent(state, parent_id)?;

    let allocation = allocate_order_key(state, parent_id, &node, config)?;
    let node_id = node.id.clone();

    let mut next = state.clone();
    attach(&mut next, parent_id, node, allocation);
    if !next.children_by_id().contains_key(&node_id) {
        next.put_children(&node_id, Vec::new());
    }

    check_order_keys_strict(&next, parent_id)?;

    Ok(next)
}

/// Replace the non-structural fields of a node
///
/// The payload must carry the stored `id`, `parent_id` and `order_key`
/// unchanged; only `name` is taken from it. Children lists are not touched.
///
/// # Errors
/// * `InvalidNode` - If the payload id is empty
/// * `NodeNotFound` - If `node_id` doesn't exist
/// * `InvalidUpdate` - If the payload changes a structural field
pub fn update_node(state: &TreeState, node_id: &str, node: Node) -> Result<TreeState> {
    check_node_valid(&node)?;
    let existing = check_update_valid(state, node_id, &node)?;

    let merged = Node {
        name: node.name,
        ..existing.clone()
    };

    let mut next = state.clone();
    next.put_node(merged);
    Ok(next)
}

/// Delete a node together with its entire subtree
///
/// Every member of the subtree is removed from both maps and the node is
/// dropped from its parent's children list. Children are never promoted.
///
/// # Errors
/// * `NodeNotFound` - If the node doesn't exist
/// * `InvalidNode` - If the node is the root
/// * `InvalidOrderSequence` - If the parent's remaining list is out of order
pub fn delete_node(state: &TreeState, node_id: &str) -> Result<TreeState> {
    let node = check_node_exists(state, node_id)?;
    if node.id == state.root_id() {
        return Err(OperationError::InvalidNode { node: node.clone() });
    }

    let mut next = state.clone();
    for id in subtree_ids(state, node_id) {
        next.take_node(&id);
        next.take_children(&id);
    }

    if let Some(parent_id) = node.parent_id.as_deref() {
        detach(&mut next, parent_id, node_id);
        check_order_keys_strict(&next, parent_id)?;
    }

    Ok(next)
}
