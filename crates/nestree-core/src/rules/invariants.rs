use std::collections::HashSet;

use crate::errors::{OperationError, Result};
use crate::model::{Node, TreeState};
use crate::order::parse_order_key;
use crate::queries::{find_subtree, path_to_root};

/// Check that a node payload has a non-empty id
pub fn check_node_valid(node: &Node) -> Result<&Node> {
    if node.id.is_empty() {
        return Err(OperationError::InvalidNode { node: node.clone() });
    }
    Ok(node)
}

/// Check that no node with this id is already in the tree
pub fn check_node_unique<'a>(state: &TreeState, node: &'a Node) -> Result<&'a Node> {
    if state.contains(&node.id) {
        return Err(OperationError::DuplicateNode {
            node_id: node.id.clone(),
        });
    }
    Ok(node)
}

/// Resolve a node id, failing with `NodeNotFound`
pub fn check_node_exists<'a>(state: &'a TreeState, node_id: &str) -> Result<&'a Node> {
    state
        .node(node_id)
        .ok_or_else(|| OperationError::NodeNotFound {
            node_id: node_id.to_string(),
        })
}

/// Resolve the parent of an existing node
///
/// Returns `NodeNotFound` for an unknown node and `ParentNotFound` when the
/// node has no parent link or the link dangles.
pub fn check_parent_exists<'a>(state: &'a TreeState, node_id: &str) -> Result<&'a Node> {
    let node = check_node_exists(state, node_id)?;
    node.parent_id
        .as_deref()
        .and_then(|parent_id| state.node(parent_id))
        .ok_or_else(|| OperationError::ParentNotFound {
            node_id: node_id.to_string(),
        })
}

/// Check a parent's children list and resolve its entries in list order
///
/// Every listed id must resolve, point back at `parent_id`, and appear once.
pub fn check_children_consistent<'a>(
    state: &'a TreeState,
    parent_id: &str,
) -> Result<Vec<&'a Node>> {
    let child_ids = state.child_ids(parent_id);
    let mut seen = HashSet::with_capacity(child_ids.len());
    let mut children = Vec::with_capacity(child_ids.len());

    for child_id in child_ids {
        if !seen.insert(child_id.as_str()) {
            return Err(OperationError::DuplicateNode {
                node_id: child_id.clone(),
            });
        }

        let child = check_node_exists(state, child_id)?;
        if child.parent_id.as_deref() != Some(parent_id) {
            return Err(OperationError::ParentNotFound {
                node_id: child_id.clone(),
            });
        }
        children.push(child);
    }

    Ok(children)
}

/// Check that children are consistent and their keys strictly increase
///
/// Returns the resolved children in list order.
pub fn check_order_keys_strict<'a>(
    state: &'a TreeState,
    parent_id: &str,
) -> Result<Vec<&'a Node>> {
    let children = check_children_consistent(state, parent_id)?;

    let mut previous: Option<i64> = None;
    for child in &children {
        let key = parse_order_key(child)?;
        if previous.is_some_and(|prev| key <= prev) {
            return Err(OperationError::InvalidOrderSequence {
                parent_id: parent_id.to_string(),
                sequence: children.iter().map(|c| c.id.clone()).collect(),
            });
        }
        previous = Some(key);
    }

    Ok(children)
}

/// Walk parent links from a node and fail if any node is revisited
///
/// The reported path starts and ends at the revisited node. A dangling
/// parent link ends the walk without error; `check_parent_exists` covers it.
pub fn check_cycle_free(state: &TreeState, node_id: &str) -> Result<()> {
    let mut visited = HashSet::new();
    let mut path: Vec<String> = Vec::new();
    let mut current = Some(node_id);

    while let Some(id) = current {
        if !visited.insert(id) {
            let start = path.iter().position(|p| p == id).unwrap_or(0);
            let mut cycle: Vec<String> = path[start..].to_vec();
            cycle.push(id.to_string());
            return Err(OperationError::CycleDetected { path: cycle });
        }
        path.push(id.to_string());

        current = state.node(id).and_then(|node| node.parent_id.as_deref());
    }

    Ok(())
}

/// Check that an update payload leaves every structural field alone
///
/// Returns the stored node the update applies to.
pub fn check_update_valid<'a>(
    state: &'a TreeState,
    node_id: &str,
    update: &Node,
) -> Result<&'a Node> {
    let existing = check_node_exists(state, node_id)?;

    let reason = if update.id != existing.id {
        Some("cannot update id")
    } else if update.parent_id != existing.parent_id {
        Some("cannot update parentId")
    } else if update.order_key != existing.order_key {
        Some("cannot update orderKey")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(OperationError::InvalidUpdate {
            node: update.clone(),
            reason: reason.to_string(),
        }),
        None => Ok(existing),
    }
}

/// Check a move request before any state is touched
///
/// Self-parenting and missing endpoints fail with `InvalidMove`; a
/// destination inside the moved node's subtree fails with `CycleDetected`
/// and the path `[dest, .., node, dest]` that the move would close.
pub fn check_move_valid<'a>(
    state: &'a TreeState,
    node_id: &str,
    parent_id: &str,
) -> Result<(&'a Node, &'a Node)> {
    let invalid = |reason: &str| OperationError::InvalidMove {
        node_id: node_id.to_string(),
        parent_id: parent_id.to_string(),
        reason: reason.to_string(),
    };

    if node_id == parent_id {
        return Err(invalid("node cannot be its own parent"));
    }

    let node = check_node_exists(state, node_id).map_err(|e| invalid(e.kind_name()))?;
    let parent = check_node_exists(state, parent_id).map_err(|e| invalid(e.kind_name()))?;

    if find_subtree(state, node_id)
        .iter()
        .any(|member| member.id == parent_id)
    {
        let chain = path_to_root(state, parent_id);
        let start = chain.iter().position(|id| id == node_id).unwrap_or(0);
        let mut cycle: Vec<String> = chain[start..].iter().rev().cloned().collect();
        cycle.push(parent_id.to_string());
        return Err(OperationError::CycleDetected { path: cycle });
    }

    Ok((node, parent))
}
