use std::collections::HashSet;

use crate::model::{Node, TreeState};

/// Look up a node by ID
pub fn find_node<'a>(state: &'a TreeState, node_id: &str) -> Option<&'a Node> {
    state.node(node_id)
}

/// Parent of a node (None for the root, unknown IDs and dangling links)
pub fn find_parent<'a>(state: &'a TreeState, node_id: &str) -> Option<&'a Node> {
    let parent_id = state.node(node_id)?.parent_id.as_deref()?;
    state.node(parent_id)
}

/// Children of a node in sibling order
///
/// IDs listed in the children list that do not resolve are skipped.
pub fn find_children<'a>(state: &'a TreeState, node_id: &str) -> Vec<&'a Node> {
    state
        .child_ids(node_id)
        .iter()
        .filter_map(|id| state.node(id))
        .collect()
}

/// Ancestors of a node, nearest first, ending at the root
pub fn find_ancestors<'a>(state: &'a TreeState, node_id: &str) -> Vec<&'a Node> {
    let mut ancestors = Vec::new();
    let mut visited = HashSet::new();
    visited.insert(node_id);

    let mut current = find_parent(state, node_id);
    while let Some(parent) = current {
        if !visited.insert(parent.id.as_str()) {
            break;
        }
        ancestors.push(parent);
        current = find_parent(state, &parent.id);
    }

    ancestors
}

/// Descendants of a node in pre-order (each child followed by its subtree)
pub fn find_descendants<'a>(state: &'a TreeState, node_id: &str) -> Vec<&'a Node> {
    let mut descendants = Vec::new();
    let mut visited = HashSet::new();
    visited.insert(node_id);

    let mut stack: Vec<&str> = state
        .child_ids(node_id)
        .iter()
        .rev()
        .map(String::as_str)
        .collect();

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        if let Some(node) = state.node(id) {
            descendants.push(node);
            stack.extend(state.child_ids(id).iter().rev().map(String::as_str));
        }
    }

    descendants
}

/// Siblings of a node (children of its parent, excluding itself)
pub fn find_siblings<'a>(state: &'a TreeState, node_id: &str) -> Vec<&'a Node> {
    match find_parent(state, node_id) {
        Some(parent) => find_children(state, &parent.id)
            .into_iter()
            .filter(|child| child.id != node_id)
            .collect(),
        None => Vec::new(),
    }
}

/// The node itself followed by all of its descendants in pre-order
pub fn find_subtree<'a>(state: &'a TreeState, node_id: &str) -> Vec<&'a Node> {
    match state.node(node_id) {
        Some(node) => {
            let mut subtree = vec![node];
            subtree.extend(find_descendants(state, node_id));
            subtree
        }
        None => Vec::new(),
    }
}

/// IDs of `find_subtree`, as owned strings
pub fn subtree_ids(state: &TreeState, node_id: &str) -> Vec<String> {
    find_subtree(state, node_id)
        .into_iter()
        .map(|node| node.id.clone())
        .collect()
}

/// IDs from the root down to the node (inclusive); empty for unknown IDs
pub fn path_to_root(state: &TreeState, node_id: &str) -> Vec<String> {
    let Some(node) = state.node(node_id) else {
        return Vec::new();
    };

    let mut path: Vec<String> = find_ancestors(state, node_id)
        .into_iter()
        .map(|n| n.id.clone())
        .collect();
    path.reverse();
    path.push(node.id.clone());
    path
}

/// Number of ancestors (0 for the root); None for unknown IDs
pub fn depth(state: &TreeState, node_id: &str) -> Option<usize> {
    state
        .node(node_id)
        .map(|_| find_ancestors(state, node_id).len())
}
