use std::collections::HashSet;

use crate::errors::Result;
use crate::model::TreeState;
use crate::rules::invariants::check_node_exists;

/// Render the whole tree as an indented outline
///
/// One line per node, `- name [id]`, two spaces of indent per level, in
/// pre-order with siblings in list order. An empty string if the root is
/// missing.
pub fn render_outline(state: &TreeState) -> String {
    render_subtree(state, state.root_id()).unwrap_or_default()
}

/// Render the subtree rooted at `node_id` as an indented outline
///
/// # Arguments
/// * `state` - Snapshot to render
/// * `node_id` - ID of the subtree root (rendered at indent 0)
///
/// # Errors
/// * `NodeNotFound` - If the node doesn't exist
pub fn render_subtree(state: &TreeState, node_id: &str) -> Result<String> {
    check_node_exists(state, node_id)?;

    let mut output = String::new();
    let mut visited = HashSet::new();
    let mut stack = vec![(node_id, 0usize)];

    while let Some((id, depth)) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let Some(node) = state.node(id) else {
            continue;
        };

        output.push_str(&format!("{}- {} [{}]\n", "  ".repeat(depth), node.name, node.id));

        for child_id in state.child_ids(id).iter().rev() {
            stack.push((child_id.as_str(), depth + 1));
        }
    }

    Ok(output)
}
