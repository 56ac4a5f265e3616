//! Command types representing every structural edit
//!
//! Commands are the unit the history store records: one command, one undo
//! step. They are executed through the `apply()` function.

use crate::model::Node;

/// Command enum representing the five structural operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Insert a node under a parent (blank order key appends)
    InsertNode { parent_id: String, node: Node },

    /// Replace a node's non-structural fields
    UpdateNode { node_id: String, node: Node },

    /// Delete a node and its whole subtree
    DeleteNode { node_id: String },

    /// Move a node under a new parent, optionally at a given index
    MoveNode {
        node_id: String,
        parent_id: String,
        target_index: Option<usize>,
    },

    /// Move a node to a new index among its siblings
    ReorderSibling { node_id: String, new_index: usize },
}

impl Command {
    /// Operation name used in logs and history labels
    pub fn op_name(&self) -> &'static str {
        match self {
            Command::InsertNode { .. } => "insert_node",
            Command::UpdateNode { .. } => "update_node",
            Command::DeleteNode { .. } => "delete_node",
            Command::MoveNode { .. } => "move_node",
            Command::ReorderSibling { .. } => "reorder_sibling",
        }
    }

    /// ID of the node the command acts on
    pub fn subject_id(&self) -> &str {
        match self {
            Command::InsertNode { node, .. } => &node.id,
            Command::UpdateNode { node_id, .. }
            | Command::DeleteNode { node_id }
            | Command::MoveNode { node_id, .. }
            | Command::ReorderSibling { node_id, .. } => node_id,
        }
    }
}
