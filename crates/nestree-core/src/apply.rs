//! Functional-boundary apply function
//!
//! `apply()` is the single dispatch point from a `Command` to the engine
//! operations.
//!
//! ## Atomicity Contract
//!
//! - **All-or-nothing**: either the command succeeds and a new valid snapshot
//!   is returned, or it fails and the caller's snapshot is untouched
//! - **No panics**: invalid input returns typed errors
//!
//! ## Example
//!
//! ```
//! use nestree_core::{apply, create_tree_state, Command, EngineConfig, Node};
//! use nestree_core_types::SequentialIds;
//!
//! let state = create_tree_state(&mut SequentialIds::new("n"));
//! let cmd = Command::InsertNode {
//!     parent_id: state.root_id().to_string(),
//!     node: Node::new("child", "Child"),
//! };
//!
//! let next = apply(&state, cmd, &EngineConfig::default()).unwrap();
//! assert_eq!(next.len(), 2);
//! assert_eq!(state.len(), 1);
//! ```

use crate::commands::Command;
use crate::config::EngineConfig;
use crate::errors::Result;
use crate::model::TreeState;
use crate::ops::{move_ops, node_ops};

/// Apply a command to a snapshot, returning the new snapshot
///
/// # Arguments
///
/// * `state` - Current snapshot (never modified)
/// * `cmd` - Command to execute
/// * `config` - Order-key allocation parameters
///
/// # Errors
///
/// Returns the `OperationError` of the underlying operation.
pub fn apply(state: &TreeState, cmd: Command, config: &EngineConfig) -> Result<TreeState> {
    match cmd {
        Command::InsertNode { parent_id, node } => {
            node_ops::insert_node_with(state, &parent_id, node, config)
        }

        Command::UpdateNode { node_id, node } => node_ops::update_node(state, &node_id, node),

        Command::DeleteNode { node_id } => node_ops::delete_node(state, &node_id),

        Command::MoveNode {
            node_id,
            parent_id,
            target_index,
        } => move_ops::move_node_to_with(state, &node_id, &parent_id, target_index, config),

        Command::ReorderSibling { node_id, new_index } => {
            move_ops::reorder_sibling_with(state, &node_id, new_index, config)
        }
    }
}
