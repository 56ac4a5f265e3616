//! nestree Core - in-memory ordered tree engine
//!
//! This crate provides the foundational data structures and operations for
//! nestree, including:
//! - The `Node` / `TreeState` data model with persistent (structurally shared) maps
//! - Read-only traversal queries (ancestors, descendants, siblings, subtree)
//! - Invariant checks with a typed failure taxonomy
//! - Gap-based order-key allocation with renormalization
//! - The five structural operations (insert, update, delete, move, reorder)
//! - A history store with patch-based undo/redo and change listeners
//!
//! Operations never mutate the snapshot they are given: each returns a new
//! `TreeState` or an `OperationError`.

pub mod apply;
pub mod commands;
pub mod config;
pub mod errors;
pub mod history;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod order;
pub mod queries;
pub mod render;
pub mod rules;

pub use nestree_core_types::schema;

// Re-export commonly used types
pub use apply::apply;
pub use commands::Command;
pub use config::{EngineConfig, HistoryConfig};
pub use errors::{ExError, ExErrorKind, OperationError, Result};
pub use history::{HistoryStore, ListenerId};
pub use model::{create_tree_state, Node, TreeState};
pub use ops::{
    delete_node, insert_node, insert_node_with, move_node, move_node_to, move_node_to_with,
    move_node_with, reorder_sibling, reorder_sibling_with, update_node,
};
pub use render::render_outline;
pub use rules::validation::validate_tree;
