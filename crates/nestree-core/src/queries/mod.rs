//! Read-only traversal queries
//!
//! All queries are total: absent ids produce `None` or an empty result rather
//! than an error, and every walk is guarded against revisiting a node so a
//! corrupt (cyclic) snapshot cannot hang a caller.

pub mod tree_queries;

pub use tree_queries::{
    depth, find_ancestors, find_children, find_descendants, find_node, find_parent,
    find_siblings, find_subtree, path_to_root, subtree_ids,
};
