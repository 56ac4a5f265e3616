pub mod move_ops;
pub mod node_ops;
pub mod placement;

pub use move_ops::{
    move_node, move_node_to, move_node_to_with, move_node_with, reorder_sibling,
    reorder_sibling_with,
};
pub use node_ops::{delete_node, insert_node, insert_node_with, update_node};
