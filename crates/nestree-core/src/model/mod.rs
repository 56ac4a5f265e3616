pub mod node;
pub mod tree_state;

pub use node::Node;
pub use tree_state::{create_tree_state, ChildrenMap, NodeMap, TreeState, ROOT_NAME, ROOT_ORDER_KEY};
