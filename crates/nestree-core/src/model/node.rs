use serde::{Deserialize, Serialize};

/// Node - a named entry in the tree
///
/// Nodes never hold references to each other. Structure lives in the
/// `parent_id` link and in the owning `TreeState`'s children lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Globally unique, immutable identifier
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Parent node ID (None only for the root)
    pub parent_id: Option<String>,

    /// String-encoded signed integer ordering this node among its siblings.
    /// Blank on an incoming node means "append"; otherwise assigned by the engine.
    pub order_key: String,
}

impl Node {
    /// Create a new detached Node with a blank order key
    ///
    /// # Arguments
    /// * `id` - Unique identifier (typically from an `IdSource`)
    /// * `name` - Human-readable name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: None,
            order_key: String::new(),
        }
    }

    /// Set the parent link
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Set the requested order key
    pub fn with_order_key(mut self, order_key: impl Into<String>) -> Self {
        self.order_key = order_key.into();
        self
    }

    /// Check if this Node is a root (has no parent)
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Check if the order key is blank (empty or whitespace)
    pub fn has_blank_order_key(&self) -> bool {
        self.order_key.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node() {
        let node = Node::new("n1", "First");

        assert_eq!(node.id, "n1");
        assert_eq!(node.name, "First");
        assert!(node.is_root());
        assert!(node.has_blank_order_key());
    }

    #[test]
    fn test_builders() {
        let node = Node::new("n1", "First")
            .with_parent("p")
            .with_order_key("20");

        assert_eq!(node.parent_id.as_deref(), Some("p"));
        assert_eq!(node.order_key, "20");
        assert!(!node.has_blank_order_key());
    }
}
