use im::OrdMap;
use nestree_core_types::IdSource;
use serde::Serialize;

use super::node::Node;

/// Name given to the root of a freshly created tree
pub const ROOT_NAME: &str = "Root";

/// Order key of the root node
pub const ROOT_ORDER_KEY: &str = "0";

/// Map of node ID to Node
pub type NodeMap = OrdMap<String, Node>;

/// Map of parent ID to the ordered list of its children's IDs
pub type ChildrenMap = OrdMap<String, Vec<String>>;

/// Immutable snapshot of a whole tree
///
/// An id-indexed arena: `nodes_by_id` owns every node and `children_by_id`
/// holds the authoritative sibling order. Both maps are persistent, so
/// `clone()` is O(1) and snapshots derived from one another share every
/// entry they did not change.
///
/// Operations never mutate a snapshot they were handed; they clone it,
/// edit the clone and return it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeState {
    pub(crate) root_id: String,
    pub(crate) nodes_by_id: NodeMap,
    pub(crate) children_by_id: ChildrenMap,
}

impl TreeState {
    /// Build a snapshot from raw parts without validating it
    ///
    /// Nodes are keyed by their own `id`. Used by the JSON adapter after its
    /// boundary validation pass and by test fixtures; run
    /// `rules::validation::validate_tree` if the parts are untrusted.
    pub fn from_parts(
        root_id: impl Into<String>,
        nodes: impl IntoIterator<Item = Node>,
        children: impl IntoIterator<Item = (String, Vec<String>)>,
    ) -> Self {
        Self {
            root_id: root_id.into(),
            nodes_by_id: nodes.into_iter().map(|n| (n.id.clone(), n)).collect(),
            children_by_id: children.into_iter().collect(),
        }
    }

    /// ID of the root node
    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    /// The root node, if present
    pub fn root(&self) -> Option<&Node> {
        self.nodes_by_id.get(self.root_id.as_str())
    }

    /// All nodes keyed by ID
    pub fn nodes_by_id(&self) -> &NodeMap {
        &self.nodes_by_id
    }

    /// All children lists keyed by parent ID
    pub fn children_by_id(&self) -> &ChildrenMap {
        &self.children_by_id
    }

    /// Get a node by ID
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes_by_id.get(id)
    }

    /// Check if a node exists
    pub fn contains(&self, id: &str) -> bool {
        self.nodes_by_id.contains_key(id)
    }

    /// Ordered child IDs of a node (empty for leaves and unknown IDs)
    pub fn child_ids(&self, id: &str) -> &[String] {
        self.children_by_id
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes_by_id.len()
    }

    /// True if the snapshot holds no nodes at all
    pub fn is_empty(&self) -> bool {
        self.nodes_by_id.is_empty()
    }

    pub(crate) fn put_node(&mut self, node: Node) {
        self.nodes_by_id.insert(node.id.clone(), node);
    }

    pub(crate) fn take_node(&mut self, id: &str) -> Option<Node> {
        self.nodes_by_id.remove(id)
    }

    pub(crate) fn set_order_key(&mut self, id: &str, order_key: String) {
        if let Some(node) = self.nodes_by_id.get_mut(id) {
            node.order_key = order_key;
        }
    }

    pub(crate) fn put_children(&mut self, parent_id: &str, children: Vec<String>) {
        self.children_by_id.insert(parent_id.to_string(), children);
    }

    pub(crate) fn take_children(&mut self, parent_id: &str) -> Option<Vec<String>> {
        self.children_by_id.remove(parent_id)
    }

    pub(crate) fn replace_root_id(&mut self, root_id: String) {
        self.root_id = root_id;
    }
}

/// Create a fresh tree holding only a root node
///
/// The root gets its id from the caller's `IdSource`, the name `"Root"`,
/// order key `"0"` and an empty children list.
pub fn create_tree_state(ids: &mut dyn IdSource) -> TreeState {
    let root_id = ids.next_id();
    let root = Node {
        id: root_id.clone(),
        name: ROOT_NAME.to_string(),
        parent_id: None,
        order_key: ROOT_ORDER_KEY.to_string(),
    };

    TreeState::from_parts(root_id.clone(), [root], [(root_id, Vec::new())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use nestree_core_types::SequentialIds;

    #[test]
    fn test_create_tree_state() {
        let mut ids = SequentialIds::new("n");
        let state = create_tree_state(&mut ids);

        assert_eq!(state.root_id(), "n-1");
        assert_eq!(state.len(), 1);
        let root = state.root().unwrap();
        assert_eq!(root.name, "Root");
        assert_eq!(root.order_key, "0");
        assert!(root.is_root());
        assert!(state.children_by_id().contains_key("n-1"));
        assert!(state.child_ids("n-1").is_empty());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut ids = SequentialIds::new("n");
        let original = create_tree_state(&mut ids);
        let mut copy = original.clone();

        copy.put_node(Node::new("extra", "Extra").with_parent("n-1"));

        assert_eq!(original.len(), 1);
        assert_eq!(copy.len(), 2);
    }

    #[test]
    fn test_child_ids_of_unknown_node_is_empty() {
        let mut ids = SequentialIds::new("n");
        let state = create_tree_state(&mut ids);
        assert!(state.child_ids("missing").is_empty());
    }
}
