use crate::errors::{OperationError, Result};
use crate::model::TreeState;

use super::invariants;

/// Validate an entire snapshot against the tree invariants
///
/// 1. The root exists and has no parent
/// 2. Every listed child resolves and points back at its list's parent
/// 3. Every non-root node is listed under its parent
/// 4. No id appears twice in one children list
/// 5. Sibling order keys strictly increase in list order
/// 6. Parent links from every node terminate without revisiting a node
///
/// Also checks that every `nodes_by_id` entry is keyed by its own id.
///
/// # Errors
/// Returns the first violation encountered.
pub fn validate_tree(state: &TreeState) -> Result<()> {
    // Requirement 1: root
    let root = invariants::check_node_exists(state, state.root_id())?;
    if root.parent_id.is_some() {
        return Err(OperationError::InvalidNode { node: root.clone() });
    }

    for (key, node) in state.nodes_by_id().iter() {
        invariants::check_node_valid(node)?;
        if key != &node.id {
            return Err(OperationError::InvalidNode { node: node.clone() });
        }
    }

    // Requirements 2, 4 & 5: every children list
    for parent_id in state.children_by_id().keys() {
        invariants::check_node_exists(state, parent_id)?;
        invariants::check_order_keys_strict(state, parent_id)?;
    }

    // Requirement 3: membership
    for node in state.nodes_by_id().values() {
        if node.id == state.root_id() {
            continue;
        }
        let parent = invariants::check_parent_exists(state, &node.id)?;
        if !state.child_ids(&parent.id).contains(&node.id) {
            return Err(OperationError::ParentNotFound {
                node_id: node.id.clone(),
            });
        }
    }

    // Requirement 6: parent chains
    for node_id in state.nodes_by_id().keys() {
        invariants::check_cycle_free(state, node_id)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;

    fn two_level() -> (Vec<Node>, Vec<(String, Vec<String>)>) {
        (
            vec![
                Node::new("root", "Root").with_order_key("0"),
                Node::new("a", "A").with_parent("root").with_order_key("0"),
                Node::new("b", "B").with_parent("root").with_order_key("10"),
            ],
            vec![(
                "root".to_string(),
                vec!["a".to_string(), "b".to_string()],
            )],
        )
    }

    #[test]
    fn test_valid_tree_passes() {
        let (nodes, children) = two_level();
        let state = TreeState::from_parts("root", nodes, children);
        assert_eq!(validate_tree(&state), Ok(()));
    }

    #[test]
    fn test_missing_root_fails() {
        let (nodes, children) = two_level();
        let state = TreeState::from_parts("nowhere", nodes, children);
        assert_eq!(
            validate_tree(&state),
            Err(OperationError::NodeNotFound {
                node_id: "nowhere".to_string()
            })
        );
    }

    #[test]
    fn test_unlisted_child_fails() {
        let (nodes, _) = two_level();
        let state = TreeState::from_parts(
            "root",
            nodes,
            [("root".to_string(), vec!["a".to_string()])],
        );
        assert_eq!(
            validate_tree(&state),
            Err(OperationError::ParentNotFound {
                node_id: "b".to_string()
            })
        );
    }

    #[test]
    fn test_orphan_cycle_fails() {
        let (mut nodes, children) = two_level();
        nodes.push(Node::new("x", "X").with_parent("y").with_order_key("0"));
        nodes.push(Node::new("y", "Y").with_parent("x").with_order_key("0"));
        let mut children = children;
        children.push(("x".to_string(), vec!["y".to_string()]));
        children.push(("y".to_string(), vec!["x".to_string()]));
        let state = TreeState::from_parts("root", nodes, children);

        assert!(matches!(
            validate_tree(&state),
            Err(OperationError::CycleDetected { .. })
        ));
    }

    #[test]
    fn test_unordered_keys_fail() {
        let (mut nodes, children) = two_level();
        nodes[2].order_key = "-1".to_string();
        let state = TreeState::from_parts("root", nodes, children);
        assert!(matches!(
            validate_tree(&state),
            Err(OperationError::InvalidOrderSequence { .. })
        ));
    }
}
