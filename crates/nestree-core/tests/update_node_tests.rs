//! Update Node Tests
//!
//! Only the name may change; structural fields are guarded.

mod common;

use common::{assert_invariants, sample_tree};
use nestree_core::{update_node, Node, OperationError};

fn renamed(state: &nestree_core::TreeState, id: &str, name: &str) -> Node {
    Node {
        name: name.to_string(),
        ..state.node(id).unwrap().clone()
    }
}

#[test]
fn test_rename_replaces_name_only() {
    // GIVEN a tree with child2
    let state = sample_tree();

    // WHEN we update its name
    let next = update_node(&state, "child2", renamed(&state, "child2", "Second")).unwrap();

    // THEN only the name differs
    let before = state.node("child2").unwrap();
    let after = next.node("child2").unwrap();
    assert_eq!(after.name, "Second");
    assert_eq!(after.parent_id, before.parent_id);
    assert_eq!(after.order_key, before.order_key);
    assert_eq!(next.children_by_id(), state.children_by_id());
    assert_invariants(&next);
}

#[test]
fn test_empty_name_is_allowed() {
    let state = sample_tree();
    let next = update_node(&state, "child3", renamed(&state, "child3", "")).unwrap();
    assert_eq!(next.node("child3").unwrap().name, "");
}

#[test]
fn test_changing_id_fails() {
    let state = sample_tree();
    let payload = Node {
        id: "other".to_string(),
        ..state.node("child2").unwrap().clone()
    };

    match update_node(&state, "child2", payload) {
        Err(OperationError::InvalidUpdate { node, reason }) => {
            assert_eq!(node.id, "other");
            assert_eq!(reason, "cannot update id");
        }
        other => panic!("expected InvalidUpdate, got {other:?}"),
    }
}

#[test]
fn test_changing_parent_fails() {
    let state = sample_tree();
    let payload = renamed(&state, "child2", "X").with_parent("child1");

    assert!(matches!(
        update_node(&state, "child2", payload),
        Err(OperationError::InvalidUpdate { reason, .. }) if reason == "cannot update parentId"
    ));
}

#[test]
fn test_changing_order_key_fails() {
    let state = sample_tree();
    let payload = renamed(&state, "child2", "X").with_order_key("15");

    assert!(matches!(
        update_node(&state, "child2", payload),
        Err(OperationError::InvalidUpdate { reason, .. }) if reason == "cannot update orderKey"
    ));
}

#[test]
fn test_unknown_node_fails() {
    let state = sample_tree();
    let payload = Node::new("ghost", "Ghost");
    assert_eq!(
        update_node(&state, "ghost", payload),
        Err(OperationError::NodeNotFound {
            node_id: "ghost".to_string()
        })
    );
}
