//! Whole-Tree Validation Tests

mod common;

use common::{root_with_children, sample_tree, strings};
use nestree_core::rules::validation::validate_tree;
use nestree_core::{Node, OperationError, TreeState};

fn rebuild(state: &TreeState, edit: impl Fn(&mut Vec<Node>, &mut Vec<(String, Vec<String>)>)) -> TreeState {
    let mut nodes: Vec<Node> = state.nodes_by_id().values().cloned().collect();
    let mut children: Vec<(String, Vec<String>)> = state
        .children_by_id()
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    edit(&mut nodes, &mut children);
    TreeState::from_parts(state.root_id(), nodes, children)
}

#[test]
fn test_sample_tree_is_valid() {
    assert_eq!(validate_tree(&sample_tree()), Ok(()));
}

#[test]
fn test_root_with_parent_is_invalid() {
    let state = rebuild(&sample_tree(), |nodes, _| {
        for node in nodes.iter_mut().filter(|n| n.id == "root") {
            node.parent_id = Some("child1".to_string());
        }
    });

    assert!(matches!(
        validate_tree(&state),
        Err(OperationError::InvalidNode { node }) if node.id == "root"
    ));
}

#[test]
fn test_duplicate_child_entry_is_invalid() {
    let state = rebuild(&sample_tree(), |_, children| {
        for (parent, list) in children.iter_mut() {
            if parent == "root" {
                list.push("child2".to_string());
            }
        }
    });

    assert_eq!(
        validate_tree(&state),
        Err(OperationError::DuplicateNode {
            node_id: "child2".to_string()
        })
    );
}

#[test]
fn test_list_for_unknown_parent_is_invalid() {
    let state = rebuild(&sample_tree(), |_, children| {
        children.push(("phantom".to_string(), vec![]));
    });

    assert_eq!(
        validate_tree(&state),
        Err(OperationError::NodeNotFound {
            node_id: "phantom".to_string()
        })
    );
}

#[test]
fn test_out_of_order_keys_are_invalid() {
    let state = root_with_children(&[("a", "10"), ("b", "5")]);

    assert_eq!(
        validate_tree(&state),
        Err(OperationError::InvalidOrderSequence {
            parent_id: "root".to_string(),
            sequence: strings(&["a", "b"]),
        })
    );
}

#[test]
fn test_detached_cycle_is_invalid() {
    let state = rebuild(&sample_tree(), |nodes, children| {
        nodes.push(Node::new("x", "X").with_parent("y").with_order_key("0"));
        nodes.push(Node::new("y", "Y").with_parent("x").with_order_key("0"));
        children.push(("x".to_string(), vec!["y".to_string()]));
        children.push(("y".to_string(), vec!["x".to_string()]));
    });

    assert!(matches!(
        validate_tree(&state),
        Err(OperationError::CycleDetected { .. })
    ));
}
