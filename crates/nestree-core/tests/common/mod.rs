use nestree_core::rules::validation::validate_tree;
use nestree_core::{Node, TreeState};

/// Build a root named "root" with direct children `(id, order_key)`
///
/// Bypasses the engine, so tests can start from exact key layouts.
#[allow(dead_code)]
pub fn root_with_children(children: &[(&str, &str)]) -> TreeState {
    let mut nodes = vec![Node::new("root", "Root").with_order_key("0")];
    let mut lists = vec![(
        "root".to_string(),
        children.iter().map(|(id, _)| id.to_string()).collect::<Vec<_>>(),
    )];

    for (id, key) in children {
        nodes.push(
            Node::new(*id, format!("Node {id}"))
                .with_parent("root")
                .with_order_key(*key),
        );
        lists.push((id.to_string(), Vec::new()));
    }

    TreeState::from_parts("root", nodes, lists)
}

/// Setup a small tree:
///
/// ```text
/// root
/// ├── child1 (0)
/// │   └── grandchild1 (0)
/// │       └── greatgrandchild1 (0)
/// ├── child2 (10)
/// └── child3 (20)
/// ```
#[allow(dead_code)]
pub fn sample_tree() -> TreeState {
    let node = |id: &str, parent: &str, key: &str| {
        Node::new(id, format!("Node {id}"))
            .with_parent(parent)
            .with_order_key(key)
    };

    TreeState::from_parts(
        "root",
        [
            Node::new("root", "Root").with_order_key("0"),
            node("child1", "root", "0"),
            node("child2", "root", "10"),
            node("child3", "root", "20"),
            node("grandchild1", "child1", "0"),
            node("greatgrandchild1", "grandchild1", "0"),
        ],
        [
            (
                "root".to_string(),
                vec![
                    "child1".to_string(),
                    "child2".to_string(),
                    "child3".to_string(),
                ],
            ),
            ("child1".to_string(), vec!["grandchild1".to_string()]),
            (
                "grandchild1".to_string(),
                vec!["greatgrandchild1".to_string()],
            ),
            ("greatgrandchild1".to_string(), vec![]),
            ("child2".to_string(), vec![]),
            ("child3".to_string(), vec![]),
        ],
    )
}

/// Panic with the violation if the snapshot breaks a tree invariant
#[allow(dead_code)]
pub fn assert_invariants(state: &TreeState) {
    if let Err(err) = validate_tree(state) {
        panic!("tree invariants violated: {err}\n{state:#?}");
    }
}

/// Children of `parent_id` as owned ids, in list order
#[allow(dead_code)]
pub fn child_ids(state: &TreeState, parent_id: &str) -> Vec<String> {
    state.child_ids(parent_id).to_vec()
}

/// Order keys of `parent_id`'s children, in list order
#[allow(dead_code)]
pub fn child_keys(state: &TreeState, parent_id: &str) -> Vec<String> {
    state
        .child_ids(parent_id)
        .iter()
        .filter_map(|id| state.node(id))
        .map(|node| node.order_key.clone())
        .collect()
}

/// Owned string vector from literals
#[allow(dead_code)]
pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
