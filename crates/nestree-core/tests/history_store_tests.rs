//! History Store Tests
//!
//! ## Scenarios Covered
//!
//! 1. Undo restores the exact pre-operation snapshot, redo the post-operation one
//! 2. A renormalizing insert is a single undo step
//! 3. New operations clear the redo stack
//! 4. Listeners observe the swapped-in snapshot

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{assert_invariants, child_keys, root_with_children, sample_tree, strings};
use nestree_core::{HistoryConfig, HistoryStore, Node, OperationError, TreeState};
use nestree_core_types::SequentialIds;

fn store_over(state: TreeState) -> HistoryStore {
    HistoryStore::with_state(state, HistoryConfig::unlimited())
}

#[test]
fn test_new_store_has_single_root() {
    let store = HistoryStore::new(&mut SequentialIds::new("id"));

    assert_eq!(store.snapshot().len(), 1);
    assert_eq!(store.snapshot().root().unwrap().name, "Root");
    assert!(!store.can_undo());
    assert!(!store.can_redo());
}

#[test]
fn test_undo_and_redo_restore_exact_snapshots() {
    // GIVEN a store over the sample tree
    let mut store = store_over(sample_tree());
    let before = store.snapshot().clone();

    // WHEN each kind of operation runs, then is undone and redone
    type Step = Box<dyn Fn(&mut HistoryStore) -> nestree_core::Result<TreeState>>;
    let steps: Vec<Step> = vec![
        Box::new(|s: &mut HistoryStore| s.insert_node("child2", Node::new("n1", "N1"))),
        Box::new(|s: &mut HistoryStore| {
            let node = Node {
                name: "Renamed".to_string(),
                ..s.snapshot().node("child3").unwrap().clone()
            };
            s.update_node("child3", node)
        }),
        Box::new(|s: &mut HistoryStore| s.move_node("grandchild1", "child3")),
        Box::new(|s: &mut HistoryStore| s.reorder_sibling("child3", 0)),
        Box::new(|s: &mut HistoryStore| s.delete_node("child1")),
    ];

    let mut previous = before;
    for step in steps {
        let after = step(&mut store).unwrap();
        assert_invariants(&after);

        // THEN undo gives back the prior snapshot and redo the new one
        assert!(store.undo());
        assert_eq!(store.snapshot(), &previous);
        assert!(store.redo());
        assert_eq!(store.snapshot(), &after);

        previous = after;
    }
}

#[test]
fn test_renormalizing_insert_is_one_undo_step() {
    // GIVEN siblings with no room between them
    let mut store = store_over(root_with_children(&[("left", "0"), ("right", "1")]));

    // WHEN an insert renumbers every sibling
    store
        .insert_node("root", Node::new("new", "New").with_order_key("0"))
        .unwrap();
    assert_eq!(
        child_keys(store.snapshot(), "root"),
        strings(&["0", "10", "20"])
    );

    // THEN one undo restores the original keys and membership
    assert_eq!(store.undo_depth(), 1);
    assert!(store.undo());
    assert_eq!(child_keys(store.snapshot(), "root"), strings(&["0", "1"]));
    assert!(!store.snapshot().contains("new"));
    assert!(!store.can_undo());
}

#[test]
fn test_new_operation_clears_redo() {
    let mut store = store_over(sample_tree());
    store.delete_node("child3").unwrap();
    store.undo();
    assert!(store.can_redo());

    store.insert_node("root", Node::new("x", "X")).unwrap();

    assert!(!store.can_redo());
    assert!(!store.redo());
}

#[test]
fn test_failed_operation_changes_nothing() {
    let mut store = store_over(sample_tree());
    let before = store.snapshot().clone();

    let result = store.insert_node("root", Node::new("child1", "Dup"));

    assert_eq!(
        result,
        Err(OperationError::DuplicateNode {
            node_id: "child1".to_string()
        })
    );
    assert_eq!(store.snapshot(), &before);
    assert!(!store.can_undo());
}

#[test]
fn test_noop_operation_still_records_an_entry() {
    // Reordering an already-normalized node to its own index changes nothing
    let mut store = store_over(sample_tree());
    store.reorder_sibling("child1", 0).unwrap();

    assert_eq!(store.undo_depth(), 1);
    assert!(store.undo());
    assert_eq!(store.snapshot(), &sample_tree());
}

#[test]
fn test_listeners_see_new_snapshot() {
    let mut store = store_over(sample_tree());
    let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store.subscribe(move |state| sink.borrow_mut().push(state.len()));

    store.insert_node("root", Node::new("x", "X")).unwrap();
    store.undo();
    store.redo();
    let _ = store.delete_node("ghost");

    assert_eq!(*seen.borrow(), vec![7, 6, 7]);
}
