#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::sample_tree;
use nestree_core::logging_facility::test_capture::init_test_capture;
use nestree_core::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use nestree_core::{log_op_end, log_op_error, log_op_start};
use nestree_core::{HistoryConfig, HistoryStore, Node, OperationError};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events: Vec<_> = capture
        .events()
        .into_iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].duration_ms(), Some(42));
}

#[test]
fn test_log_op_error_includes_code_and_kind() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = OperationError::CycleDetected {
        path: vec!["a".to_string(), "b".to_string(), "a".to_string()],
    };
    log_op_error!(op_name, err, duration_ms = 5);

    let events = capture.events();
    let error_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");

    assert_eq!(error_event.err_code(), Some("ERR_CYCLE_DETECTED"));
    assert_eq!(error_event.err_kind(), Some("CycleDetected"));
}

#[test]
fn test_store_operation_owns_boundary() {
    // GIVEN a store and a node id no other test uses
    let capture = init_test_capture();
    let mut store = HistoryStore::with_state(sample_tree(), HistoryConfig::default());

    // WHEN one insert runs
    store
        .insert_node("root", Node::new("log-boundary-node", "Logged"))
        .unwrap();

    // THEN exactly one start and one end are logged for it
    let events = capture.events_for_node("insert_node", "log-boundary-node");
    let starts = events
        .iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_START))
        .count();
    let ends = events
        .iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .count();

    assert_eq!(starts, 1);
    assert_eq!(ends, 1);
}

#[test]
fn test_store_failure_logs_end_error() {
    let capture = init_test_capture();
    let mut store = HistoryStore::with_state(sample_tree(), HistoryConfig::default());

    let _ = store.delete_node("log-missing-node");

    let events = capture.events_for_node("delete_node", "log-missing-node");
    let error_event = events
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");

    assert_eq!(error_event.err_code(), Some("ERR_NOT_FOUND"));
    assert_eq!(error_event.node_id(), Some("log-missing-node"));
    assert!(!events
        .iter()
        .any(|e| e.event.as_deref() == Some(EVENT_END)));
}

#[test]
#[should_panic(expected = "no start event")]
fn test_test_capture_assert_event_exists_fails() {
    let capture = init_test_capture();
    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_test_capture_count_events() {
    let capture = init_test_capture();
    let op1_name = "test_count_events_op1_unique_8";
    let op2_name = "test_count_events_op2_unique_8";

    log_op_start!(op1_name);
    log_op_start!(op2_name, node_id = "n1");
    log_op_end!(op1_name, duration_ms = 10);

    let start_count = capture.count_events(|e| {
        e.event.as_deref() == Some(EVENT_START)
            && (e.op.as_deref() == Some(op1_name) || e.op.as_deref() == Some(op2_name))
    });
    let end_count = capture.count_events(|e| {
        e.event.as_deref() == Some(EVENT_END) && e.op.as_deref() == Some(op1_name)
    });

    assert_eq!(start_count, 2);
    assert_eq!(end_count, 1);
}
