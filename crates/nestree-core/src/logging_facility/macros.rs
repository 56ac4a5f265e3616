//! Operation boundary macros
//!
//! All three expand to one `tracing` event carrying `component` (the
//! calling module), `op` and `event`, plus any extra fields given after the
//! required arguments. Callers need `tracing` as a dependency.

#[doc(hidden)]
#[macro_export]
macro_rules! __op_event {
    ($level:expr, $event:expr, $op:expr $(, $($field:tt)*)?) => {
        tracing::event!(
            $level,
            component = module_path!(),
            op = $op,
            event = $event,
            $($($field)*)?
        )
    };
}

/// Emit the `start` event of an operation
///
/// ```
/// # use nestree_core::log_op_start;
/// log_op_start!("insert_node");
/// log_op_start!("insert_node", node_id = "n1");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__op_event!(
            tracing::Level::INFO,
            $crate::schema::EVENT_START,
            $op
            $(, $($field)*)?
        )
    };
}

/// Emit the `end` event of an operation, with its duration
///
/// ```
/// # use nestree_core::log_op_end;
/// log_op_end!("undo", duration_ms = 0);
/// log_op_end!("undo", duration_ms = 0, undo_depth = 4);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__op_event!(
            tracing::Level::INFO,
            $crate::schema::EVENT_END,
            $op,
            duration_ms = $duration
            $(, $($field)*)?
        )
    };
}

/// Emit the `end_error` event of a failed operation
///
/// `$err` is anything convertible into `ExError`; its kind and stable code
/// are attached as `err_kind` and `err_code`.
///
/// ```
/// # use nestree_core::{log_op_error, OperationError};
/// let err = OperationError::NodeNotFound { node_id: "n1".to_string() };
/// log_op_error!("delete_node", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__op_event!(
            tracing::Level::ERROR,
            $crate::schema::EVENT_END_ERROR,
            $op,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code()
            $(, $($field)*)?
        )
    }};
}
