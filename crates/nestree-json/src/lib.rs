//! nestree JSON - versioned JSON envelope for tree snapshots
//!
//! A snapshot is stored as `{ "version": 1, "tree": "<TreeState JSON text>" }`.
//! Loading runs a dedicated boundary-validation pass over the raw JSON before
//! any `TreeState` is built; malformed input is rejected as a whole with a
//! field-specific message.

pub mod envelope;
pub mod parser;
pub mod writer;

use nestree_core::{ExError, ExErrorKind};

pub use envelope::{SerializedTree, FORMAT_VERSION};
pub use parser::{deserialize_tree_state, from_envelope_str};
pub use writer::{serialize_tree_state, to_envelope_string};

/// Result type for adapter operations
pub type Result<T> = std::result::Result<T, ExError>;

/// Semantic rejection of a payload
pub(crate) fn invalid_tree(message: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::InvalidInput).with_message(format!("Invalid tree: {message}"))
}

/// Syntactic rejection (not JSON, or not the expected envelope shape)
pub(crate) fn malformed(err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization).with_message(format!("JSON parse error: {err}"))
}
