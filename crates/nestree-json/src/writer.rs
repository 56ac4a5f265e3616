use nestree_core::{ExError, ExErrorKind, TreeState};

use crate::envelope::{SerializedTree, FORMAT_VERSION};
use crate::Result;

fn serialization_error(err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op("serialize_tree_state")
        .with_message(err.to_string())
}

/// Wrap a snapshot's JSON text in a version-1 envelope
///
/// # Errors
/// `Serialization` if the snapshot cannot be encoded.
pub fn serialize_tree_state(state: &TreeState) -> Result<SerializedTree> {
    let tree = serde_json::to_string(state).map_err(serialization_error)?;
    Ok(SerializedTree {
        version: FORMAT_VERSION,
        tree,
    })
}

/// Serialize a snapshot straight to pretty-printed envelope JSON
///
/// # Errors
/// `Serialization` if the snapshot cannot be encoded.
pub fn to_envelope_string(state: &TreeState) -> Result<String> {
    let envelope = serialize_tree_state(state)?;
    serde_json::to_string_pretty(&envelope).map_err(serialization_error)
}
