use serde::{Deserialize, Serialize};

/// Envelope version written by this crate and the only one accepted
pub const FORMAT_VERSION: u32 = 1;

/// Versioned wrapper around the JSON text of a `TreeState`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedTree {
    pub version: u32,
    /// JSON text of `{ rootId, nodesById, childrenById }`
    pub tree: String,
}
