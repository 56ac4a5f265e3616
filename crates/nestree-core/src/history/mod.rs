//! Undo/redo history over tree snapshots
//!
//! Each committed edit is stored as a `TreeDelta`: a forward and an inverse
//! `TreePatch` naming only the map entries that changed.

pub mod patch;
pub mod store;

pub use patch::{TreeDelta, TreePatch};
pub use store::{HistoryStore, ListenerId};
