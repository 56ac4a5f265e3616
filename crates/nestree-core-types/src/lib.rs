//! Core types shared across nestree crates
//!
//! This crate provides foundational types used by the engine, the JSON
//! adapter and the logging facility:
//!
//! - **Identifier sources**: `IdSource`, the caller-supplied unique-id source,
//!   and `UuidV7Ids`, its default implementation
//! - **Schema constants**: Canonical field keys and event names

pub mod ids;
pub mod schema;

pub use ids::{IdSource, SequentialIds, UuidV7Ids};
