//! Unique identifier sources
//!
//! The engine never invents node ids on its own. Callers hand it an
//! `IdSource` wherever a fresh id is needed (today: the root node of a new
//! tree). Production code uses `UuidV7Ids`; tests use `SequentialIds` or a
//! closure for deterministic ids.

use uuid::Uuid;

/// A source of globally unique node identifiers
pub trait IdSource {
    /// Produce the next identifier. Must never return the same value twice.
    fn next_id(&mut self) -> String;
}

impl<F> IdSource for F
where
    F: FnMut() -> String,
{
    fn next_id(&mut self) -> String {
        self()
    }
}

/// Time-ordered UUIDv7 identifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV7Ids;

impl IdSource for UuidV7Ids {
    fn next_id(&mut self) -> String {
        Uuid::now_v7().to_string()
    }
}

/// Deterministic `<prefix>-<n>` identifiers, starting at 1
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_uuid_v7_ids_are_unique() {
        let mut ids = UuidV7Ids;
        let generated: HashSet<String> = (0..100).map(|_| ids.next_id()).collect();
        assert_eq!(generated.len(), 100);
    }

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::new("node");
        assert_eq!(ids.next_id(), "node-1");
        assert_eq!(ids.next_id(), "node-2");
    }

    #[test]
    fn test_closure_is_an_id_source() {
        let mut counter = 0;
        let mut source = || {
            counter += 1;
            format!("c{}", counter)
        };
        assert_eq!(IdSource::next_id(&mut source), "c1");
        assert_eq!(IdSource::next_id(&mut source), "c2");
    }
}
