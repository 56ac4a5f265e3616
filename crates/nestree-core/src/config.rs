//! Engine and history configuration
//!
//! Both structs deserialize with serde defaults, so a partial TOML/JSON
//! document only needs to name the fields it overrides.

use serde::{Deserialize, Serialize};

/// Spacing used when allocating fresh order keys
pub const DEFAULT_ORDER_GAP: i64 = 10;

/// A gap between two neighbors must exceed this to take a midpoint key
pub const DEFAULT_MIN_ORDER_GAP: i64 = 1;

/// Default undo depth before the oldest entries are evicted
pub const DEFAULT_MAX_HISTORY_DEPTH: usize = 1000;

/// Order-key allocation parameters consumed by every structural operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Distance between consecutive keys after append or renormalization
    pub order_gap: i64,
    /// Minimum neighbor gap that still admits a midpoint key
    pub min_order_gap: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            order_gap: DEFAULT_ORDER_GAP,
            min_order_gap: DEFAULT_MIN_ORDER_GAP,
        }
    }
}

impl EngineConfig {
    /// Create a configuration with custom gaps.
    pub fn new(order_gap: i64, min_order_gap: i64) -> Self {
        Self {
            order_gap,
            min_order_gap,
        }
    }

    /// Order gap clamped to at least 1 so allocated keys always advance.
    pub fn effective_gap(&self) -> i64 {
        self.order_gap.max(1)
    }

    /// Minimum midpoint gap clamped to at least 1; a span of 1 never has room.
    pub fn effective_min_gap(&self) -> i64 {
        self.min_order_gap.max(1)
    }
}

/// Configuration for the history store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of entries kept on the undo stack. Oldest entries are
    /// evicted first once the limit is exceeded.
    pub max_depth: usize,
    /// Allocation parameters passed to every operation
    pub engine: EngineConfig,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_HISTORY_DEPTH,
            engine: EngineConfig::default(),
        }
    }
}

impl HistoryConfig {
    pub fn new(max_depth: usize, engine: EngineConfig) -> Self {
        Self { max_depth, engine }
    }

    /// Create unlimited configuration (for testing).
    pub fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
            engine: EngineConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.order_gap, 10);
        assert_eq!(config.min_order_gap, 1);
        assert_eq!(HistoryConfig::default().max_depth, 1000);
    }

    #[test]
    fn test_effective_values_never_drop_below_one() {
        let config = EngineConfig::new(0, -5);
        assert_eq!(config.effective_gap(), 1);
        assert_eq!(config.effective_min_gap(), 1);
    }
}
