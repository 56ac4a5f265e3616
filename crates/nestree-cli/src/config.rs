//! CLI configuration file
//!
//! ```toml
//! order_gap = 100
//! min_order_gap = 1
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use nestree_core::EngineConfig;

/// Load engine settings, falling back to defaults when no file is given
pub fn load(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: EngineConfig = toml::from_str(&text)
        .with_context(|| format!("invalid config {}", path.display()))?;

    tracing::debug!(
        order_gap = config.order_gap,
        min_order_gap = config.min_order_gap,
        "loaded config"
    );
    Ok(config)
}
