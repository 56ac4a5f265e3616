//! Tree file access shared by every subcommand

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use nestree_core::{EngineConfig, HistoryConfig, HistoryStore, TreeState};
use nestree_json::{from_envelope_str, to_envelope_string};

/// The tree file plus the engine settings to edit it with
pub struct Workspace {
    path: PathBuf,
    config: EngineConfig,
}

impl Workspace {
    pub fn new(path: PathBuf, config: EngineConfig) -> Self {
        Self { path, config }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the tree file
    pub fn load(&self) -> Result<TreeState> {
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        from_envelope_str(&text).with_context(|| format!("failed to load {}", self.path.display()))
    }

    /// Load the tree into a history store for a single edit
    pub fn open_store(&self) -> Result<HistoryStore> {
        let state = self.load()?;
        Ok(HistoryStore::with_state(
            state,
            HistoryConfig::new(1, self.config),
        ))
    }

    /// Write a snapshot back to the tree file
    pub fn save(&self, state: &TreeState) -> Result<()> {
        let text = to_envelope_string(state)?;
        std::fs::write(&self.path, text)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}
