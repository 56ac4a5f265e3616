//! Init command
//!
//! Usage: nestree init [--root-id <ID>] [--force]

use anyhow::{bail, Result};
use clap::Args;
use nestree_core::create_tree_state;
use nestree_core_types::UuidV7Ids;

use crate::workspace::Workspace;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Root node ID (default: a fresh UUIDv7)
    #[arg(long)]
    pub root_id: Option<String>,

    /// Overwrite an existing tree file
    #[arg(long)]
    pub force: bool,
}

/// Execute init command
pub fn execute(ws: &Workspace, args: InitArgs) -> Result<()> {
    if ws.path().exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            ws.path().display()
        );
    }

    let state = match args.root_id {
        Some(root_id) if root_id.trim().is_empty() => bail!("root id must not be blank"),
        Some(root_id) => create_tree_state(&mut move || root_id.clone()),
        None => create_tree_state(&mut UuidV7Ids),
    };
    ws.save(&state)?;

    println!("✓ Created {} with root {}", ws.path().display(), state.root_id());
    Ok(())
}
