//! Read-only commands

use anyhow::Result;
use clap::Args;
use nestree_core::render::{render_outline, render_subtree};
use nestree_core::validate_tree;

use crate::workspace::Workspace;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Only show the subtree rooted at this node
    #[arg(long)]
    pub node: Option<String>,
}

/// Execute show command
pub fn show(ws: &Workspace, args: ShowArgs) -> Result<()> {
    let state = ws.load()?;

    let outline = match args.node {
        Some(node_id) => render_subtree(&state, &node_id)?,
        None => render_outline(&state),
    };

    print!("{}", outline);
    Ok(())
}

/// Execute validate command
///
/// Loading already runs boundary validation; the engine check is repeated
/// so the report names the invariant.
pub fn validate(ws: &Workspace) -> Result<()> {
    let state = ws.load()?;
    validate_tree(&state)?;

    println!("✓ {} is valid ({} nodes)", ws.path().display(), state.len());
    Ok(())
}
