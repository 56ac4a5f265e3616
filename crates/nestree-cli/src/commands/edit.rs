//! Editing commands
//!
//! Each command loads the tree file, runs one operation through a
//! `HistoryStore`, and writes the result back only if it succeeded.

use anyhow::{bail, Context, Result};
use clap::Args;
use nestree_core::Node;
use nestree_core_types::{IdSource, UuidV7Ids};

use crate::workspace::Workspace;

#[derive(Debug, Args)]
pub struct InsertArgs {
    /// Name of the new node
    pub name: String,

    /// Parent node ID (default: the root)
    #[arg(short, long)]
    pub parent: Option<String>,

    /// ID for the new node (default: a fresh UUIDv7)
    #[arg(long)]
    pub id: Option<String>,

    /// Requested order key; omit to append after the last sibling
    #[arg(long, allow_hyphen_values = true)]
    pub order_key: Option<String>,
}

#[derive(Debug, Args)]
pub struct RenameArgs {
    /// Node ID to rename
    pub node_id: String,

    /// New name
    pub name: String,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Node ID to delete (with its subtree)
    pub node_id: String,
}

#[derive(Debug, Args)]
pub struct MoveArgs {
    /// Node ID to move
    pub node_id: String,

    /// Destination parent ID
    #[arg(long)]
    pub to: String,

    /// Position among the destination's children (default: last)
    #[arg(long)]
    pub index: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ReorderArgs {
    /// Node ID to reposition
    pub node_id: String,

    /// New index among its siblings (clamped to the last position)
    pub index: usize,
}

/// Execute insert command
pub fn insert(ws: &Workspace, args: InsertArgs) -> Result<()> {
    let mut store = ws.open_store()?;
    let parent_id = args
        .parent
        .unwrap_or_else(|| store.snapshot().root_id().to_string());
    let node_id = match args.id {
        Some(id) if id.trim().is_empty() => bail!("node id must not be blank"),
        Some(id) => id,
        None => UuidV7Ids.next_id(),
    };

    let mut node = Node::new(node_id.clone(), args.name);
    if let Some(order_key) = args.order_key {
        node = node.with_order_key(order_key);
    }

    let state = store
        .insert_node(&parent_id, node)
        .with_context(|| format!("cannot insert under {parent_id}"))?;
    ws.save(&state)?;

    println!("✓ Inserted {node_id}");
    Ok(())
}

/// Execute rename command
pub fn rename(ws: &Workspace, args: RenameArgs) -> Result<()> {
    let mut store = ws.open_store()?;
    let existing = store
        .snapshot()
        .node(&args.node_id)
        .cloned()
        .with_context(|| format!("node {} not found", args.node_id))?;

    let state = store.update_node(
        &args.node_id,
        Node {
            name: args.name,
            ..existing
        },
    )?;
    ws.save(&state)?;

    println!("✓ Renamed {}", args.node_id);
    Ok(())
}

/// Execute delete command
pub fn delete(ws: &Workspace, args: DeleteArgs) -> Result<()> {
    let mut store = ws.open_store()?;
    let before = store.snapshot().len();
    let state = store.delete_node(&args.node_id)?;
    ws.save(&state)?;

    println!(
        "✓ Deleted {} ({} node(s) removed)",
        args.node_id,
        before - state.len()
    );
    Ok(())
}

/// Execute move command
pub fn move_node(ws: &Workspace, args: MoveArgs) -> Result<()> {
    let mut store = ws.open_store()?;
    let state = store.move_node_to(&args.node_id, &args.to, args.index)?;
    ws.save(&state)?;

    println!("✓ Moved {} under {}", args.node_id, args.to);
    Ok(())
}

/// Execute reorder command
pub fn reorder(ws: &Workspace, args: ReorderArgs) -> Result<()> {
    let mut store = ws.open_store()?;
    let state = store.reorder_sibling(&args.node_id, args.index)?;
    ws.save(&state)?;

    println!("✓ Reordered {}", args.node_id);
    Ok(())
}
