//! nestree CLI
//!
//! Edits a tree stored as a version-1 JSON envelope file.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nestree_core::logging_facility::{init, Profile};

mod commands;
mod config;
mod workspace;

#[derive(Debug, Parser)]
#[command(name = "nestree")]
#[command(about = "nestree - ordered tree editing from the command line", long_about = None)]
struct Cli {
    /// Tree file to operate on
    #[arg(short, long, global = true, default_value = "tree.json")]
    file: PathBuf,

    /// TOML file with engine settings (order_gap, min_order_gap)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Human-readable debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON logs on stderr
    #[arg(long, global = true, conflicts_with = "verbose")]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a new tree file holding only a root
    Init(commands::init::InitArgs),
    /// Insert a node under a parent
    Insert(commands::edit::InsertArgs),
    /// Rename a node
    Rename(commands::edit::RenameArgs),
    /// Delete a node and its subtree
    Delete(commands::edit::DeleteArgs),
    /// Move a node (and its subtree) under another parent
    Move(commands::edit::MoveArgs),
    /// Move a node to a new position among its siblings
    Reorder(commands::edit::ReorderArgs),
    /// Print the tree as an indented outline
    Show(commands::inspect::ShowArgs),
    /// Check the tree file against every tree invariant
    Validate,
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        init(Profile::Development);
    } else if cli.log_json {
        init(Profile::Production);
    }

    let result = config::load(cli.config.as_deref()).and_then(|config| {
        let ws = workspace::Workspace::new(cli.file, config);
        match cli.command {
            Commands::Init(args) => commands::init::execute(&ws, args),
            Commands::Insert(args) => commands::edit::insert(&ws, args),
            Commands::Rename(args) => commands::edit::rename(&ws, args),
            Commands::Delete(args) => commands::edit::delete(&ws, args),
            Commands::Move(args) => commands::edit::move_node(&ws, args),
            Commands::Reorder(args) => commands::edit::reorder(&ws, args),
            Commands::Show(args) => commands::inspect::show(&ws, args),
            Commands::Validate => commands::inspect::validate(&ws),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
