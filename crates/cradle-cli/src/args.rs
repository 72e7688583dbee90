use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::RecallCommands;
use crate::session::ResolveArgs;

/// Main command-line interface for the Cradle recall assistant
///
/// Cradle is a guided assistant for resolving product safety recalls. It
/// keeps a local list of recall notices and walks you through a three-step
/// resolution for each one: confirm you own the product, acknowledge every
/// remediation action, and celebrate a completed resolution. It also runs as
/// an MCP (Model Context Protocol) server so AI assistants can drive the
/// same guided flow.
#[derive(Parser)]
#[command(version, about, name = "cradle")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/cradle/cradle.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Cradle CLI
///
/// The CLI is organized into three main command categories:
/// - `recall`: Operations for managing the recall list (add, list, show, etc.)
/// - `resolve`: Walk through the guided resolution flow for one recall
/// - `serve`: Start the MCP server for AI assistant integration
#[derive(Subcommand)]
pub enum Commands {
    /// Manage the recall list
    #[command(alias = "r")]
    Recall {
        #[command(subcommand)]
        command: RecallCommands,
    },
    /// Resolve a recall through the guided three-step flow
    Resolve(ResolveArgs),
    /// Start the MCP server
    Serve,
}
