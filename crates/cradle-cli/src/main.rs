//! Cradle CLI Application
//!
//! Command-line interface for the cradle recall-resolution assistant.

mod args;
mod cli;
mod mcp;
mod renderer;
mod session;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use cradle_core::{params::ListRecalls, RegistryBuilder};
use log::info;
use mcp::{run_stdio_server, CradleMcpServer};
use renderer::TerminalRenderer;
use session::GuidedSession;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let registry = RegistryBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize registry")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Cradle started");

    match command {
        Some(Recall { command }) => {
            Cli::new(registry, renderer)
                .handle_recall_command(command)
                .await
        }
        Some(Resolve(args)) => GuidedSession::new(registry, renderer).run(&args).await,
        Some(Serve) => {
            info!("Starting Cradle MCP server");
            run_stdio_server(CradleMcpServer::new(registry))
                .await
                .context("MCP server failed")
        }
        None => {
            Cli::new(registry, renderer)
                .list_recalls(&ListRecalls::default())
                .await
        }
    }
}
