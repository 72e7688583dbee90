//! Command-line interface definitions using clap
//!
//! This module defines the recall subcommands using clap's derive API,
//! implementing the parameter wrapper pattern for clean separation between
//! CLI framework concerns and core domain logic.
//!
//! ## Parameter Wrapper Pattern Implementation
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Business Logic
//! ```
//!
//! Each command defines a clap argument struct here with CLI-specific
//! attributes (flags, aliases, value delimiters) and converts it into the
//! framework-free core parameter type via `From`. Business validation stays
//! in the core, so the CLI and the MCP server behave identically.

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use cradle_core::{
    display::{CreateResult, DeleteResult, OperationStatus, UpdateResult},
    params::{AddRecall, DeleteRecall, Id, ListRecalls, Simulate},
    Registry, SampleSource,
};

use crate::renderer::TerminalRenderer;

/// Record a new recall notice
///
/// CLI wrapper for AddRecall that adds clap-specific argument handling
/// including short/long flags, help text generation, and list parsing.
#[derive(Args)]
pub struct AddRecallArgs {
    /// Unique identifier for the recall
    pub id: String,
    /// Name of the recalled product
    pub product: String,
    /// Hazard severity (low, medium, high, critical)
    #[arg(short, long, value_enum, default_value_t = SeverityArg::Medium)]
    pub severity: SeverityArg,
    /// Description of the hazard
    #[arg(long, help = "Free-text description of the hazard")]
    pub hazard: String,
    /// Remediation actions - comma-separated, in order
    #[arg(
        short,
        long,
        value_delimiter = ',',
        help = "Ordered remediation actions as comma-separated list"
    )]
    pub actions: Vec<String>,
    /// Brand the product is sold under
    #[arg(long)]
    pub brand: Option<String>,
    /// Model identifier printed on the product
    #[arg(long)]
    pub model_number: Option<String>,
    /// Manufacturer issuing the recall
    #[arg(long)]
    pub manufacturer: Option<String>,
    /// Support phone number
    #[arg(long)]
    pub phone: Option<String>,
    /// Support email address
    #[arg(long)]
    pub email: Option<String>,
    /// Recall information website
    #[arg(long)]
    pub website: Option<String>,
}

impl From<AddRecallArgs> for AddRecall {
    fn from(val: AddRecallArgs) -> Self {
        AddRecall {
            id: val.id,
            product: val.product,
            brand: val.brand,
            model_number: val.model_number,
            manufacturer: val.manufacturer,
            severity: val.severity.to_string(),
            hazard: val.hazard,
            actions: val.actions,
            contact_phone: val.phone,
            contact_email: val.email,
            contact_website: val.website,
            media: Vec::new(),
        }
    }
}

/// List recalls
///
/// Shows open recalls by default. Use --all for every recall regardless of
/// status, or --status to narrow to one status.
#[derive(Args)]
pub struct ListRecallsArgs {
    /// Show every recall regardless of status
    #[arg(long, help = "Include resolved and dismissed recalls")]
    pub all: bool,
    /// Only show recalls with this status
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
    /// Only show recalls whose product name contains this text
    #[arg(long)]
    pub product: Option<String>,
    /// Only show recalls at or above this severity
    #[arg(long, value_enum)]
    pub min_severity: Option<SeverityArg>,
}

impl From<ListRecallsArgs> for ListRecalls {
    fn from(val: ListRecallsArgs) -> Self {
        ListRecalls {
            all: val.all,
            status: val.status.map(|s| s.to_string()),
            product: val.product,
            min_severity: val.min_severity.map(|s| s.to_string()),
        }
    }
}

/// Show details of a specific recall
#[derive(Args)]
pub struct ShowRecallArgs {
    /// ID of the recall to display
    #[arg(help = "Unique identifier of the recall to show details for")]
    pub id: String,
}

impl From<ShowRecallArgs> for Id {
    fn from(val: ShowRecallArgs) -> Self {
        Id { id: val.id }
    }
}

/// Return a resolved or dismissed recall to the open list
#[derive(Args)]
pub struct ReopenRecallArgs {
    /// ID of the recall to reopen
    #[arg(help = "Unique identifier of the recall to return to the open list")]
    pub id: String,
}

impl From<ReopenRecallArgs> for Id {
    fn from(val: ReopenRecallArgs) -> Self {
        Id { id: val.id }
    }
}

/// Delete a recall permanently
#[derive(Args)]
pub struct DeleteRecallArgs {
    /// ID of the recall to delete
    #[arg(help = "Unique identifier of the recall to permanently delete")]
    pub id: String,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteRecallArgs> for DeleteRecall {
    fn from(val: DeleteRecallArgs) -> Self {
        DeleteRecall {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

/// Seed the recall list with built-in sample notices
#[derive(Args)]
pub struct SimulateArgs {
    /// Maximum number of sample recalls to add
    #[arg(short, long, help = "Add at most this many sample recalls")]
    pub count: Option<usize>,
}

impl From<SimulateArgs> for Simulate {
    fn from(val: SimulateArgs) -> Self {
        Simulate { count: val.count }
    }
}

#[derive(Subcommand)]
pub enum RecallCommands {
    /// Record a new recall notice
    #[command(alias = "a")]
    Add(AddRecallArgs),
    /// List recalls
    #[command(aliases = ["l", "ls"])]
    List(ListRecallsArgs),
    /// Show details of a specific recall
    #[command(alias = "s")]
    Show(ShowRecallArgs),
    /// Return a resolved or dismissed recall to the open list
    Reopen(ReopenRecallArgs),
    /// Delete a recall permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteRecallArgs),
    /// Seed the recall list with built-in sample notices
    #[command(alias = "sim")]
    Simulate(SimulateArgs),
}

/// Command-line argument representation of severity values
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum SeverityArg {
    /// Low hazard potential
    Low,
    /// Moderate hazard potential
    Medium,
    /// Serious hazard potential
    High,
    /// Immediate hazard
    Critical,
}

impl std::fmt::Display for SeverityArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeverityArg::Low => write!(f, "low"),
            SeverityArg::Medium => write!(f, "medium"),
            SeverityArg::High => write!(f, "high"),
            SeverityArg::Critical => write!(f, "critical"),
        }
    }
}

/// Command-line argument representation of recall status values
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    /// Recall has not been resolved yet
    Open,
    /// Guided resolution was completed
    Resolved,
    /// User does not own the product
    NotApplicable,
}

impl std::fmt::Display for StatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusArg::Open => write!(f, "open"),
            StatusArg::Resolved => write!(f, "resolved"),
            StatusArg::NotApplicable => write!(f, "notapplicable"),
        }
    }
}

/// CLI command handler that pairs the registry with the terminal renderer.
pub struct Cli {
    registry: Registry,
    renderer: TerminalRenderer,
}

impl Cli {
    /// Create a new CLI handler.
    pub fn new(registry: Registry, renderer: TerminalRenderer) -> Self {
        Self { registry, renderer }
    }

    /// Dispatch a recall subcommand.
    pub async fn handle_recall_command(&self, command: RecallCommands) -> Result<()> {
        match command {
            RecallCommands::Add(args) => self.add_recall(&args.into()).await,
            RecallCommands::List(args) => self.list_recalls(&args.into()).await,
            RecallCommands::Show(args) => self.show_recall(&args.into()).await,
            RecallCommands::Reopen(args) => self.reopen_recall(&args.into()).await,
            RecallCommands::Delete(args) => self.delete_recall(&args.into()).await,
            RecallCommands::Simulate(args) => self.simulate(&args.into()).await,
        }
    }

    /// Record a new recall and confirm with its full details.
    async fn add_recall(&self, params: &AddRecall) -> Result<()> {
        let record = self
            .registry
            .add_recall(params)
            .await
            .context("Failed to record recall")?;

        self.renderer
            .render(&CreateResult::new(record).to_string())
    }

    /// List recalls as summaries under a title header.
    pub async fn list_recalls(&self, params: &ListRecalls) -> Result<()> {
        let summaries = self
            .registry
            .list_summaries(params)
            .await
            .context("Failed to list recalls")?;

        let title = if params.all {
            "All Recalls"
        } else if params.status.is_some() {
            "Matching Recalls"
        } else {
            "Open Recalls"
        };

        let output = format!("# {title}\n\n{summaries}");
        self.renderer.render(&output)
    }

    /// Show the full record for one recall.
    async fn show_recall(&self, params: &Id) -> Result<()> {
        let recall = self
            .registry
            .show_recall(params)
            .await
            .context("Failed to load recall")?;

        match recall {
            Some(record) => self.renderer.render(&record.to_string()),
            None => self.renderer.render(
                &OperationStatus::failure(format!("Recall '{}' not found", params.id)).to_string(),
            ),
        }
    }

    /// Return a recall to the open list.
    async fn reopen_recall(&self, params: &Id) -> Result<()> {
        let updated = self
            .registry
            .reopen(params)
            .await
            .context("Failed to reopen recall")?;

        match updated {
            Some(record) => {
                let changes = vec!["Returned to the open list".to_string()];
                self.renderer
                    .render(&UpdateResult::with_changes(record, changes).to_string())
            }
            None => self.renderer.render(
                &OperationStatus::failure(format!("Recall '{}' not found", params.id)).to_string(),
            ),
        }
    }

    /// Permanently delete a recall (requires --confirm).
    async fn delete_recall(&self, params: &DeleteRecall) -> Result<()> {
        let deleted = self
            .registry
            .delete_recall(params)
            .await
            .context("Failed to delete recall")?;

        match deleted {
            Some(record) => self.renderer.render(&DeleteResult::new(record).to_string()),
            None => self.renderer.render(
                &OperationStatus::failure(format!("Recall '{}' not found", params.id)).to_string(),
            ),
        }
    }

    /// Seed sample recalls through the built-in source.
    async fn simulate(&self, params: &Simulate) -> Result<()> {
        let added = self
            .registry
            .seed_from_source(&SampleSource::new(), params.count)
            .await
            .context("Failed to seed sample recalls")?;

        if added.is_empty() {
            return self.renderer.render(
                &OperationStatus::success("All sample recalls are already present".to_string())
                    .to_string(),
            );
        }

        let mut output = format!("# Added {} sample recall(s)\n\n", added.len());
        for record in &added {
            output.push_str(&format!("- {} ({})\n", record.product, record.id));
        }
        self.renderer.render(&output)
    }
}
