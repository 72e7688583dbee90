//! MCP server implementation for Cradle
//!
//! This module implements the Model Context Protocol server for Cradle,
//! providing a standardized interface for AI assistants to manage the recall
//! list and drive the guided resolution flow on the user's behalf.

use std::sync::Arc;

use anyhow::Result;
use cradle_core::{flow::FlowController, Registry};
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        GetPromptRequestParam, GetPromptResult, Implementation, ListPromptsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};

pub mod errors;
pub mod handlers;
pub mod prompts;

pub use errors::to_mcp_error;
// Re-export parameter types and result type from handlers for external use
pub use handlers::{
    AddRecall, ConfirmOwnership, DeleteRecall, Id, ListRecalls, McpResult, Simulate, ToggleAction,
};

/// MCP server for Cradle
#[derive(Clone)]
pub struct CradleMcpServer {
    registry: Arc<Mutex<Registry>>,
    session: Arc<Mutex<Option<FlowController>>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl CradleMcpServer {
    /// Create a new Cradle MCP server
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(Mutex::new(registry)),
            session: Arc::new(Mutex::new(None)),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.registry.clone(), self.session.clone())
    }

    // Tool methods that delegate to handlers::McpHandlers methods
    #[tool(
        name = "list_recalls",
        description = "List product recalls. By default shows only open recalls with their severity and checklist progress. Use all=true for every recall, or status='resolved'/'notapplicable' to see closed ones. Supports product text and min_severity filters."
    )]
    async fn list_recalls(&self, params: Parameters<ListRecalls>) -> McpResult {
        self.handlers().list_recalls(params).await
    }

    #[tool(
        name = "show_recall",
        description = "Display complete details of a specific recall: product identification, hazard severity and description, the ordered remediation actions, and manufacturer contact channels. Use the recall ID to retrieve."
    )]
    async fn show_recall(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_recall(params).await
    }

    #[tool(
        name = "add_recall",
        description = "Record a new recall notice in the list. Requires id, product, severity ('low'/'medium'/'high'/'critical'), hazard description, and at least one remediation action. Optional: brand, model_number, manufacturer, and contact channels."
    )]
    async fn add_recall(&self, params: Parameters<AddRecall>) -> McpResult {
        self.handlers().add_recall(params).await
    }

    #[tool(
        name = "simulate_recalls",
        description = "Seed the recall list with built-in sample notices for demonstration. Optionally limit how many samples are added with count. Samples that already exist are skipped, so this is safe to repeat."
    )]
    async fn simulate_recalls(&self, params: Parameters<Simulate>) -> McpResult {
        self.handlers().simulate_recalls(params).await
    }

    #[tool(
        name = "reopen_recall",
        description = "Return a resolved or dismissed recall to the open list, clearing its resolution timestamp and any saved checklist progress. Use when an outcome was recorded by mistake or the situation changed."
    )]
    async fn reopen_recall(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().reopen_recall(params).await
    }

    #[tool(
        name = "delete_recall",
        description = "Permanently delete a recall and its saved progress from the list. This cannot be undone and requires confirmed=true. Consider reopen_recall instead if the recall may matter later."
    )]
    async fn delete_recall(&self, params: Parameters<DeleteRecall>) -> McpResult {
        self.handlers().delete_recall(params).await
    }

    #[tool(
        name = "open_flow",
        description = "Start a guided resolution session for an open recall. Always begins at step 1 (ownership confirmation) with fresh state; any previous session is discarded without recording an outcome. Returns the step-1 screen."
    )]
    async fn open_flow(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().open_flow(params).await
    }

    #[tool(
        name = "flow_status",
        description = "Show the current step of the active resolution session: the recall details on step 1, the checklist with acknowledgement state on step 2, or the completion summary on step 3."
    )]
    async fn flow_status(&self) -> McpResult {
        self.handlers().flow_status().await
    }

    #[tool(
        name = "confirm_ownership",
        description = "Answer the step-1 ownership question. owns=true advances to the remediation checklist; owns=false ends the session and marks the recall not applicable in the list. Only valid on step 1."
    )]
    async fn confirm_ownership(&self, params: Parameters<ConfirmOwnership>) -> McpResult {
        self.handlers().confirm_ownership(params).await
    }

    #[tool(
        name = "toggle_action",
        description = "Flip the acknowledged state of one checklist item by 0-based index. The first item is locked (pre-acknowledged) and cannot be toggled. Only valid on step 2. Progress is snapshotted automatically after each change."
    )]
    async fn toggle_action(&self, params: Parameters<ToggleAction>) -> McpResult {
        self.handlers().toggle_action(params).await
    }

    #[tool(
        name = "proceed",
        description = "Advance from the checklist to the completion summary. Rejected (with no state change) unless every checklist item is acknowledged. Only valid on step 2."
    )]
    async fn proceed(&self) -> McpResult {
        self.handlers().proceed().await
    }

    #[tool(
        name = "go_back",
        description = "Return to the previous step: from the checklist to ownership confirmation, or from the summary to the checklist. Re-entering the checklist resets it to a fresh state with only the locked item acknowledged."
    )]
    async fn go_back(&self) -> McpResult {
        self.handlers().go_back().await
    }

    #[tool(
        name = "finish_flow",
        description = "Complete the resolution from the summary step. Records the resolution timestamp, marks the recall resolved in the list, and closes the session. Only valid on step 3."
    )]
    async fn finish_flow(&self) -> McpResult {
        self.handlers().finish_flow().await
    }

    #[tool(
        name = "close_flow",
        description = "Cancel the active resolution session from outside. The session state is discarded and no outcome is recorded; the recall stays open and can be resolved later."
    )]
    async fn close_flow(&self) -> McpResult {
        self.handlers().close_flow().await
    }

    /// List all available prompts
    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        self.handlers().list_prompts(request, context).await
    }

    /// Get a specific prompt by name and apply arguments
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.handlers().get_prompt(request, context).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for CradleMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: "cradle".to_string(),
                title: None,
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(r#"Cradle is a guided assistant for resolving product safety recalls. It keeps a local recall list and walks the user through a three-step resolution flow for each recall.

## Core Concepts
- **Recalls**: Safety notices with a severity, hazard description, ordered remediation actions, and manufacturer contact channels. Each is open, resolved, or not applicable.
- **Resolution flow**: A strict three-step session per recall: (1) confirm the user owns the product, (2) acknowledge every remediation action, (3) finish and celebrate. The flow enforces its own gating; commands that don't fit the current step are rejected without changing anything.

## Workflow Examples

### Resolving a Recall
1. `open_flow` with the recall ID - shows the product and the ownership question
2. `confirm_ownership` with the user's answer - "no" ends the flow and marks the recall not applicable
3. `toggle_action` for each action the user has completed (the first is pre-acknowledged)
4. `proceed` once everything is acknowledged, then `finish_flow` to record the resolution

### Managing the List
- `list_recalls` to see open recalls by severity and progress
- `show_recall` for full hazard details and contact info
- `simulate_recalls` to seed demonstration data
- `reopen_recall` to undo an outcome recorded by mistake

## Best Practices
- Only acknowledge actions the user has actually confirmed doing
- Use `flow_status` to re-orient instead of guessing the current step
- One session is active at a time; `open_flow` replaces any previous session without recording an outcome

## Tool Categories
- **Recall list**: list_recalls, show_recall, add_recall, simulate_recalls, reopen_recall, delete_recall
- **Guided flow**: open_flow, flow_status, confirm_ownership, toggle_action, proceed, go_back, finish_flow, close_flow"#.to_string()),
        }
    }

    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        self.list_prompts(request, context).await
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.get_prompt(request, context).await
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: CradleMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Cradle MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    // Set up signal handlers for graceful shutdown
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
