//! MCP tool handlers implementation

use std::sync::Arc;

use cradle_core::{
    display::{ChecklistItems, CreateResult, DeleteResult, OperationStatus},
    flow::{CommandOutcome, FlowController, FlowEvent, FlowStep},
    params as core,
    Registry, SampleSource,
};
use log::debug;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{
        CallToolResult, Content, GetPromptRequestParam, GetPromptResult, ListPromptsResult,
        PaginatedRequestParam, Prompt, PromptArgument, PromptMessage, PromptMessageContent,
        PromptMessageRole,
    },
    service::RequestContext,
    ErrorData, RoleServer,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::{prompts::get_prompt_templates, to_mcp_error};

// ============================================================================
// Generic Parameter Wrapper Implementation
// ============================================================================
//
// This generic wrapper implements the parameter wrapper pattern for the MCP
// side: core parameter types are wrapped in a transparent serde container
// that adds the MCP-specific derives (Deserialize, JsonSchema) without
// polluting the core types.

/// Generic MCP wrapper for core parameter types with serde integration
///
/// Provides JSON deserialization and schema generation for any parameter
/// type, eliminating the need for individual wrapper structs while
/// maintaining the same functionality and type safety.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

// Type aliases for cleaner usage in function signatures
pub type Id = McpParams<core::Id>;
pub type AddRecall = McpParams<core::AddRecall>;
pub type ListRecalls = McpParams<core::ListRecalls>;
pub type DeleteRecall = McpParams<core::DeleteRecall>;
pub type Simulate = McpParams<core::Simulate>;
pub type ConfirmOwnership = McpParams<core::ConfirmOwnership>;
pub type ToggleAction = McpParams<core::ToggleAction>;

pub type McpResult = Result<CallToolResult, ErrorData>;

/// Handler implementations for the MCP server
pub struct McpHandlers {
    registry: Arc<Mutex<Registry>>,
    session: Arc<Mutex<Option<FlowController>>>,
}

impl McpHandlers {
    pub fn new(registry: Arc<Mutex<Registry>>, session: Arc<Mutex<Option<FlowController>>>) -> Self {
        Self { registry, session }
    }

    fn text_result(text: String) -> McpResult {
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    // ------------------------------------------------------------------
    // Recall list tools
    // ------------------------------------------------------------------

    pub async fn list_recalls(&self, Parameters(params): Parameters<ListRecalls>) -> McpResult {
        debug!("list_recalls: {:?}", params);

        let registry = self.registry.lock().await;
        let summaries = registry
            .list_summaries(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list recalls", &e))?;

        Self::text_result(summaries.to_string())
    }

    pub async fn show_recall(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_recall: {:?}", params);

        let registry = self.registry.lock().await;
        let inner_params = params.as_ref();
        let recall = registry
            .show_recall(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to load recall", &e))?
            .ok_or_else(|| {
                ErrorData::internal_error(
                    format!("Recall '{}' not found", inner_params.id),
                    None,
                )
            })?;

        Self::text_result(recall.to_string())
    }

    pub async fn add_recall(&self, Parameters(params): Parameters<AddRecall>) -> McpResult {
        debug!("add_recall: {:?}", params);

        let registry = self.registry.lock().await;
        let record = registry
            .add_recall(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to record recall", &e))?;

        Self::text_result(CreateResult::new(record).to_string())
    }

    pub async fn simulate_recalls(&self, Parameters(params): Parameters<Simulate>) -> McpResult {
        debug!("simulate_recalls: {:?}", params);

        let registry = self.registry.lock().await;
        let added = registry
            .seed_from_source(&SampleSource::new(), params.as_ref().count)
            .await
            .map_err(|e| to_mcp_error("Failed to seed sample recalls", &e))?;

        if added.is_empty() {
            return Self::text_result("All sample recalls are already present".to_string());
        }

        let mut lines = vec![format!("Added {} sample recall(s):", added.len())];
        for record in &added {
            lines.push(format!("- {} ({})", record.product, record.id));
        }
        Self::text_result(lines.join("\n"))
    }

    pub async fn reopen_recall(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("reopen_recall: {:?}", params);

        let registry = self.registry.lock().await;
        let inner_params = params.as_ref();
        let updated = registry
            .reopen(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to reopen recall", &e))?;

        match updated {
            Some(record) => Self::text_result(format!(
                "Recall {} ({}) returned to the open list",
                record.id, record.product
            )),
            None => Self::text_result(
                OperationStatus::failure(format!("Recall '{}' not found", inner_params.id))
                    .to_string(),
            ),
        }
    }

    pub async fn delete_recall(&self, Parameters(params): Parameters<DeleteRecall>) -> McpResult {
        debug!("delete_recall: {:?}", params);

        let registry = self.registry.lock().await;
        let inner_params = params.as_ref();
        let deleted = registry
            .delete_recall(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to delete recall", &e))?;

        match deleted {
            Some(record) => Self::text_result(DeleteResult::new(record).to_string()),
            None => Self::text_result(
                OperationStatus::failure(format!("Recall '{}' not found", inner_params.id))
                    .to_string(),
            ),
        }
    }

    // ------------------------------------------------------------------
    // Guided flow tools
    // ------------------------------------------------------------------

    pub async fn open_flow(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("open_flow: {:?}", params);

        let inner_params = params.as_ref();
        let registry = self.registry.lock().await;
        let Some(record) = registry
            .get_recall(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to load recall", &e))?
        else {
            return Self::text_result(
                OperationStatus::failure(format!("Recall '{}' not found", inner_params.id))
                    .to_string(),
            );
        };

        if !record.status.is_open() {
            return Self::text_result(
                OperationStatus::failure(format!(
                    "Recall '{}' is already closed ({}). Use reopen_recall to revisit it.",
                    record.id,
                    record.status.as_str()
                ))
                .to_string(),
            );
        }

        // Opening always starts a fresh session; any previous session is
        // discarded without an outcome, exactly like an external close.
        let flow =
            FlowController::open(record).with_progress_sink(Box::new(registry.progress_sink()));
        drop(registry);

        let mut slot = self.session.lock().await;
        let screen = Self::step_screen(&flow);
        *slot = Some(flow);

        Self::text_result(screen)
    }

    pub async fn flow_status(&self) -> McpResult {
        let slot = self.session.lock().await;
        match slot.as_ref() {
            Some(flow) => Self::text_result(Self::step_screen(flow)),
            None => Self::text_result(
                "No active resolution session. Use open_flow with a recall ID to start one."
                    .to_string(),
            ),
        }
    }

    pub async fn confirm_ownership(
        &self,
        Parameters(params): Parameters<ConfirmOwnership>,
    ) -> McpResult {
        let owns = params.as_ref().owns;
        debug!("confirm_ownership: owns={owns}");
        self.drive(|flow| flow.confirm(owns)).await
    }

    pub async fn toggle_action(&self, Parameters(params): Parameters<ToggleAction>) -> McpResult {
        let index = params.as_ref().index;
        debug!("toggle_action: index={index}");
        self.drive(|flow| flow.toggle(index)).await
    }

    pub async fn proceed(&self) -> McpResult {
        debug!("proceed");
        self.drive(|flow| flow.proceed()).await
    }

    pub async fn go_back(&self) -> McpResult {
        debug!("go_back");
        self.drive(|flow| flow.back()).await
    }

    pub async fn finish_flow(&self) -> McpResult {
        debug!("finish_flow");
        self.drive(|flow| flow.finish()).await
    }

    pub async fn close_flow(&self) -> McpResult {
        debug!("close_flow");
        self.drive(|flow| flow.close()).await
    }

    /// Run one command against the active session, apply the resulting
    /// events, and render the next screen.
    async fn drive<F>(&self, command: F) -> McpResult
    where
        F: FnOnce(&mut FlowController) -> CommandOutcome,
    {
        let mut slot = self.session.lock().await;
        let Some(flow) = slot.as_mut() else {
            return Self::text_result(
                "No active resolution session. Use open_flow with a recall ID to start one."
                    .to_string(),
            );
        };

        match command(flow) {
            CommandOutcome::Rejected { reason } => Self::text_result(
                OperationStatus::failure(format!(
                    "Command rejected ({}); the session is unchanged.",
                    reason.as_str()
                ))
                .to_string(),
            ),
            CommandOutcome::Applied { events } => {
                let recall = flow.recall().clone();
                let mut lines = self.apply_events(&recall, &events).await?;

                lines.push(Self::step_screen(flow));
                if flow.is_closed() {
                    *slot = None;
                }

                Self::text_result(lines.join("\n\n"))
            }
        }
    }

    /// Apply flow events: outcomes update the recall list, everything else
    /// becomes response text.
    async fn apply_events(
        &self,
        recall: &cradle_core::RecallRecord,
        events: &[FlowEvent],
    ) -> Result<Vec<String>, ErrorData> {
        let mut lines = Vec::new();
        for event in events {
            match event {
                FlowEvent::Transitioned(_) => {}
                FlowEvent::Notice { message } => lines.push(message.clone()),
                FlowEvent::VisualGuideRequested { .. } => {
                    if recall.media.is_empty() {
                        lines.push(
                            "The model number is usually printed on a label on the underside \
                             or back of the product."
                                .to_string(),
                        );
                    } else {
                        let mut guides = String::from("These guides can help:");
                        for reference in &recall.media {
                            guides.push_str(&format!("\n- {reference}"));
                        }
                        lines.push(guides);
                    }
                }
                FlowEvent::Resolved { recall_id, .. } => {
                    let registry = self.registry.lock().await;
                    registry
                        .apply_flow_event(event)
                        .await
                        .map_err(|e| to_mcp_error("Failed to mark recall resolved", &e))?;
                    lines.push(format!(
                        "Recall {recall_id} is resolved; the recall list has been updated."
                    ));
                }
                FlowEvent::NotApplicable { recall_id } => {
                    let registry = self.registry.lock().await;
                    registry
                        .apply_flow_event(event)
                        .await
                        .map_err(|e| to_mcp_error("Failed to dismiss recall", &e))?;
                    lines.push(format!(
                        "Recall {recall_id} has been marked not applicable."
                    ));
                }
            }
        }
        Ok(lines)
    }

    /// Render the current step as a markdown screen with tool hints.
    fn step_screen(flow: &FlowController) -> String {
        match flow.current_step() {
            FlowStep::Ownership => format!(
                "# Step 1 of 3: Do you have this product?\n\n{}\nAnswer with confirm_ownership \
                 (owns: true/false).",
                flow.recall()
            ),
            FlowStep::Checklist => format!(
                "# Step 2 of 3: Remediation checklist\n\n{}\nAcknowledge items with \
                 toggle_action (0-based index); the first item is already done. Call proceed \
                 once every item is acknowledged.",
                ChecklistItems(flow.checklist().items())
            ),
            FlowStep::Summary => {
                let mut screen = String::from("# Step 3 of 3: All actions handled\n\n");
                for action in flow.summary_items() {
                    screen.push_str(&format!("- ✓ {action}\n"));
                }
                screen.push_str(
                    "\nCall finish_flow to complete the resolution, or go_back to revisit the \
                     checklist.",
                );
                screen
            }
            FlowStep::Closed => "The session is closed.".to_string(),
        }
    }

    // ------------------------------------------------------------------
    // Prompts
    // ------------------------------------------------------------------

    /// List all available prompts
    pub async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, ErrorData> {
        debug!("list_prompts");

        let prompts = get_prompt_templates()
            .iter()
            .map(|template| {
                Prompt::new(
                    &template.name,
                    Some(&template.description),
                    Some(
                        template
                            .arguments
                            .iter()
                            .map(|arg| PromptArgument {
                                name: arg.name.clone(),
                                title: None,
                                description: Some(arg.description.clone()),
                                required: Some(arg.required),
                            })
                            .collect(),
                    ),
                )
            })
            .collect();

        Ok(ListPromptsResult {
            next_cursor: None,
            prompts,
        })
    }

    /// Get a specific prompt by name and apply arguments
    pub async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, ErrorData> {
        debug!("get_prompt: {}", request.name);

        let templates = get_prompt_templates();
        let template = templates
            .iter()
            .find(|t| t.name == request.name)
            .ok_or_else(|| ErrorData::invalid_params("Prompt not found", None))?;

        let mut prompt_text = template.template.clone();

        // Apply argument substitution if arguments are provided
        if let Some(args) = &request.arguments {
            for arg_def in &template.arguments {
                if let Some(arg_value) = args.get(&arg_def.name) {
                    if let Some(arg_str) = arg_value.as_str() {
                        let placeholder = format!("{{{}}}", arg_def.name);
                        prompt_text = prompt_text.replace(&placeholder, arg_str);
                    } else if arg_def.required {
                        return Err(ErrorData::invalid_params(
                            format!("Argument '{}' must be a string", arg_def.name),
                            None,
                        ));
                    }
                } else if arg_def.required {
                    return Err(ErrorData::invalid_params(
                        format!("Required argument '{}' is missing", arg_def.name),
                        None,
                    ));
                }
            }
        } else {
            let required_args: Vec<_> = template
                .arguments
                .iter()
                .filter(|arg| arg.required)
                .map(|arg| arg.name.as_str())
                .collect();
            if !required_args.is_empty() {
                return Err(ErrorData::invalid_params(
                    format!("Required arguments missing: {}", required_args.join(", ")),
                    None,
                ));
            }
        }

        Ok(GetPromptResult {
            description: Some(template.description.clone()),
            messages: vec![PromptMessage {
                role: PromptMessageRole::User,
                content: PromptMessageContent::text(prompt_text),
            }],
        })
    }
}
