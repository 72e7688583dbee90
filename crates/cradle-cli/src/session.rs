//! Interactive guided resolution session.
//!
//! This module is the parent screen for the flow controller: it loads a
//! recall from the registry, renders each step, forwards the user's choices
//! as flow commands, and applies the outcome events back to the recall list.
//! The flow controller owns all step state; this module never decides a
//! transition itself.

use anyhow::{Context, Result};
use clap::Args;
use cradle_core::{
    display::{ChecklistItems, OperationStatus},
    flow::{FlowController, FlowEvent, FlowStep},
    models::RecallRecord,
    params::Id,
    Registry,
};
use dialoguer::{theme::ColorfulTheme, Select};
use log::debug;

use crate::renderer::TerminalRenderer;

/// Resolve a recall through the guided three-step flow
///
/// Runs interactively by default. The scripted flags drive the whole flow
/// without prompts, for automation: --not-owned answers "no" to the
/// ownership question, --acknowledge-all answers "yes", acknowledges every
/// action, and finishes the flow.
#[derive(Args)]
pub struct ResolveArgs {
    /// ID of the recall to resolve
    pub id: String,

    /// Answer "no" to the ownership question and exit (scripted mode)
    #[arg(long, conflicts_with = "acknowledge_all")]
    pub not_owned: bool,

    /// Acknowledge every action and finish the flow (scripted mode)
    #[arg(long)]
    pub acknowledge_all: bool,
}

/// Drives one guided resolution session against the registry.
pub struct GuidedSession {
    registry: Registry,
    renderer: TerminalRenderer,
}

impl GuidedSession {
    /// Create a session driver.
    pub fn new(registry: Registry, renderer: TerminalRenderer) -> Self {
        Self { registry, renderer }
    }

    /// Run the guided flow for the recall named in `args`.
    pub async fn run(&self, args: &ResolveArgs) -> Result<()> {
        let params = Id {
            id: args.id.clone(),
        };
        let Some(record) = self
            .registry
            .get_recall(&params)
            .await
            .context("Failed to load recall")?
        else {
            return self.renderer.render(
                &OperationStatus::failure(format!("Recall '{}' not found", args.id)).to_string(),
            );
        };

        if !record.status.is_open() {
            return self.renderer.render(
                &OperationStatus::failure(format!(
                    "Recall '{}' is already closed ({}). Use `cradle recall reopen` to revisit it.",
                    record.id,
                    record.status.as_str()
                ))
                .to_string(),
            );
        }

        let mut flow = FlowController::open(record)
            .with_progress_sink(Box::new(self.registry.progress_sink()));

        if args.not_owned {
            let outcome = flow.confirm(false);
            return self.apply_events(flow.recall(), outcome.events()).await;
        }

        if args.acknowledge_all {
            return self.run_scripted(&mut flow).await;
        }

        self.run_interactive(&mut flow).await
    }

    /// Scripted happy path: own it, acknowledge everything, finish.
    async fn run_scripted(&self, flow: &mut FlowController) -> Result<()> {
        let outcome = flow.confirm(true);
        self.apply_events(flow.recall(), outcome.events()).await?;

        let pending: Vec<usize> = flow
            .checklist()
            .items()
            .iter()
            .filter(|item| !item.acknowledged)
            .map(|item| item.index)
            .collect();
        for index in pending {
            let outcome = flow.toggle(index);
            self.apply_events(flow.recall(), outcome.events()).await?;
        }

        let outcome = flow.proceed();
        self.apply_events(flow.recall(), outcome.events()).await?;

        let outcome = flow.finish();
        self.apply_events(flow.recall(), outcome.events()).await
    }

    /// Interactive loop: render the current step and forward one choice at a
    /// time until the session closes.
    async fn run_interactive(&self, flow: &mut FlowController) -> Result<()> {
        let theme = ColorfulTheme::default();

        while !flow.is_closed() {
            match flow.current_step() {
                FlowStep::Ownership => self.ownership_step(flow, &theme).await?,
                FlowStep::Checklist => self.checklist_step(flow, &theme).await?,
                FlowStep::Summary => self.summary_step(flow, &theme).await?,
                FlowStep::Closed => break,
            }
        }

        Ok(())
    }

    async fn ownership_step(
        &self,
        flow: &mut FlowController,
        theme: &ColorfulTheme,
    ) -> Result<()> {
        self.renderer.render(&flow.recall().to_string())?;

        let choice = Select::with_theme(theme)
            .with_prompt("Do you have this product?")
            .items(&[
                "Yes, I have it",
                "No, I don't have it",
                "Help me find the model number",
                "Cancel",
            ])
            .default(0)
            .interact()
            .context("Prompt failed")?;

        let outcome = match choice {
            0 => flow.confirm(true),
            1 => flow.confirm(false),
            2 => flow.request_visual_guide(),
            _ => flow.close(),
        };
        self.apply_events(flow.recall(), outcome.events()).await
    }

    async fn checklist_step(
        &self,
        flow: &mut FlowController,
        theme: &ColorfulTheme,
    ) -> Result<()> {
        let checklist = flow.checklist();
        let header = format!(
            "# Step 2 of 3: Work through the checklist\n\n{}",
            ChecklistItems(checklist.items())
        );
        self.renderer.render(&header)?;

        let mut options: Vec<String> = checklist
            .items()
            .iter()
            .map(|item| {
                if item.locked {
                    format!("{} (already done)", item.label)
                } else if item.acknowledged {
                    format!("Undo: {}", item.label)
                } else {
                    item.label.clone()
                }
            })
            .collect();
        let continue_index = options.len();
        options.push(if checklist.is_complete() {
            "Continue".to_string()
        } else {
            "Continue (acknowledge everything first)".to_string()
        });
        options.push("Go back".to_string());
        options.push("Cancel".to_string());

        let choice = Select::with_theme(theme)
            .with_prompt("Mark an action as done")
            .items(&options)
            .default(0)
            .interact()
            .context("Prompt failed")?;

        let outcome = if choice < continue_index {
            flow.toggle(choice)
        } else if choice == continue_index {
            flow.proceed()
        } else if choice == continue_index + 1 {
            flow.back()
        } else {
            flow.close()
        };

        // Rejected commands (locked item, incomplete checklist) change
        // nothing; the next loop iteration simply re-renders the step.
        self.apply_events(flow.recall(), outcome.events()).await
    }

    async fn summary_step(&self, flow: &mut FlowController, theme: &ColorfulTheme) -> Result<()> {
        let mut summary = String::from("# Step 3 of 3: You took care of it\n\n");
        for action in flow.summary_items() {
            summary.push_str(&format!("- ✓ {action}\n"));
        }
        self.renderer.render(&summary)?;

        let choice = Select::with_theme(theme)
            .with_prompt("All set")
            .items(&["Finish", "Share the summary", "Go back", "Cancel"])
            .default(0)
            .interact()
            .context("Prompt failed")?;

        let outcome = match choice {
            0 => flow.finish(),
            1 => flow.share(),
            2 => flow.back(),
            _ => flow.close(),
        };
        self.apply_events(flow.recall(), outcome.events()).await
    }

    /// Apply a batch of flow events: outcomes update the registry, notices
    /// and guides render, transitions are logged.
    async fn apply_events(&self, recall: &RecallRecord, events: &[FlowEvent]) -> Result<()> {
        for event in events {
            match event {
                FlowEvent::Transitioned(transition) => {
                    debug!(
                        "flow transition {} -> {} ({})",
                        transition.from.as_str(),
                        transition.to.as_str(),
                        transition.direction.as_str()
                    );
                }
                FlowEvent::Notice { message } => {
                    self.renderer
                        .render(&OperationStatus::success(message.clone()).to_string())?;
                }
                FlowEvent::VisualGuideRequested { .. } => {
                    if recall.media.is_empty() {
                        self.renderer.render(
                            "The model number is usually printed on a label on the underside \
                             or back of the product.\n",
                        )?;
                    } else {
                        let mut guides = String::from("These guides can help:\n\n");
                        for reference in &recall.media {
                            guides.push_str(&format!("- {reference}\n"));
                        }
                        self.renderer.render(&guides)?;
                    }
                }
                FlowEvent::Resolved { recall_id, .. } => {
                    self.registry
                        .apply_flow_event(event)
                        .await
                        .context("Failed to mark recall resolved")?;
                    self.renderer.render(&format!(
                        "# Nicely done!\n\nRecall {recall_id} is resolved and your recall list \
                         has been updated.\n"
                    ))?;
                }
                FlowEvent::NotApplicable { recall_id } => {
                    self.registry
                        .apply_flow_event(event)
                        .await
                        .context("Failed to dismiss recall")?;
                    self.renderer.render(&format!(
                        "Good news: this recall doesn't affect you. Recall {recall_id} has \
                         been marked not applicable.\n"
                    ))?;
                }
            }
        }
        Ok(())
    }
}
