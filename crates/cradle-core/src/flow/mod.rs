//! Guided resolution flow: a three-step state machine over one recall.
//!
//! This module implements the controller for the recall resolution flow. The
//! controller owns all session state; step views are purely presentational
//! and drive the session exclusively through [`FlowCommand`]s.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────┐  commands   ┌─────────────────┐  events   ┌──────────┐
//! │   Step views    │────────────▶│ FlowController  │──────────▶│  Parent  │
//! │ (CLI, MCP, …)   │             │ (state machine) │           │ (recall  │
//! └─────────────────┘             └─────────────────┘           │   list)  │
//!                                                               └──────────┘
//! ```
//!
//! # Transitions
//!
//! | From      | Command                  | To        | Notes                        |
//! |-----------|--------------------------|-----------|------------------------------|
//! | Ownership | `ConfirmOwnership(true)` | Checklist | forward                      |
//! | Ownership | `ConfirmOwnership(false)`| Closed    | emits `NotApplicable`        |
//! | Checklist | `Proceed`                | Summary   | only with a complete checklist |
//! | Checklist | `Back`                   | Ownership | backward                     |
//! | Summary   | `Back`                   | Checklist | backward, checklist reset    |
//! | Summary   | `Finish`                 | Closed    | emits `Resolved`             |
//! | any       | `Close`                  | Closed    | no outcome event             |
//!
//! Any other (step, command) pairing is rejected without changing state. A
//! rejection is an ordinary return value, not an error: callers that bypass
//! the UI affordances simply find the session exactly where it was.
//!
//! # Usage Examples
//!
//! ```rust
//! use cradle_core::flow::FlowController;
//! use cradle_core::models::RecallRecord;
//!
//! let recall = RecallRecord::placeholder(Some("r-1"));
//! let mut flow = FlowController::open(recall);
//!
//! // Step 1: the user owns the product
//! assert!(flow.confirm(true).is_applied());
//!
//! // Step 2: the first action is already acknowledged; do the rest
//! for index in 1..flow.checklist().len() {
//!     flow.toggle(index);
//! }
//! assert!(flow.proceed().is_applied());
//!
//! // Step 3: complete the flow
//! assert!(flow.finish().is_applied());
//! assert!(flow.is_closed());
//! ```

use jiff::Timestamp;
use log::debug;

use crate::models::RecallRecord;

pub mod checklist;
pub mod command;
pub mod events;
pub mod state;

#[cfg(test)]
mod tests;

pub use checklist::{Checklist, ChecklistItem};
pub use command::FlowCommand;
pub use events::{FlowEvent, FlowObserver, RecordingObserver};
pub use state::{Direction, FlowStep, TransitionEvent};

/// External collaborator that persists checklist progress.
///
/// Saving is fire-and-forget from the session's perspective: a failure is
/// downgraded to a transient [`FlowEvent::Notice`] and never blocks the flow.
pub trait ProgressSink: Send {
    /// Persist the set of acknowledged action indices for a recall.
    fn save_progress(&self, recall_id: &str, acknowledged: &[usize]) -> Result<(), String>;
}

/// External collaborator that shares the completion summary.
///
/// The outcome of a share attempt is purely informational; neither success
/// nor failure affects the session state.
pub trait ShareTarget: Send {
    /// Hand the summary text to the platform sharing facility.
    fn share(&self, text: &str) -> Result<(), String>;
}

/// Why a command was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The session has already closed
    SessionClosed,
    /// The command is not valid in the current step
    WrongStep,
    /// `Proceed` was attempted with unacknowledged items remaining
    ChecklistIncomplete,
    /// The toggled item is locked
    ItemLocked,
    /// The toggled index does not exist
    ItemOutOfRange,
}

impl RejectReason {
    /// Convert to string representation for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SessionClosed => "session_closed",
            Self::WrongStep => "wrong_step",
            Self::ChecklistIncomplete => "checklist_incomplete",
            Self::ItemLocked => "item_locked",
            Self::ItemOutOfRange => "item_out_of_range",
        }
    }
}

/// The result of submitting a [`FlowCommand`].
///
/// Rejections carry a machine-readable reason but are deliberately quiet:
/// the session state is untouched and nothing is reported to observers.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// The command was accepted; the listed events were emitted
    Applied {
        /// Events emitted while applying the command, in order
        events: Vec<FlowEvent>,
    },
    /// The command was rejected; state is unchanged
    Rejected {
        /// Why the command was rejected
        reason: RejectReason,
    },
}

impl CommandOutcome {
    /// Whether the command was accepted.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// Events emitted by the command (empty for rejections).
    pub fn events(&self) -> &[FlowEvent] {
        match self {
            Self::Applied { events } => events,
            Self::Rejected { .. } => &[],
        }
    }

    /// The rejection reason, if the command was rejected.
    pub fn rejection(&self) -> Option<RejectReason> {
        match self {
            Self::Applied { .. } => None,
            Self::Rejected { reason } => Some(*reason),
        }
    }
}

/// Controller owning one guided resolution session.
///
/// Opening a controller always starts at the ownership step with a fresh
/// session state; there is no way to construct one mid-flow, so stale step
/// state can never leak between sessions for different recalls.
pub struct FlowController {
    recall: RecallRecord,
    step: FlowStep,
    direction: Direction,
    checklist: Checklist,
    locked_prefix: usize,
    observers: Vec<Box<dyn FlowObserver>>,
    progress_sink: Option<Box<dyn ProgressSink>>,
    share_target: Option<Box<dyn ShareTarget>>,
}

impl FlowController {
    /// Open a new session for the given recall.
    ///
    /// Records that are missing essential content (no product name or no
    /// actions) are replaced with the clearly-marked placeholder record so
    /// the guided flow can still run; see
    /// [`RecallRecord::or_placeholder`].
    pub fn open(recall: RecallRecord) -> Self {
        let recall = recall.or_placeholder();
        Self {
            recall,
            step: FlowStep::Ownership,
            direction: Direction::Forward,
            checklist: Checklist::with_locked_prefix(&[], 0),
            locked_prefix: Checklist::DEFAULT_LOCKED_PREFIX,
            observers: Vec::new(),
            progress_sink: None,
            share_target: None,
        }
    }

    /// Override the number of locked leading checklist items.
    pub fn with_locked_prefix(mut self, locked: usize) -> Self {
        self.locked_prefix = locked;
        self
    }

    /// Attach an observer at construction time.
    pub fn with_observer(mut self, observer: Box<dyn FlowObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Attach the checklist-progress persistence collaborator.
    pub fn with_progress_sink(mut self, sink: Box<dyn ProgressSink>) -> Self {
        self.progress_sink = Some(sink);
        self
    }

    /// Attach the sharing collaborator.
    pub fn with_share_target(mut self, target: Box<dyn ShareTarget>) -> Self {
        self.share_target = Some(target);
        self
    }

    /// Subscribe an observer to all subsequent events.
    pub fn subscribe(&mut self, observer: Box<dyn FlowObserver>) {
        self.observers.push(observer);
    }

    /// Submit a command to the session.
    ///
    /// This is the single entry point for every transition; the convenience
    /// methods below all delegate here.
    pub fn handle(&mut self, command: FlowCommand) -> CommandOutcome {
        let outcome = match (self.step, &command) {
            (FlowStep::Closed, _) => Self::reject(RejectReason::SessionClosed),
            (_, FlowCommand::Close) => self.apply_close(),
            (_, FlowCommand::RequestVisualGuide) => self.apply_visual_guide(),
            (FlowStep::Ownership, FlowCommand::ConfirmOwnership(owns)) => {
                self.apply_confirm(*owns)
            }
            (FlowStep::Checklist, FlowCommand::Toggle(index)) => self.apply_toggle(*index),
            (FlowStep::Checklist, FlowCommand::Proceed) => self.apply_proceed(),
            (FlowStep::Checklist, FlowCommand::Back) => {
                self.transition(FlowStep::Ownership, Direction::Backward, Vec::new())
            }
            (FlowStep::Summary, FlowCommand::Back) => {
                self.transition(FlowStep::Checklist, Direction::Backward, Vec::new())
            }
            (FlowStep::Summary, FlowCommand::Finish) => self.apply_finish(),
            (FlowStep::Summary, FlowCommand::Share) => self.apply_share(),
            _ => Self::reject(RejectReason::WrongStep),
        };

        if let CommandOutcome::Rejected { reason } = &outcome {
            debug!(
                "rejected {} on step {} for recall {}: {}",
                command.command_type(),
                self.step.as_str(),
                self.recall.id,
                reason.as_str()
            );
        }

        outcome
    }

    /// Answer the ownership question (step 1).
    pub fn confirm(&mut self, owns: bool) -> CommandOutcome {
        self.handle(FlowCommand::ConfirmOwnership(owns))
    }

    /// Toggle a checklist item (step 2).
    pub fn toggle(&mut self, index: usize) -> CommandOutcome {
        self.handle(FlowCommand::Toggle(index))
    }

    /// Advance from the checklist to the summary (step 2, gated).
    pub fn proceed(&mut self) -> CommandOutcome {
        self.handle(FlowCommand::Proceed)
    }

    /// Return to the previous step.
    pub fn back(&mut self) -> CommandOutcome {
        self.handle(FlowCommand::Back)
    }

    /// Complete the flow (step 3).
    pub fn finish(&mut self) -> CommandOutcome {
        self.handle(FlowCommand::Finish)
    }

    /// Share the completion summary (step 3).
    pub fn share(&mut self) -> CommandOutcome {
        self.handle(FlowCommand::Share)
    }

    /// Ask the parent for supplementary identification media.
    pub fn request_visual_guide(&mut self) -> CommandOutcome {
        self.handle(FlowCommand::RequestVisualGuide)
    }

    /// Cancel the session from outside.
    pub fn close(&mut self) -> CommandOutcome {
        self.handle(FlowCommand::Close)
    }

    /// The recall this session was opened for.
    pub fn recall(&self) -> &RecallRecord {
        &self.recall
    }

    /// The current step.
    pub fn current_step(&self) -> FlowStep {
        self.step
    }

    /// The direction of the last accepted transition.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The live checklist state (meaningful on the checklist step).
    pub fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    /// Whether the session has ended.
    pub fn is_closed(&self) -> bool {
        self.step.is_terminal()
    }

    /// The canonical accomplishment list shown on the summary step.
    ///
    /// Deliberately mirrors the full action set rather than the items the
    /// user toggled: the summary celebrates the canonical remediation, not a
    /// replay of checkbox history.
    pub fn summary_items(&self) -> &[String] {
        &self.recall.actions
    }

    /// Compose the shareable completion summary text.
    pub fn share_text(&self) -> String {
        let mut text = format!(
            "I resolved the safety recall for {} using Cradle. Completed actions:",
            self.recall.product
        );
        for action in &self.recall.actions {
            text.push_str("\n- ");
            text.push_str(action);
        }
        text
    }

    fn reject(reason: RejectReason) -> CommandOutcome {
        CommandOutcome::Rejected { reason }
    }

    /// Move to `to`, resetting checklist state on checklist entry, and emit
    /// the transition event followed by `extra` outcome events.
    fn transition(
        &mut self,
        to: FlowStep,
        direction: Direction,
        mut extra: Vec<FlowEvent>,
    ) -> CommandOutcome {
        let from = self.step;
        self.step = to;
        self.direction = direction;

        // Checklist state is local to the checklist step: every entry starts
        // from a fresh state with only the locked prefix acknowledged.
        if to == FlowStep::Checklist {
            self.checklist =
                Checklist::with_locked_prefix(&self.recall.actions, self.locked_prefix);
        }

        let mut events = vec![FlowEvent::Transitioned(TransitionEvent {
            from,
            to,
            direction,
        })];
        events.append(&mut extra);
        self.emit(&events);
        CommandOutcome::Applied { events }
    }

    fn apply_confirm(&mut self, owns: bool) -> CommandOutcome {
        if owns {
            self.transition(FlowStep::Checklist, Direction::Forward, Vec::new())
        } else {
            let event = FlowEvent::NotApplicable {
                recall_id: self.recall.id.clone(),
            };
            self.transition(FlowStep::Closed, Direction::Forward, vec![event])
        }
    }

    fn apply_toggle(&mut self, index: usize) -> CommandOutcome {
        if !self.checklist.toggle(index) {
            let reason = match self.checklist.items().get(index) {
                Some(_) => RejectReason::ItemLocked,
                None => RejectReason::ItemOutOfRange,
            };
            return Self::reject(reason);
        }

        let mut events = Vec::new();
        if let Some(sink) = &self.progress_sink {
            let acknowledged = self.checklist.acknowledged_indices();
            if let Err(message) = sink.save_progress(&self.recall.id, &acknowledged) {
                debug!(
                    "saving progress for recall {} failed: {message}",
                    self.recall.id
                );
                events.push(FlowEvent::Notice {
                    message: format!("Couldn't save your progress: {message}"),
                });
            }
        }

        self.emit(&events);
        CommandOutcome::Applied { events }
    }

    fn apply_proceed(&mut self) -> CommandOutcome {
        if self.checklist.is_complete() {
            self.transition(FlowStep::Summary, Direction::Forward, Vec::new())
        } else {
            Self::reject(RejectReason::ChecklistIncomplete)
        }
    }

    fn apply_finish(&mut self) -> CommandOutcome {
        let event = FlowEvent::Resolved {
            recall_id: self.recall.id.clone(),
            resolved_at: Timestamp::now(),
        };
        self.transition(FlowStep::Closed, Direction::Forward, vec![event])
    }

    fn apply_share(&mut self) -> CommandOutcome {
        let message = match &self.share_target {
            Some(target) => match target.share(&self.share_text()) {
                Ok(()) => "Summary shared.".to_string(),
                Err(message) => format!("Sharing didn't go through: {message}"),
            },
            None => "Sharing is not available here.".to_string(),
        };
        let events = vec![FlowEvent::Notice { message }];
        self.emit(&events);
        CommandOutcome::Applied { events }
    }

    fn apply_visual_guide(&mut self) -> CommandOutcome {
        let events = vec![FlowEvent::VisualGuideRequested {
            recall_id: self.recall.id.clone(),
        }];
        self.emit(&events);
        CommandOutcome::Applied { events }
    }

    fn apply_close(&mut self) -> CommandOutcome {
        // External cancellation: the session ends without an outcome event.
        self.transition(FlowStep::Closed, Direction::Forward, Vec::new())
    }

    fn emit(&mut self, events: &[FlowEvent]) {
        for event in events {
            for observer in &mut self.observers {
                observer.on_event(event);
                match event {
                    FlowEvent::Transitioned(transition) => observer.on_transition(transition),
                    FlowEvent::NotApplicable { recall_id } => {
                        observer.on_not_applicable(recall_id)
                    }
                    FlowEvent::Resolved {
                        recall_id,
                        resolved_at,
                    } => observer.on_resolved(recall_id, *resolved_at),
                    FlowEvent::VisualGuideRequested { recall_id } => {
                        observer.on_visual_guide(recall_id)
                    }
                    FlowEvent::Notice { message } => observer.on_notice(message),
                }
            }
        }
    }
}
