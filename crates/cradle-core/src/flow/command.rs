//! Commands that can drive flow session transitions.

use serde::{Deserialize, Serialize};

/// Commands accepted by a flow session.
///
/// This is the whole inbound surface of the state machine: step views never
/// transition each other directly, they submit one of these commands and the
/// controller decides whether a transition happens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum FlowCommand {
    /// Answer the step-1 ownership question
    ConfirmOwnership(bool),
    /// Flip acknowledgement of a checklist item by index
    Toggle(usize),
    /// Advance from the checklist to the summary (gated on full
    /// acknowledgement)
    Proceed,
    /// Return to the previous step
    Back,
    /// Complete the flow from the summary
    Finish,
    /// Hand the completion summary to the sharing collaborator
    Share,
    /// Ask the parent to show supplementary "find the model number" media
    RequestVisualGuide,
    /// Cancel the session from outside
    Close,
}

impl FlowCommand {
    /// Get a string representation of the command type for logging
    pub fn command_type(&self) -> &'static str {
        match self {
            Self::ConfirmOwnership(_) => "confirm_ownership",
            Self::Toggle(_) => "toggle",
            Self::Proceed => "proceed",
            Self::Back => "back",
            Self::Finish => "finish",
            Self::Share => "share",
            Self::RequestVisualGuide => "request_visual_guide",
            Self::Close => "close",
        }
    }
}
