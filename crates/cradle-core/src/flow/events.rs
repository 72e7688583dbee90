//! Outbound events emitted by a flow session.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::state::TransitionEvent;

/// Events a flow session reports to its parent.
///
/// Every accepted command produces zero or more of these; they are both
/// returned from the command call and dispatched to subscribed
/// [`FlowObserver`]s. The parent applies outcome events (`Resolved`,
/// `NotApplicable`) to its recall list; `Transitioned` is a presentation
/// annotation; `Notice` is a transient, dismissible message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum FlowEvent {
    /// A step transition was accepted
    Transitioned(TransitionEvent),
    /// User does not own the product; the session is closed
    NotApplicable {
        /// ID of the recall the session was opened for
        recall_id: String,
    },
    /// User completed every step; the session is closed
    Resolved {
        /// ID of the recall the session was opened for
        recall_id: String,
        /// Completion timestamp (UTC)
        resolved_at: Timestamp,
    },
    /// Advisory request to show supplementary identification media
    VisualGuideRequested {
        /// ID of the recall the session was opened for
        recall_id: String,
    },
    /// Transient informational message (share result, save failure, …)
    Notice {
        /// Human-readable message for a dismissible toast
        message: String,
    },
}

impl FlowEvent {
    /// Get a string representation of the event type for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Transitioned(_) => "transitioned",
            Self::NotApplicable { .. } => "not_applicable",
            Self::Resolved { .. } => "resolved",
            Self::VisualGuideRequested { .. } => "visual_guide_requested",
            Self::Notice { .. } => "notice",
        }
    }
}

/// Observer interface for flow events.
///
/// All methods default to no-ops so a parent only implements the callbacks it
/// cares about. [`on_event`](FlowObserver::on_event) receives every event and
/// is invoked in addition to the specific methods. Observers must be `Send`
/// so a session can be parked inside an async interface (the MCP server)
/// between commands; the flow itself remains single-actor.
pub trait FlowObserver: Send {
    /// Called for every emitted event.
    fn on_event(&mut self, _event: &FlowEvent) {}

    /// A step transition was accepted.
    fn on_transition(&mut self, _transition: &TransitionEvent) {}

    /// The user indicated they do not own the product.
    fn on_not_applicable(&mut self, _recall_id: &str) {}

    /// The user completed the guided resolution.
    fn on_resolved(&mut self, _recall_id: &str, _resolved_at: Timestamp) {}

    /// The user asked for supplementary identification media.
    fn on_visual_guide(&mut self, _recall_id: &str) {}

    /// A transient notice should be shown.
    fn on_notice(&mut self, _message: &str) {}
}

/// Observer that records every event it receives.
///
/// The recorder is a cheap shared handle: keep one clone and hand another to
/// the controller, then read the accumulated events back at any point. Useful
/// for parents that want to inspect a batch of events after a command rather
/// than react callback-by-callback, and for asserting emission counts in
/// tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: std::sync::Arc<std::sync::Mutex<Vec<FlowEvent>>>,
}

impl RecordingObserver {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events, in emission order.
    pub fn events(&self) -> Vec<FlowEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Count recorded events of the given type.
    pub fn count(&self, event_type: &str) -> usize {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|e| e.event_type() == event_type)
            .count()
    }
}

impl FlowObserver for RecordingObserver {
    fn on_event(&mut self, event: &FlowEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event.clone());
    }
}
