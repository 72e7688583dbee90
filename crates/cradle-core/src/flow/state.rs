//! Step and transition state for the guided resolution flow.

use serde::{Deserialize, Serialize};

/// The position of a flow session within the guided resolution.
///
/// A session is always in exactly one step. The three active steps map to the
/// user-visible screens (1: ownership confirmation, 2: remediation checklist,
/// 3: completion summary); `Closed` is the terminal state reached through any
/// exit path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlowStep {
    /// Step 1: does the user own the recalled product?
    Ownership,

    /// Step 2: acknowledge every remediation action
    Checklist,

    /// Step 3: completion summary and exit affordances
    Summary,

    /// Session has ended (resolved, not applicable, or cancelled)
    Closed,
}

impl FlowStep {
    /// The 1-based screen number for active steps, `None` once closed.
    pub fn step_number(&self) -> Option<u8> {
        match self {
            FlowStep::Ownership => Some(1),
            FlowStep::Checklist => Some(2),
            FlowStep::Summary => Some(3),
            FlowStep::Closed => None,
        }
    }

    /// Whether the session has ended.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowStep::Closed)
    }

    /// Convert to string representation for logging and status output
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowStep::Ownership => "ownership",
            FlowStep::Checklist => "checklist",
            FlowStep::Summary => "summary",
            FlowStep::Closed => "closed",
        }
    }
}

/// Direction of a step transition.
///
/// Carried on [`TransitionEvent`] purely so a renderer can pick the matching
/// slide animation; it never gates a transition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Advancing toward completion
    Forward,

    /// Returning to an earlier step
    Backward,
}

impl Direction {
    /// Convert to string representation for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        }
    }
}

/// A completed step transition, annotated for presentation.
///
/// Emitted by the flow controller after every accepted transition so a
/// renderer can animate between screens without the core model carrying any
/// presentation state of its own.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransitionEvent {
    /// Step the session left
    pub from: FlowStep,
    /// Step the session entered
    pub to: FlowStep,
    /// Animation hint for the renderer
    pub direction: Direction,
}
