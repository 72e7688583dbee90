//! Status enumeration for recalls in the registry.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of recall statuses.
///
/// A recall is `Open` until a guided flow session reports an outcome for it:
/// `Resolved` when the user completed all remediation steps, `NotApplicable`
/// when the user indicated they do not own the product. Either outcome can be
/// undone with `reopen`, which returns the recall to `Open`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecallStatus {
    /// Recall has not been resolved yet
    #[default]
    Open,

    /// User completed the guided resolution flow
    Resolved,

    /// User indicated they do not own the recalled product
    NotApplicable,
}

impl FromStr for RecallStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(RecallStatus::Open),
            "resolved" => Ok(RecallStatus::Resolved),
            "notapplicable" | "not_applicable" => Ok(RecallStatus::NotApplicable),
            _ => Err(format!("Invalid recall status: {s}")),
        }
    }
}

impl RecallStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RecallStatus::Open => "open",
            RecallStatus::Resolved => "resolved",
            RecallStatus::NotApplicable => "notapplicable",
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cradle_core::models::RecallStatus;
    ///
    /// assert_eq!(RecallStatus::Resolved.with_icon(), "✓ Resolved");
    /// assert_eq!(RecallStatus::Open.with_icon(), "○ Open");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            RecallStatus::Resolved => "✓ Resolved",
            RecallStatus::NotApplicable => "– Not applicable",
            RecallStatus::Open => "○ Open",
        }
    }

    /// Whether the recall still needs attention.
    pub fn is_open(&self) -> bool {
        matches!(self, RecallStatus::Open)
    }
}
