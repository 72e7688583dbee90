//! Recall summary types and functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{RecallRecord, RecallStatus, Severity};

/// Summary information about a recall with acknowledgement statistics.
///
/// Used for list views; the acknowledgement counts come from the last saved
/// checklist-progress snapshot and are purely informational (a live flow
/// session never resumes from them).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecallSummary {
    /// Recall ID
    pub id: String,
    /// Name of the recalled product
    pub product: String,
    /// Brand the product is sold under
    pub brand: Option<String>,
    /// Hazard severity
    pub severity: Severity,
    /// Registry status
    pub status: RecallStatus,
    /// Timestamp the recall was published or recorded
    pub published_at: Timestamp,
    /// Total number of remediation actions
    pub total_actions: u32,
    /// Number of actions acknowledged in the last saved snapshot
    pub acknowledged_actions: u32,
}

impl RecallSummary {
    /// Create a RecallSummary from a record and an acknowledgement count.
    pub fn from_record(record: &RecallRecord, acknowledged_actions: u32) -> Self {
        Self {
            id: record.id.clone(),
            product: record.product.clone(),
            brand: record.brand.clone(),
            severity: record.severity,
            status: record.status,
            published_at: record.published_at,
            total_actions: record.actions.len() as u32,
            acknowledged_actions,
        }
    }
}

impl From<&RecallRecord> for RecallSummary {
    fn from(record: &RecallRecord) -> Self {
        Self::from_record(record, 0)
    }
}
