//! Recall record model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{ContactInfo, RecallStatus, Severity};

/// Represents one recalled product instance flowing through the assistant.
///
/// Records are constructed by the recall list or the simulation source before
/// a guided flow opens, and are read-only within the flow itself; resolution
/// state lives on the registry side as [`RecallStatus`], never on the record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecallRecord {
    /// Opaque identifier, unique per recall
    pub id: String,

    /// Name of the recalled product
    pub product: String,

    /// Brand the product is sold under
    pub brand: Option<String>,

    /// Model identifier printed on the product
    pub model_number: Option<String>,

    /// Manufacturer issuing the recall
    pub manufacturer: Option<String>,

    /// Hazard severity
    pub severity: Severity,

    /// Free-text hazard description
    pub hazard: String,

    /// Ordered remediation actions; non-empty for well-formed records
    pub actions: Vec<String>,

    /// Manufacturer contact channels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactInfo>,

    /// References to supplementary media (images, guides)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<String>,

    /// Registry status (not owned by the flow)
    #[serde(default)]
    pub status: RecallStatus,

    /// Timestamp the recall was published or recorded (UTC)
    pub published_at: Timestamp,

    /// Timestamp the recall was resolved or dismissed, if it has been
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<Timestamp>,
}

impl RecallRecord {
    /// Whether the record carries enough information to drive a flow.
    ///
    /// A usable record has a non-empty product name and at least one
    /// remediation action. Records failing this check are swapped for
    /// [`RecallRecord::placeholder`] before a flow opens, because the guided
    /// help context prefers a generic message over a failure.
    pub fn is_usable(&self) -> bool {
        !self.product.trim().is_empty() && !self.actions.is_empty()
    }

    /// Build the clearly-marked placeholder record shown when recall data is
    /// missing or malformed.
    ///
    /// The placeholder keeps the original ID (when one exists) so outcome
    /// events still reference the right recall, but replaces all descriptive
    /// content with generic guidance.
    pub fn placeholder(id: Option<&str>) -> Self {
        Self {
            id: id.unwrap_or("unknown").to_string(),
            product: "Recalled product (details unavailable)".to_string(),
            brand: None,
            model_number: None,
            manufacturer: None,
            severity: Severity::Medium,
            hazard: "We could not load the details for this recall. Please stop using the \
                     product and contact the manufacturer for guidance."
                .to_string(),
            actions: vec![
                "Stop using the product".to_string(),
                "Contact the manufacturer for recall instructions".to_string(),
            ],
            contact: None,
            media: Vec::new(),
            status: RecallStatus::Open,
            published_at: Timestamp::UNIX_EPOCH,
            resolved_at: None,
        }
    }

    /// Return `self` when usable, otherwise the placeholder for the same ID.
    pub fn or_placeholder(self) -> Self {
        if self.is_usable() {
            self
        } else {
            Self::placeholder(Some(&self.id))
        }
    }
}
