//! Parameter structures for cradle operations
//!
//! This module contains shared parameter structures that can be used across
//! different interfaces (CLI, MCP, etc.) without framework-specific derives
//! or dependencies.
//!
//! ## Architecture: Parameter Wrapper Pattern
//!
//! Interface layers wrap these structures with their own derives instead of
//! polluting the core types:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - CLI argument structs add clap attributes and convert via `From`.
//! - MCP request types wrap transparently (`#[serde(transparent)]`) and pick
//!   up JSON schema generation through the optional `schema` feature.
//! - Business validation stays here, next to the data it validates, so every
//!   interface gets identical behavior.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::Severity;

/// Generic parameters for operations requiring just a recall ID.
///
/// Used for operations like show_recall, reopen_recall, and opening a guided
/// flow session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the recall to operate on
    pub id: String,
}

/// Parameters for recording a new recall.
///
/// Used by the simulation source and by direct entry to add a recall notice
/// to the registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddRecall {
    /// Opaque recall identifier (required, unique)
    pub id: String,
    /// Name of the recalled product (required)
    pub product: String,
    /// Brand the product is sold under
    pub brand: Option<String>,
    /// Model identifier printed on the product
    pub model_number: Option<String>,
    /// Manufacturer issuing the recall
    pub manufacturer: Option<String>,
    /// Hazard severity ('low', 'medium', 'high', or 'critical')
    pub severity: String,
    /// Free-text hazard description (required)
    pub hazard: String,
    /// Ordered remediation actions (at least one required)
    #[serde(default)]
    pub actions: Vec<String>,
    /// Support phone number
    pub contact_phone: Option<String>,
    /// Support email address
    pub contact_email: Option<String>,
    /// Recall information website
    pub contact_website: Option<String>,
    /// References to supplementary media
    #[serde(default)]
    pub media: Vec<String>,
}

impl AddRecall {
    /// Validate recall parameters and return the parsed severity.
    ///
    /// # Errors
    ///
    /// * `RecallError::InvalidInput` - When the ID or product name is blank
    /// * `RecallError::InvalidInput` - When the severity string is invalid
    /// * `RecallError::InvalidInput` - When the action list is empty
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cradle_core::params::AddRecall;
    ///
    /// let mut params = AddRecall::default();
    /// params.id = "r-1".to_string();
    /// params.product = "Toy oven".to_string();
    /// params.severity = "high".to_string();
    /// params.hazard = "Burn hazard".to_string();
    /// params.actions = vec!["Stop using the oven".to_string()];
    /// let severity = params.validate()?;
    /// # use cradle_core::Result;
    /// # Result::<()>::Ok(())
    /// ```
    pub fn validate(&self) -> crate::Result<Severity> {
        if self.id.trim().is_empty() {
            return Err(crate::RecallError::invalid_input("id")
                .with_reason("Recall ID must not be empty"));
        }
        if self.product.trim().is_empty() {
            return Err(crate::RecallError::invalid_input("product")
                .with_reason("Product name must not be empty"));
        }

        let severity = self.severity.parse::<Severity>().map_err(|_| {
            crate::RecallError::invalid_input("severity").with_reason(format!(
                "Invalid severity: {}. Must be 'low', 'medium', 'high', or 'critical'",
                self.severity
            ))
        })?;

        if self.actions.iter().all(|a| a.trim().is_empty()) {
            return Err(crate::RecallError::invalid_input("actions")
                .with_reason("A recall needs at least one remediation action"));
        }

        Ok(severity)
    }
}

/// Parameters for listing recalls.
///
/// By default only open recalls are listed; `all` widens to every status and
/// `status` narrows to one specific status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListRecalls {
    /// Show every recall regardless of status
    #[serde(default)]
    pub all: bool,
    /// Only show recalls with this status ('open', 'resolved', or
    /// 'notapplicable')
    pub status: Option<String>,
    /// Only show recalls whose product name contains this text
    pub product: Option<String>,
    /// Only show recalls at or above this severity
    pub min_severity: Option<String>,
}

/// Parameters for permanently deleting a recall.
///
/// Requires explicit confirmation to prevent accidental deletion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeleteRecall {
    /// The ID of the recall to delete
    pub id: String,
    /// Must be true for the deletion to proceed
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for saving a checklist-progress snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SaveProgress {
    /// The ID of the recall the snapshot belongs to
    pub id: String,
    /// Acknowledged action indices (0-based)
    #[serde(default)]
    pub acknowledged: Vec<usize>,
}

/// Parameters for answering the ownership question in a flow session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ConfirmOwnership {
    /// Whether the user owns the recalled product
    pub owns: bool,
}

/// Parameters for toggling a checklist item in a flow session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ToggleAction {
    /// 0-based index of the checklist item to toggle
    pub index: usize,
}

/// Parameters for seeding sample recalls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Simulate {
    /// Maximum number of sample recalls to add (all samples if omitted)
    pub count: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecallError;

    fn valid_params() -> AddRecall {
        AddRecall {
            id: "r-1".to_string(),
            product: "Convertible high chair".to_string(),
            severity: "critical".to_string(),
            hazard: "Seat can detach from the frame".to_string(),
            actions: vec!["Stop using the high chair".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_add_recall_validate_ok() {
        let severity = valid_params().validate().unwrap();
        assert_eq!(severity, Severity::Critical);
    }

    #[test]
    fn test_add_recall_validate_blank_id() {
        let mut params = valid_params();
        params.id = "  ".to_string();

        match params.validate().unwrap_err() {
            RecallError::InvalidInput { field, .. } => assert_eq!(field, "id"),
            _ => panic!("Expected InvalidInput error"),
        }
    }

    #[test]
    fn test_add_recall_validate_blank_product() {
        let mut params = valid_params();
        params.product = String::new();

        match params.validate().unwrap_err() {
            RecallError::InvalidInput { field, .. } => assert_eq!(field, "product"),
            _ => panic!("Expected InvalidInput error"),
        }
    }

    #[test]
    fn test_add_recall_validate_invalid_severity() {
        let mut params = valid_params();
        params.severity = "catastrophic".to_string();

        match params.validate().unwrap_err() {
            RecallError::InvalidInput { field, reason } => {
                assert_eq!(field, "severity");
                assert!(reason.contains("Invalid severity: catastrophic"));
            }
            _ => panic!("Expected InvalidInput error"),
        }
    }

    #[test]
    fn test_add_recall_validate_empty_actions() {
        let mut params = valid_params();
        params.actions = vec![String::new()];

        match params.validate().unwrap_err() {
            RecallError::InvalidInput { field, .. } => assert_eq!(field, "actions"),
            _ => panic!("Expected InvalidInput error"),
        }
    }
}
