//! Result wrapper types for displaying operation outcomes.
//!
//! This module provides wrapper types that format the results of create,
//! update, and delete operations with consistent messaging and resource
//! display.

use std::fmt;

use crate::models::RecallRecord;

/// Wrapper type for displaying the result of create operations.
///
/// Formats creation results with a success message naming the resource and
/// the full details of the created resource underneath.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<RecallRecord> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Recorded recall: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations.
///
/// Can track and display the specific changes made during the update,
/// providing clear feedback about what was modified.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<RecallRecord> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated recall: {}", self.resource.id)?;
        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<RecallRecord> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted recall {} ({})",
            self.resource.id, self.resource.product
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecallRecord;

    fn record() -> RecallRecord {
        RecallRecord::placeholder(Some("CR-9"))
    }

    #[test]
    fn test_create_result_display() {
        let output = format!("{}", CreateResult::new(record()));
        assert!(output.contains("Recorded recall: CR-9"));
        assert!(output.contains("# CR-9."));
    }

    #[test]
    fn test_update_result_with_changes() {
        let changes = vec!["Marked resolved".to_string()];
        let output = format!("{}", UpdateResult::with_changes(record(), changes));
        assert!(output.contains("Updated recall: CR-9"));
        assert!(output.contains("Changes made:"));
        assert!(output.contains("- Marked resolved"));
    }

    #[test]
    fn test_delete_result_display() {
        let output = format!("{}", DeleteResult::new(record()));
        assert!(output.contains("Deleted recall CR-9"));
    }
}
