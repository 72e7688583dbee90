//! Filter types for querying recalls.

use super::{RecallStatus, Severity};

/// Filter options for querying recalls.
#[derive(Debug, Clone, Default)]
pub struct RecallFilter {
    /// Filter by product name (case-insensitive partial match)
    pub product_contains: Option<String>,

    /// Only include recalls at or above this severity
    pub severity_at_least: Option<Severity>,

    /// Filter by a specific status
    /// If None, defaults to showing only open recalls
    pub status: Option<RecallStatus>,

    /// Show all recalls regardless of status
    pub include_closed: bool,
}

impl RecallFilter {
    /// Create a filter for a specific status.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cradle_core::models::{RecallFilter, RecallStatus};
    ///
    /// let filter = RecallFilter::for_status(RecallStatus::Resolved);
    /// assert_eq!(filter.status, Some(RecallStatus::Resolved));
    /// assert!(filter.include_closed);
    /// ```
    pub fn for_status(status: RecallStatus) -> Self {
        Self {
            status: Some(status),
            include_closed: !status.is_open(),
            ..Default::default()
        }
    }
}

impl From<&crate::params::ListRecalls> for RecallFilter {
    /// Convert ListRecalls parameters to a RecallFilter for registry queries.
    ///
    /// - `all: true` lists every recall regardless of status.
    /// - an explicit `status` narrows to that status.
    /// - neither set → open recalls only (the default list view).
    fn from(params: &crate::params::ListRecalls) -> Self {
        if params.all {
            Self {
                include_closed: true,
                ..Default::default()
            }
        } else if let Some(status) = params
            .status
            .as_deref()
            .and_then(|s| s.parse::<RecallStatus>().ok())
        {
            Self::for_status(status)
        } else {
            Self {
                status: Some(RecallStatus::Open),
                ..Default::default()
            }
        }
    }
}
