//! Collection wrapper types for displaying groups of domain objects.
//!
//! This module provides wrapper types that format collections of domain
//! objects with consistent structure and empty collection handling.

use std::{fmt, ops::Index};

use crate::flow::ChecklistItem;
use crate::models::RecallSummary;

/// Newtype wrapper for displaying collections of recall summaries.
///
/// Provides clean Display formatting for recall collections without title
/// handling, allowing consumers to handle titles separately. Handles empty
/// collections gracefully.
pub struct RecallSummaries(pub Vec<RecallSummary>);

impl RecallSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of recall summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the recall summary at the given index.
    pub fn get(&self, index: usize) -> Option<&RecallSummary> {
        self.0.get(index)
    }

    /// Get an iterator over the recall summaries.
    pub fn iter(&self) -> std::slice::Iter<'_, RecallSummary> {
        self.0.iter()
    }
}

impl Index<usize> for RecallSummaries {
    type Output = RecallSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for RecallSummaries {
    type Item = RecallSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecallSummaries {
    type Item = &'a RecallSummary;
    type IntoIter = std::slice::Iter<'a, RecallSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for RecallSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No recalls found.")
        } else {
            for recall in &self.0 {
                write!(f, "{}", recall)?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying checklist item snapshots.
///
/// Used by the guided session to render the remediation checklist as a
/// markdown task list.
pub struct ChecklistItems<'a>(pub &'a [ChecklistItem]);

impl fmt::Display for ChecklistItems<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No actions listed.")
        } else {
            for item in self.0 {
                writeln!(f, "{}", item)?;
            }
            Ok(())
        }
    }
}
