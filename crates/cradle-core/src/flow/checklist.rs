//! Checklist state local to the remediation step.

use serde::Serialize;

/// Snapshot of a single checklist entry.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChecklistItem {
    /// Position within the action list (0-indexed)
    pub index: usize,
    /// Remediation action text
    pub label: String,
    /// Locked items are pre-checked and cannot be toggled
    pub locked: bool,
    /// Whether the user has acknowledged this action
    pub acknowledged: bool,
}

/// Acknowledgement state for the remediation checklist.
///
/// Created fresh every time the checklist step is entered and discarded when
/// the session leaves it. A locked prefix (by default the first item) is
/// pre-checked and cannot be unchecked: reaching this screen already implies
/// the user has stopped using the product, and the pre-checked entry asserts
/// that on their behalf.
#[derive(Debug, Clone)]
pub struct Checklist {
    items: Vec<ChecklistItem>,
}

impl Checklist {
    /// Default number of locked leading items.
    pub const DEFAULT_LOCKED_PREFIX: usize = 1;

    /// Build a checklist over the given actions with the default locked
    /// prefix.
    pub fn new(actions: &[String]) -> Self {
        Self::with_locked_prefix(actions, Self::DEFAULT_LOCKED_PREFIX)
    }

    /// Build a checklist with the first `locked` items pre-checked and
    /// non-togglable.
    ///
    /// A prefix longer than the action list is clamped; a prefix of zero
    /// produces a fully togglable checklist.
    pub fn with_locked_prefix(actions: &[String], locked: usize) -> Self {
        let locked = locked.min(actions.len());
        let items = actions
            .iter()
            .enumerate()
            .map(|(index, label)| ChecklistItem {
                index,
                label: label.clone(),
                locked: index < locked,
                acknowledged: index < locked,
            })
            .collect();
        Self { items }
    }

    /// Flip the acknowledgement state of the item at `index`.
    ///
    /// Returns `true` when the state changed. Locked and out-of-range
    /// indices are no-ops and return `false`.
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.items.get_mut(index) {
            Some(item) if !item.locked => {
                item.acknowledged = !item.acknowledged;
                true
            }
            _ => false,
        }
    }

    /// Whether every item (locked or not) is acknowledged.
    ///
    /// An empty checklist is never complete; it cannot gate a transition
    /// open.
    pub fn is_complete(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|item| item.acknowledged)
    }

    /// Number of acknowledged items.
    pub fn acknowledged_count(&self) -> usize {
        self.items.iter().filter(|item| item.acknowledged).count()
    }

    /// Indices of acknowledged items, in order.
    pub fn acknowledged_indices(&self) -> Vec<usize> {
        self.items
            .iter()
            .filter(|item| item.acknowledged)
            .map(|item| item.index)
            .collect()
    }

    /// Total number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the checklist has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item snapshots in display order.
    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actions() -> Vec<String> {
        vec![
            "Stop using the product".to_string(),
            "Verify the model number".to_string(),
            "Contact the manufacturer".to_string(),
        ]
    }

    #[test]
    fn first_item_locked_and_prechecked() {
        let checklist = Checklist::new(&actions());
        assert!(checklist.items()[0].locked);
        assert!(checklist.items()[0].acknowledged);
        assert!(!checklist.items()[1].acknowledged);
        assert_eq!(checklist.acknowledged_count(), 1);
    }

    #[test]
    fn toggle_locked_item_is_noop() {
        let mut checklist = Checklist::new(&actions());
        let before: Vec<_> = checklist.items().to_vec();
        assert!(!checklist.toggle(0));
        assert_eq!(checklist.items(), before.as_slice());
    }

    #[test]
    fn toggle_out_of_range_is_noop() {
        let mut checklist = Checklist::new(&actions());
        assert!(!checklist.toggle(17));
        assert_eq!(checklist.acknowledged_count(), 1);
    }

    #[test]
    fn toggle_flips_and_unflips() {
        let mut checklist = Checklist::new(&actions());
        assert!(checklist.toggle(1));
        assert!(checklist.items()[1].acknowledged);
        assert!(checklist.toggle(1));
        assert!(!checklist.items()[1].acknowledged);
    }

    #[test]
    fn complete_only_when_everything_acknowledged() {
        let mut checklist = Checklist::new(&actions());
        assert!(!checklist.is_complete());
        checklist.toggle(1);
        assert!(!checklist.is_complete());
        checklist.toggle(2);
        assert!(checklist.is_complete());
    }

    #[test]
    fn zero_locked_prefix_allows_toggling_first_item() {
        let mut checklist = Checklist::with_locked_prefix(&actions(), 0);
        assert!(!checklist.items()[0].acknowledged);
        assert!(checklist.toggle(0));
        assert!(checklist.items()[0].acknowledged);
    }

    #[test]
    fn locked_prefix_clamped_to_length() {
        let checklist = Checklist::with_locked_prefix(&actions(), 10);
        assert!(checklist.is_complete());
    }

    #[test]
    fn empty_checklist_is_never_complete() {
        let checklist = Checklist::new(&[]);
        assert!(checklist.is_empty());
        assert!(!checklist.is_complete());
    }
}
