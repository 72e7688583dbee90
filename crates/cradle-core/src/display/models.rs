//! Display implementations for domain models.
//!
//! This module contains all Display trait implementations for the core domain
//! models, separated from the model definitions to maintain clean separation
//! of concerns. All output is markdown with severity and status icons.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::flow::ChecklistItem;
use crate::models::{RecallRecord, RecallStatus, RecallSummary, Severity};

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for RecallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for RecallRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.product)?;
        writeln!(f)?;

        // Metadata section
        writeln!(f, "- Severity: {}", self.severity.with_icon())?;
        writeln!(f, "- Status: {}", self.status.with_icon())?;
        if let Some(brand) = &self.brand {
            writeln!(f, "- Brand: {brand}")?;
        }
        if let Some(model) = &self.model_number {
            writeln!(f, "- Model: {model}")?;
        }
        if let Some(manufacturer) = &self.manufacturer {
            writeln!(f, "- Manufacturer: {manufacturer}")?;
        }
        writeln!(f, "- Published: {}", LocalDateTime(&self.published_at))?;
        if let Some(resolved_at) = &self.resolved_at {
            writeln!(f, "- Closed: {}", LocalDateTime(resolved_at))?;
        }

        // Hazard as a paragraph
        writeln!(f)?;
        writeln!(f, "{}", self.hazard)?;

        if !self.actions.is_empty() {
            writeln!(f, "\n## What to do")?;
            writeln!(f)?;
            for (position, action) in self.actions.iter().enumerate() {
                writeln!(f, "{}. {action}", position + 1)?;
            }
        }

        if let Some(contact) = &self.contact {
            writeln!(f, "\n## Contact")?;
            writeln!(f)?;
            if let Some(phone) = &contact.phone {
                writeln!(f, "- Phone: {phone}")?;
            }
            if let Some(email) = &contact.email {
                writeln!(f, "- Email: {email}")?;
            }
            if let Some(website) = &contact.website {
                writeln!(f, "- Website: {website}")?;
            }
        }

        if !self.media.is_empty() {
            writeln!(f, "\n## Guides")?;
            writeln!(f)?;
            for reference in &self.media {
                writeln!(f, "- {reference}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for RecallSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = if self.status.is_open() && self.total_actions > 0 {
            format!(" ({}/{})", self.acknowledged_actions, self.total_actions)
        } else {
            String::new()
        };

        writeln!(f, "## {} (ID: {}){progress}", self.product, self.id)?;
        writeln!(f)?;

        writeln!(f, "- **Severity**: {}", self.severity.with_icon())?;
        writeln!(f, "- **Status**: {}", self.status.with_icon())?;
        if let Some(brand) = &self.brand {
            writeln!(f, "- **Brand**: {brand}")?;
        }
        writeln!(f, "- **Published**: {}", LocalDateTime(&self.published_at))?;
        writeln!(f)?; // Add blank line after each recall

        Ok(())
    }
}

impl fmt::Display for ChecklistItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.acknowledged { "x" } else { " " };
        write!(
            f,
            "- [{mark}] {}. {}{}",
            self.index + 1,
            self.label,
            if self.locked { " (already done)" } else { "" }
        )
    }
}
