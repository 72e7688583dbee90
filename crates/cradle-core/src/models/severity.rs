//! Severity enumeration for recall notices.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of recall severities.
///
/// The ordering is meaningful: `Low < Medium < High < Critical`, so severity
/// comparisons and "at least" filters can use the standard comparison
/// operators.
///
/// # Examples
///
/// ```rust
/// use cradle_core::models::Severity;
///
/// assert!(Severity::Critical > Severity::High);
/// assert!(Severity::Medium > Severity::Low);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Low hazard potential
    Low,

    /// Moderate hazard potential
    Medium,

    /// Serious hazard potential
    High,

    /// Immediate hazard; stop using the product
    Critical,
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!("Invalid severity: {s}")),
        }
    }
}

impl Severity {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// Get severity with consistent icon formatting for display.
    ///
    /// Returns a formatted string that includes both an icon and the severity
    /// name. This method ensures consistent visual representation across
    /// all display contexts.
    ///
    /// # Icons Used
    /// - `‼ Critical` - Double exclamation for immediate hazards
    /// - `▲ High` - Warning triangle for serious hazards
    /// - `● Medium` - Filled circle for moderate hazards
    /// - `○ Low` - Open circle for low hazards
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cradle_core::models::Severity;
    ///
    /// assert_eq!(Severity::Critical.with_icon(), "‼ Critical");
    /// assert_eq!(Severity::Low.with_icon(), "○ Low");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            Severity::Critical => "‼ Critical",
            Severity::High => "▲ High",
            Severity::Medium => "● Medium",
            Severity::Low => "○ Low",
        }
    }
}
