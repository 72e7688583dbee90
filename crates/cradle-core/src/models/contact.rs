//! Manufacturer contact details attached to a recall.

use serde::{Deserialize, Serialize};

/// Contact channels for the recalling manufacturer.
///
/// All fields are optional; a recall may carry any subset of phone, email,
/// and website. An entirely empty contact block is normalized to `None` on
/// the parent [`crate::models::RecallRecord`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContactInfo {
    /// Support phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Support email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Recall information website
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl ContactInfo {
    /// True when no channel is present.
    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.email.is_none() && self.website.is_none()
    }

    /// Normalize an optional contact block: empty blocks become `None`.
    pub fn normalize(contact: Option<ContactInfo>) -> Option<ContactInfo> {
        contact.filter(|c| !c.is_empty())
    }
}
