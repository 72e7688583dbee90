//! Data models for recalls.
//!
//! This module contains the core domain models that represent product recalls
//! in the cradle assistant. Display implementations for these models are
//! located in [`crate::display::models`] to maintain clean separation of
//! concerns between data structures and presentation logic.
//!
//! # Display Architecture
//!
//! The models follow a dual-display approach:
//!
//! 1. **Model Display**: Display implementations in [`crate::display::models`]
//!    for standalone formatting
//! 2. **Wrapper Display**: Specialized wrappers in [`crate::display`] for
//!    contextual formatting (lists, operation results)
//!
//! All Display implementations produce markdown with severity and status
//! icons (`‼ Critical`, `✓ Resolved`, …) for rich terminal rendering.
//!
//! # Examples
//!
//! ```rust
//! use cradle_core::models::{RecallRecord, Severity};
//! use jiff::Timestamp;
//!
//! let record = RecallRecord {
//!     id: "r-1042".to_string(),
//!     product: "Dreamland crib mobile".to_string(),
//!     brand: Some("Dreamland".to_string()),
//!     model_number: Some("DM-200".to_string()),
//!     manufacturer: Some("Dreamland Toys Inc.".to_string()),
//!     severity: Severity::High,
//!     hazard: "Detachable parts pose a choking hazard.".to_string(),
//!     actions: vec!["Stop using the mobile".to_string()],
//!     contact: None,
//!     media: vec![],
//!     status: Default::default(),
//!     published_at: Timestamp::now(),
//!     resolved_at: None,
//! };
//! println!("{}", record); // Formats with markdown headers and metadata
//! ```

pub mod contact;
pub mod filters;
pub mod recall;
pub mod severity;
pub mod status;
pub mod summary;


// Re-export all public types at the models level
pub use contact::ContactInfo;
pub use filters::RecallFilter;
pub use recall::RecallRecord;
pub use severity::Severity;
pub use status::RecallStatus;
pub use summary::RecallSummary;
