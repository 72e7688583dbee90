//! Core library for the cradle recall-resolution assistant.
//!
//! This crate provides the business logic for a guided product-recall
//! assistant: the three-step resolution flow (a small explicit state
//! machine), the persistent recall list it reports into, data models, and
//! error handling.
//!
//! # Flow Architecture
//!
//! The centerpiece is [`flow::FlowController`], which owns one resolution
//! session at a time and validates every transition:
//!
//! - **Step 1, Ownership**: does the user own the recalled product? "No"
//!   closes the session with a not-applicable outcome.
//! - **Step 2, Checklist**: every remediation action must be acknowledged;
//!   the first item is locked-checked, and `proceed` is gated by the
//!   controller rather than the UI.
//! - **Step 3, Summary**: the canonical accomplishment list, with finish
//!   and share affordances.
//!
//! Parents drive the controller through commands and receive
//! [`flow::FlowEvent`]s back, either from the command's return value or via
//! [`flow::FlowObserver`] subscriptions. The [`Registry`] is the usual
//! parent: it persists the recall list and applies `Resolved` /
//! `NotApplicable` outcomes to it.
//!
//! # Quick Start
//!
//! ```rust
//! use cradle_core::flow::FlowController;
//! use cradle_core::models::RecallRecord;
//!
//! let mut flow = FlowController::open(RecallRecord::placeholder(Some("r-1")));
//! flow.confirm(true);
//! for index in 1..flow.checklist().len() {
//!     flow.toggle(index);
//! }
//! flow.proceed();
//! let outcome = flow.finish();
//! assert!(flow.is_closed());
//! assert!(outcome
//!     .events()
//!     .iter()
//!     .any(|e| e.event_type() == "resolved"));
//! ```

pub mod display;
pub mod error;
pub mod flow;
pub mod models;
pub mod params;
pub mod registry;
pub mod samples;
pub mod store;

// Re-export commonly used types
pub use display::{ChecklistItems, CreateResult, DeleteResult, OperationStatus, RecallSummaries, UpdateResult};
pub use error::{RecallError, Result};
pub use flow::{
    Checklist, CommandOutcome, FlowCommand, FlowController, FlowEvent, FlowObserver, FlowStep,
    RejectReason,
};
pub use models::{
    ContactInfo, RecallFilter, RecallRecord, RecallStatus, RecallSummary, Severity,
};
pub use params::{
    AddRecall, ConfirmOwnership, DeleteRecall, Id, ListRecalls, SaveProgress, Simulate,
    ToggleAction,
};
pub use registry::{Registry, RegistryBuilder};
pub use samples::{RecallSource, SampleSource};
pub use store::Database;
