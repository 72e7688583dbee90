//! Display formatting functions and result types.
//!
//! This module provides wrapper types for operation results and collections,
//! enabling consistent formatting across different output contexts (terminal
//! lists, guided-session screens, MCP tool results).
//!
//! # Architecture: Display Functions and Wrappers
//!
//! Direct Display implementations live on the domain models (see
//! [`models`]); this module adds collection newtypes and operation-result
//! wrappers on top of them.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Format Wrappers │    │   Formatted     │
//! │ (RecallRecord)  │───▶│ & Result Types  │───▶│    Output       │
//! │                 │    │                 │    │ (Terminal/MCP)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! All formatters produce markdown for rich terminal display.
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (RecallSummaries,
//!   ChecklistItems)
//! - [`results`]: Operation result types (CreateResult, UpdateResult,
//!   DeleteResult)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

// Re-export commonly used types for convenience
pub use collections::{ChecklistItems, RecallSummaries};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
