//! Database operations and SQLite management for the recall registry.
//!
//! This module provides low-level database operations for the recall list
//! that the guided flow reports into. It handles SQLite connections, schema
//! management, and query interfaces for recalls and checklist-progress
//! snapshots. The flow state machine itself never touches this layer; only
//! the parent-side registry does.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod recall_queries;
pub mod utils;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
