//! Error types for the cradle library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all registry and store operations.
///
/// The guided flow itself never returns these: invalid flow commands are
/// rejected as values (see [`crate::flow::CommandOutcome`]), not errors.
#[derive(Error, Debug)]
pub enum RecallError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Recall not found for the given ID
    #[error("Recall '{id}' not found")]
    RecallNotFound { id: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> RecallError {
        RecallError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> RecallError {
        RecallError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl RecallError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a new database error with additional context.
    pub fn database_error(message: &str, source: rusqlite::Error) -> Self {
        Self::database(message).with_source(source)
    }

    /// Creates a not-found error for a recall ID.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::RecallNotFound { id: id.into() }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| RecallError::database(message).with_source(e))
    }
}

/// Specialized extension trait for configuration-related Results.
pub trait ConfigResultExt<T> {
    /// Map configuration errors with a message.
    fn config_context(self, message: &str) -> Result<T>;
}

impl<T> ConfigResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn config_context(self, message: &str) -> Result<T> {
        self.map_err(|e| RecallError::Configuration {
            message: format!("{}: {}", message, e),
        })
    }
}

/// Result type alias for registry operations
pub type Result<T> = std::result::Result<T, RecallError>;
