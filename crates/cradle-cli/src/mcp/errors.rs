//! Error handling utilities for MCP server

use cradle_core::RecallError;
use rmcp::ErrorData;

/// Helper to convert registry errors to MCP errors
pub fn to_mcp_error(message: &str, error: &RecallError) -> ErrorData {
    ErrorData::internal_error(format!("{}: {}", message, error), None)
}
