//! Error types for smallcrud
//!
//! This module provides unified error handling across the workspace:
//! precondition failures that never reach the network, transport and
//! remote failures reported by the backend, schema problems, and
//! configuration/IO errors.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for smallcrud
#[derive(Debug, Error)]
pub enum CrudError {
    // ========================================================================
    // Precondition Errors (never sent)
    // ========================================================================
    /// Update/delete called on a record without `_id`
    #[error("Cannot {operation} a '{schema}' record without an _id")]
    MissingId {
        schema: String,
        operation: &'static str,
    },

    /// Attempt to edit a field that is not editable
    #[error("Field '{0}' is read-only")]
    ReadOnlyField(String),

    /// Field name not declared in the schema
    #[error("Field '{field}' not found in schema '{schema}'")]
    UnknownField { schema: String, field: String },

    // ========================================================================
    // Transport / Remote Errors
    // ========================================================================
    /// The request never completed (connection refused, DNS, TLS...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The endpoint answered with a non-2xx status
    #[error("HTTP {status} from backend: {body}")]
    HttpStatus { status: u16, body: String },

    /// The backend reported GraphQL errors
    #[error("Backend reported errors: {}", .0.join("; "))]
    Remote(Vec<String>),

    /// The response did not have the expected shape
    #[error("Malformed response for '{operation}': {message}")]
    MalformedResponse { operation: String, message: String },

    // ========================================================================
    // Schema Errors
    // ========================================================================
    /// Schema failed validation
    #[error("Invalid schema '{schema}': {message}")]
    InvalidSchema { schema: String, message: String },

    /// Duplicate field name inside one schema
    #[error("Duplicate field name: '{field}' already exists in schema '{schema}'")]
    DuplicateField { schema: String, field: String },

    /// Index out of range in the definition editor
    #[error("No {kind} at index {index}")]
    IndexOutOfRange { kind: &'static str, index: usize },

    // ========================================================================
    // IO / Serialization Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Missing required configuration
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Operation cancelled by user
    #[error("Operation cancelled")]
    Cancelled,

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl CrudError {
    /// Create a missing `_id` precondition error
    pub fn missing_id(schema: impl Into<String>, operation: &'static str) -> Self {
        CrudError::MissingId {
            schema: schema.into(),
            operation,
        }
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        CrudError::Transport(msg.into())
    }

    /// Create a malformed response error
    pub fn malformed(operation: impl Into<String>, msg: impl Into<String>) -> Self {
        CrudError::MalformedResponse {
            operation: operation.into(),
            message: msg.into(),
        }
    }

    /// Create a schema validation error
    pub fn invalid_schema(schema: impl Into<String>, msg: impl Into<String>) -> Self {
        CrudError::InvalidSchema {
            schema: schema.into(),
            message: msg.into(),
        }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        CrudError::Internal(msg.into())
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        CrudError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Check if this error was raised before anything was sent
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            CrudError::MissingId { .. } | CrudError::ReadOnlyField(_) | CrudError::UnknownField { .. }
        )
    }

    /// Check if the backend answered but rejected the request
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            CrudError::HttpStatus { .. } | CrudError::Remote(_) | CrudError::MalformedResponse { .. }
        )
    }

    /// Check if the request failed in transit
    pub fn is_transport(&self) -> bool {
        matches!(self, CrudError::Transport(_))
    }

    /// Check if this error is a schema error
    pub fn is_schema(&self) -> bool {
        matches!(
            self,
            CrudError::InvalidSchema { .. }
                | CrudError::DuplicateField { .. }
                | CrudError::IndexOutOfRange { .. }
        )
    }
}

/// Result type alias using CrudError
pub type CrudResult<T> = Result<T, CrudError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> CrudResult<T>;
}

impl<T, E: Into<CrudError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> CrudResult<T> {
        self.map_err(|e| {
            let err: CrudError = e.into();
            CrudError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_id_is_precondition() {
        let err = CrudError::missing_id("friend", "update");
        assert!(err.is_precondition());
        assert!(!err.is_remote());
        assert!(!err.is_transport());
        assert_eq!(
            err.to_string(),
            "Cannot update a 'friend' record without an _id"
        );
    }

    #[test]
    fn test_remote_errors_join_messages() {
        let err = CrudError::Remote(vec!["bad filter".to_string(), "no access".to_string()]);
        assert!(err.is_remote());
        assert_eq!(
            err.to_string(),
            "Backend reported errors: bad filter; no access"
        );
    }

    #[test]
    fn test_http_status_is_remote() {
        let err = CrudError::HttpStatus {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert!(err.is_remote());
        assert!(!err.is_precondition());
    }

    #[test]
    fn test_transport_error() {
        let err = CrudError::transport("connection refused");
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "Transport error: connection refused");
    }

    #[test]
    fn test_schema_errors() {
        let err = CrudError::DuplicateField {
            schema: "friend".to_string(),
            field: "name".to_string(),
        };
        assert!(err.is_schema());
        assert_eq!(
            err.to_string(),
            "Duplicate field name: 'name' already exists in schema 'friend'"
        );
    }

    #[test]
    fn test_error_with_context() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "gone",
        ));
        let err = result.with_context("Loading schema").unwrap_err();
        assert_eq!(err.to_string(), "Loading schema: IO error: gone");
    }
}
