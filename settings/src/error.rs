//! Error types for loading and validating client settings.
//!
//! - [`SourceError`] - reading deployment values from env or file
//! - [`ValidationError`] - injected values that must not ship
//! - [`ServerError`] - HTTP delivery errors
//! - [`SettingsError`] - top-level wrapper
//!
//! Endpoint resolution has no error type: it is total over the
//! environment mode and always returns a URL.

use thiserror::Error;

// =============================================================================
// Source Errors
// =============================================================================

/// Errors while reading deployment values.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to read config file.
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Config file is not valid JSON for a deployment.
    #[error("Invalid config JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Required environment variable is not set.
    #[error("Missing environment variable: {0}")]
    MissingVar(String),

    /// Port is not a valid TCP port number.
    #[error("Invalid port '{0}'")]
    InvalidPort(String),

    /// Feature flag is not a recognized boolean.
    #[error("Invalid boolean for {key}: '{value}'")]
    InvalidFlag { key: String, value: String },
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Injected deployment values rejected by build validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// One or more checks failed.
    #[error("Deployment validation failed: {}", .errors.join("; "))]
    Rejected { errors: Vec<String> },
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind the listener.
    #[error("Failed to bind port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    /// Server stopped with an IO error.
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Settings Errors (top-level)
// =============================================================================

/// Top-level error for building a settings bundle from a source.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Source error.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
