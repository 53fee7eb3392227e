//! Error types for Prompthash
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Prompthash operations
///
/// Covers configuration loading, upstream provider interactions and
/// server startup. Request-level failures never surface as this type to
/// HTTP clients; services map them to fixed soft error strings.
#[derive(Error, Debug)]
pub enum PrompthashError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (API calls, malformed responses, etc.)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Missing credentials for the upstream API
    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(String),

    /// HTTP server errors (bind, serve)
    #[error("Server error: {0}")]
    Server(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for Prompthash operations
///
/// Uses `anyhow::Error` so call sites can attach context while still
/// downcasting to [`PrompthashError`] where the variant matters.
pub type Result<T> = anyhow::Result<T>;
