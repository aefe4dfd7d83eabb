//! Error types for the LedgerLens domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Each bounded context
//! has its own error enum, folded into a top-level `Error`.
//!
//! "Customer not found" is deliberately **not** here: unknown names and
//! ids are valid inputs that resolve to empty results, so downstream
//! narrative generation can explain "no data" in natural language.

use thiserror::Error;

/// The top-level error type for all LedgerLens operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Record source errors ---
    #[error("Data source error: {0}")]
    DataSource(#[from] DataSourceError),

    // --- Filter specification interchange errors ---
    #[error("Filter spec error: {0}")]
    Spec(#[from] SpecError),

    // --- Provider (text-generation capability) errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// A record source could not be loaded. Fatal to that load call; the
/// store retains its previous snapshot. Individually malformed rows
/// (too few fields) are *not* errors — they are dropped silently.
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("Cannot read record source {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record source {path}: {reason}")]
    Malformed { path: String, reason: String },

    #[error("Invalid value in {path} row {row}: {reason}")]
    InvalidValue {
        path: String,
        row: usize,
        reason: String,
    },
}

/// The NL-parsing capability emitted something that is not a valid
/// filter specification. Surfaced to the user as a rephrase request;
/// the session continues.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("Filter spec is not valid JSON: {0}")]
    NotJson(String),

    #[error("Filter spec is not a JSON object")]
    NotObject,

    #[error("Filter spec is missing or has invalid fields: {0}")]
    InvalidShape(String),
}

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),

    #[error("Tool execution failed: {tool_name} — {reason}")]
    ExecutionFailed { tool_name: String, reason: String },
}
