//! Error types for the ragent domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.
//!
//! Business failures reported by tools ("the order cannot be cancelled") are
//! *not* errors: they travel as ordinary tool output through the conversation.

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for all ragent operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Dispatch loop errors ---
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    // --- Knowledge pipeline errors ---
    #[error("Knowledge error: {0}")]
    Knowledge(#[from] KnowledgeError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone, Error)]
pub enum ToolError {
    #[error("Tool '{0}' is not supported")]
    UnknownTool(String),

    #[error("Tool '{0}' is already registered")]
    DuplicateTool(String),

    #[error("Invalid arguments for tool '{tool_name}': {reason}")]
    InvalidArguments { tool_name: String, reason: String },

    #[error("Tool execution failed: {tool_name}: {reason}")]
    ExecutionFailed { tool_name: String, reason: String },
}

/// Protocol failures of the tool-calling dispatch loop. Always fatal.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    #[error("Finish reason '{reason}' is not supported")]
    UnsupportedFinishState { reason: String },

    #[error("Model kept requesting tools after {limit} iterations")]
    MaxIterationsExceeded { limit: u32 },
}

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error(
        "Invalid chunking configuration: window of {window_size} words with {overlap_percent}% overlap does not advance"
    )]
    InvalidChunking {
        window_size: usize,
        overlap_percent: f64,
    },

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Embedding has {actual} dimensions, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Failed to read document {path}: {reason}")]
    Source { path: PathBuf, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn unknown_tool_names_the_tool() {
        let err = Error::Tool(ToolError::UnknownTool("GetMyShoeSize".into()));
        assert!(err.to_string().contains("GetMyShoeSize"));
        assert!(err.to_string().contains("not supported"));
    }

    #[test]
    fn unsupported_finish_state_names_the_reason() {
        let err: Error = DispatchError::UnsupportedFinishState {
            reason: "content_filter".into(),
        }
        .into();
        assert!(err.to_string().contains("content_filter"));
    }

    #[test]
    fn invalid_chunking_reports_configuration() {
        let err = KnowledgeError::InvalidChunking {
            window_size: 10,
            overlap_percent: 100.0,
        };
        let text = err.to_string();
        assert!(text.contains("10 words"));
        assert!(text.contains("100% overlap"));
    }
}
