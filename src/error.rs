//! Error types for the agent orchestrator

use std::time::Duration;
use thiserror::Error;

/// Result type alias for orchestrator operations
pub type Result<T> = std::result::Result<T, AgentError>;

#[derive(Error, Debug)]
pub enum AgentError {

    // =============================
    // Capability Failures (recoverable, rendered as text)
    // =============================

    #[error("Tool error: {0}")]
    ToolError(String),

    #[error("Invalid tool input: {0}")]
    InvalidToolInput(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("Embedding error: {0}")]
    EmbeddingError(String),

    #[error("Capability timed out after {0:?}")]
    Timeout(Duration),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    // =============================
    // Fatal Defects (never rendered, always propagated)
    // =============================

    #[error("Contract violation: {0}")]
    ContractViolation(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AgentError {
    /// A collaborator broke its contract. These cross the `converse`
    /// boundary instead of being folded into an `Error:` payload.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AgentError::ContractViolation(_))
    }

    /// Text payload threaded through the normal return path.
    pub fn to_payload(&self) -> String {
        format!("Error: {}", self)
    }
}
