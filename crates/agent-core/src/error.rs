//! Error types for agent-core

use thiserror::Error;

/// Result type alias for agent-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tool-message handling and agent operations
///
/// Text that is not a tool request is never an error: it is passed through
/// as natural language. Every variant below is surfaced to the caller as-is;
/// nothing is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A tool schema is misdefined (no examples, invalid example, duplicate tool)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The `request` value does not name a registered tool
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A required field is missing or has the wrong type
    #[error("Invalid request for tool '{tool}': field '{field}' {reason}")]
    Validation {
        tool: String,
        field: String,
        reason: String,
    },

    /// An unrecognized field was present while the strict policy is active
    #[error("Unexpected field '{field}' in request for tool '{tool}'")]
    StrictSchema { tool: String, field: String },

    /// The handler bound to a tool returned an error
    #[error("Tool '{tool}' failed: {reason}")]
    HandlerFailed { tool: String, reason: String },

    /// Agent processing failed
    #[error("Agent processing failed: {0}")]
    ProcessingFailed(String),
}

impl Error {
    /// Build a validation error for a field
    pub fn validation(
        tool: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Validation {
            tool: tool.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field, for validation and strict-schema errors
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } | Self::StrictSchema { field, .. } => Some(field),
            _ => None,
        }
    }
}
