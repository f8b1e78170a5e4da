//! LLM collaborator interface for agent-rs
//!
//! The tool-message protocol never talks to a model directly. This crate
//! defines what it consumes instead:
//!
//! - Message types for a conversation
//! - Completion request/response types and pass-through model settings
//! - Tool definitions for providers with native function calling
//! - The `LLMProvider` trait that concrete backends implement

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod tools;

// Re-export main types
pub use completion::{
    CompletionRequest, CompletionRequestBuilder, CompletionResponse, CompletionSettings,
    StopReason, TokenUsage,
};
pub use error::{LLMError, Result};
pub use messages::{ContentBlock, Message, MessageContent, Role};
pub use provider::LLMProvider;
pub use tools::ToolDefinition;
