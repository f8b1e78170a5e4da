//! LLM provider trait definition

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// Trait for LLM providers
///
/// The agent hands the provider a fully assembled request and expects one
/// assistant message back per turn. Model name, token limit and temperature
/// are carried in the request untouched.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Generate a completion for the conversation in `request`
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Get the provider name (e.g., "openai", "local")
    fn name(&self) -> &str;
}
