//! Agent runtime for agent-rs
//!
//! This crate provides [`ChatAgent`], which drives one LLM turn at a time:
//! it prompts the model with the tool instructions, then routes a tool
//! request in the reply to the bound handler or passes natural language
//! through.

pub mod chat;

pub use chat::{AgentReply, ChatAgent, ChatAgentConfig};
