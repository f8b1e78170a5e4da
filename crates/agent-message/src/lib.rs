//! Structured tool-message protocol for agent-rs
//!
//! An agent advertises tools to an LLM as JSON request formats, and the LLM
//! answers a turn either in natural language or with a request such as
//!
//! ```json
//! {"request": "country_capital", "country": "France", "city": "Paris"}
//! ```
//!
//! This crate covers the three parts of that exchange:
//!
//! - **Schemas**: each tool is a [`ToolMessage`] record with declared
//!   [`ArgField`]s and few-shot examples
//! - **Instructions**: [`ToolRegistry::instructions`] renders the format
//!   explanation plus one usage example per tool
//! - **Dispatch**: [`ToolRegistry::dispatch`] validates a turn and invokes
//!   the agent's [`HandleTool`] implementation, or reports it as natural
//!   language

pub mod config;
pub mod dispatch;
pub mod instructions;
pub mod message;
pub mod parse;
pub mod registry;
pub mod schema;

pub use agent_core::{Error, Result};
pub use config::{ExtraFieldPolicy, ProtocolConfig};
pub use instructions::INSTRUCTION_PREAMBLE;
pub use message::{HandleTool, ToolMessage, ToolResponse, TurnOutcome};
pub use parse::{ToolRequest, parse_request};
pub use registry::{ToolRegistry, ToolRegistryBuilder};
pub use schema::{ArgField, ArgKind, ToolSchema};
