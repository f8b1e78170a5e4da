//! Core abstractions for agent-rs
//!
//! This crate defines the `Agent` trait and the error taxonomy shared by the
//! structured tool-message protocol and the runtime that drives it.

pub mod agent;
pub mod error;

pub use agent::Agent;
pub use error::{Error, Result};
