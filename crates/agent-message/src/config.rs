//! Protocol configuration

use serde::{Deserialize, Serialize};

/// What to do with request fields the tool does not declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtraFieldPolicy {
    /// Drop them silently
    #[default]
    Ignore,
    /// Fail the request with `Error::StrictSchema`
    Reject,
}

/// Configuration of request parsing and validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Policy for undeclared request fields
    pub extra_fields: ExtraFieldPolicy,

    /// Accept a request wrapped in a single Markdown code fence
    pub strip_code_fences: bool,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            extra_fields: ExtraFieldPolicy::Ignore,
            strip_code_fences: true,
        }
    }
}

impl ProtocolConfig {
    /// Default configuration with undeclared fields rejected
    pub fn strict() -> Self {
        Self {
            extra_fields: ExtraFieldPolicy::Reject,
            ..Self::default()
        }
    }
}
