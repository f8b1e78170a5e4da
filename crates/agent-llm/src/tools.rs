//! Tool definition types for providers with native function calling

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tool definition for an LLM provider
///
/// Carries the same tool a JSON tool message addresses, in the shape
/// function-calling APIs expect: name, description and a JSON Schema for
/// the arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name, identical to the `request` value of the tool message
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON schema for the tool's input parameters
    pub input_schema: Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Helpers to build JSON schemas for tool arguments
pub mod schema {
    use serde_json::{Value, json};

    /// Object schema with properties and a required list
    ///
    /// ```
    /// use agent_llm::tools::schema;
    /// use serde_json::json;
    ///
    /// let schema = schema::object(
    ///     json!({
    ///         "country": schema::string("Country to check"),
    ///         "city": schema::string("Candidate capital"),
    ///     }),
    ///     &["country", "city"],
    /// );
    /// assert_eq!(schema["required"][1], "city");
    /// ```
    pub fn object(properties: Value, required: &[&str]) -> Value {
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    fn typed(kind: &str, description: &str) -> Value {
        json!({
            "type": kind,
            "description": description,
        })
    }

    /// String property schema
    pub fn string(description: &str) -> Value {
        typed("string", description)
    }

    /// Number property schema
    pub fn number(description: &str) -> Value {
        typed("number", description)
    }

    /// Integer property schema
    pub fn integer(description: &str) -> Value {
        typed("integer", description)
    }

    /// Boolean property schema
    pub fn boolean(description: &str) -> Value {
        typed("boolean", description)
    }

    /// Free-form object property schema
    pub fn map(description: &str) -> Value {
        typed("object", description)
    }

    /// Array property schema
    pub fn array(description: &str, items: Value) -> Value {
        json!({
            "type": "array",
            "description": description,
            "items": items,
        })
    }
}
