//! Declared shape of a tool request
//!
//! A [`ToolSchema`] lists the argument fields a tool accepts. It is the
//! source of truth for request validation, for the one-line description
//! shown to the LLM and for the JSON Schema handed to providers with native
//! function calling.

use crate::config::ExtraFieldPolicy;
use agent_core::{Error, Result};
use agent_llm::ToolDefinition;
use agent_llm::tools::schema;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Envelope keys that are never tool arguments
pub const RESERVED_FIELDS: [&str; 3] = ["request", "purpose", "result"];

/// JSON type of an argument field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    String,
    /// Any JSON number
    Number,
    /// Integral JSON numbers only
    Integer,
    Boolean,
    Array,
    Object,
}

impl ArgKind {
    /// JSON Schema type name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Whether `value` has this kind
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }

    fn json_schema(self, description: &str) -> Value {
        match self {
            Self::String => schema::string(description),
            Self::Number => schema::number(description),
            Self::Integer => schema::integer(description),
            Self::Boolean => schema::boolean(description),
            Self::Array => schema::array(description, Value::Object(Map::new())),
            Self::Object => schema::map(description),
        }
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One declared argument of a tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgField {
    pub name: String,
    pub kind: ArgKind,
    pub description: String,
    pub required: bool,
}

impl ArgField {
    /// A required argument
    pub fn required(name: impl Into<String>, kind: ArgKind, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            required: true,
        }
    }

    /// An argument that may be absent or `null`
    pub fn optional(name: impl Into<String>, kind: ArgKind, description: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind, description)
        }
    }
}

/// Erased descriptor of a tool message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSchema {
    /// Tool identifier, matched exactly against `request`
    pub request: String,
    /// What the tool does, phrased around its argument names
    pub purpose: String,
    /// Declared arguments, in rendering order
    pub fields: Vec<ArgField>,
}

impl ToolSchema {
    pub fn new(request: impl Into<String>, purpose: impl Into<String>, fields: Vec<ArgField>) -> Self {
        Self {
            request: request.into(),
            purpose: purpose.into(),
            fields,
        }
    }

    /// Look up a declared field by exact name
    pub fn field(&self, name: &str) -> Option<&ArgField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// `<tool_name>: <purpose>`, the line the LLM reads
    pub fn description_line(&self) -> String {
        format!("{}: {}", self.request, self.purpose)
    }

    /// JSON Schema object for the arguments
    pub fn json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.kind.json_schema(&f.description)))
            .collect();
        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect();
        schema::object(Value::Object(properties), &required)
    }

    /// Function-calling definition of the same tool
    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(&self.request, &self.purpose, self.json_schema())
    }

    /// Check that the schema itself is well formed
    pub fn check(&self) -> Result<()> {
        if self.request.trim().is_empty() {
            return Err(Error::Configuration(
                "tool identifier must not be empty".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for field in &self.fields {
            if RESERVED_FIELDS.contains(&field.name.as_str()) {
                return Err(Error::Configuration(format!(
                    "tool '{}' declares reserved field '{}'",
                    self.request, field.name
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(Error::Configuration(format!(
                    "tool '{}' declares field '{}' twice",
                    self.request, field.name
                )));
            }
        }
        Ok(())
    }

    /// Validate request arguments against the declared fields
    ///
    /// Returns the declared fields that are present, ready to decode.
    /// Required fields must be present and non-null, every
    /// present non-null value must match its kind, and undeclared fields are
    /// dropped or rejected according to `policy`.
    pub fn validate(
        &self,
        arguments: &Map<String, Value>,
        policy: ExtraFieldPolicy,
    ) -> Result<Map<String, Value>> {
        let mut validated = Map::new();

        for field in &self.fields {
            match arguments.get(&field.name) {
                None | Some(Value::Null) if field.required => {
                    return Err(Error::validation(&self.request, &field.name, "is required"));
                }
                None => {}
                Some(Value::Null) => {
                    validated.insert(field.name.clone(), Value::Null);
                }
                Some(value) if !field.kind.accepts(value) => {
                    return Err(Error::validation(
                        &self.request,
                        &field.name,
                        format!("expected {}, got {}", field.kind, json_type(value)),
                    ));
                }
                Some(value) => {
                    validated.insert(field.name.clone(), value.clone());
                }
            }
        }

        for key in arguments.keys().filter(|k| self.field(k).is_none()) {
            match policy {
                ExtraFieldPolicy::Ignore => {
                    debug!(tool = %self.request, field = %key, "Ignoring undeclared field");
                }
                ExtraFieldPolicy::Reject => {
                    return Err(Error::StrictSchema {
                        tool: self.request.clone(),
                        field: key.clone(),
                    });
                }
            }
        }

        Ok(validated)
    }
}
