//! Recognizing a tool request in LLM output

use crate::config::ProtocolConfig;
use serde_json::{Map, Value};

/// The generic envelope of a tool request, before schema validation
#[derive(Debug, Clone, PartialEq)]
pub struct ToolRequest {
    /// Tool identifier as sent
    pub request: String,
    /// Every other key, minus the `purpose` and `result` envelope keys
    pub arguments: Map<String, Value>,
}

impl ToolRequest {
    /// Read an envelope from a JSON value
    ///
    /// Returns `None` unless `value` is an object with a string `request`.
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(mut arguments) = value else {
            return None;
        };
        let Value::String(request) = arguments.remove("request")? else {
            return None;
        };
        arguments.remove("purpose");
        arguments.remove("result");
        Some(Self { request, arguments })
    }

    /// Envelope for a native tool call: name plus argument object
    pub fn from_tool_call(name: &str, input: &Value) -> Option<Self> {
        let Value::Object(arguments) = input else {
            return None;
        };
        let mut envelope = arguments.clone();
        envelope.insert("request".to_string(), Value::String(name.to_string()));
        Self::from_value(Value::Object(envelope))
    }
}

/// Parse one turn of LLM output as a tool request
///
/// Text that is not a JSON object carrying a string `request` is natural
/// language and yields `None`.
pub fn parse_request(text: &str, config: &ProtocolConfig) -> Option<ToolRequest> {
    let mut body = text.trim();
    if config.strip_code_fences {
        body = strip_code_fence(body);
    }
    if !body.starts_with('{') {
        return None;
    }
    serde_json::from_str(body).ok().and_then(ToolRequest::from_value)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(body) = text
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return text;
    };
    // an opening line that is not JSON is a language tag
    match body.find('\n') {
        Some(pos) if !body[..pos].trim_start().starts_with('{') => body[pos + 1..].trim(),
        _ => body.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(text: &str) -> Option<ToolRequest> {
        parse_request(text, &ProtocolConfig::default())
    }

    #[test]
    fn test_canonical_request() {
        let req = parse(r#"{"request": "country_capital", "country": "France", "city": "Paris"}"#)
            .unwrap();
        assert_eq!(req.request, "country_capital");
        assert_eq!(req.arguments.len(), 2);
        assert_eq!(req.arguments["city"], "Paris");
    }

    #[test]
    fn test_natural_language() {
        assert!(parse("What is the population of France?").is_none());
        assert!(parse("").is_none());
        assert!(parse("{not json").is_none());
    }

    #[test]
    fn test_json_without_request() {
        assert!(parse(r#"{"country": "France"}"#).is_none());
        assert!(parse(r#"{"request": 7}"#).is_none());
        assert!(parse(r#"["request", "country_capital"]"#).is_none());
    }

    #[test]
    fn test_envelope_keys_removed() {
        let req = parse(
            r#"{"request": "country_capital", "purpose": "why", "result": "", "country": "France"}"#,
        )
        .unwrap();
        assert!(!req.arguments.contains_key("purpose"));
        assert!(!req.arguments.contains_key("result"));
        assert!(req.arguments.contains_key("country"));
    }

    #[test]
    fn test_code_fence() {
        let fenced = "```json\n{\"request\": \"double_number\", \"x\": 4}\n```";
        assert_eq!(parse(fenced).unwrap().request, "double_number");

        let inline = "```{\"request\": \"double_number\", \"x\": 4}```";
        assert_eq!(parse(inline).unwrap().request, "double_number");

        let config = ProtocolConfig {
            strip_code_fences: false,
            ..ProtocolConfig::default()
        };
        assert!(parse_request(fenced, &config).is_none());
    }

    #[test]
    fn test_from_tool_call() {
        let req = ToolRequest::from_tool_call("double_number", &json!({"x": 4})).unwrap();
        assert_eq!(req.request, "double_number");
        assert_eq!(req.arguments["x"], 4);
        assert!(ToolRequest::from_tool_call("double_number", &json!(4)).is_none());
    }
}
