//! Tool message types and the handlers bound to them

use crate::schema::{ArgField, ToolSchema};
use agent_core::{Error, Result};
use async_trait::async_trait;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fmt::Display;

/// A structured request the LLM can send to an agent
///
/// Implemented by the argument record of one tool. The record serializes to
/// the tool's argument fields only; `request` comes from [`Self::REQUEST`]
/// and `purpose` from [`Self::purpose`].
///
/// # Example
///
/// ```
/// use agent_message::{ArgField, ArgKind, ToolMessage};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct CountryCapital {
///     country: String,
///     city: String,
/// }
///
/// impl ToolMessage for CountryCapital {
///     const REQUEST: &'static str = "country_capital";
///
///     fn purpose() -> &'static str {
///         "check if <city> is the capital of <country>"
///     }
///
///     fn fields() -> Vec<ArgField> {
///         vec![
///             ArgField::required("country", ArgKind::String, "name of the country"),
///             ArgField::required("city", ArgKind::String, "name of the city"),
///         ]
///     }
///
///     fn examples() -> Vec<Self> {
///         vec![CountryCapital { country: "France".into(), city: "Paris".into() }]
///     }
/// }
///
/// let json = CountryCapital::examples()[0].json_example().unwrap();
/// assert!(json.starts_with("{\n    \"request\": \"country_capital\""));
/// ```
pub trait ToolMessage: Serialize + DeserializeOwned + Send + 'static {
    /// Tool identifier, matched exactly against `request`
    const REQUEST: &'static str;

    /// Description of the tool in terms of its `<arg>` names
    fn purpose() -> &'static str;

    /// Declared argument fields
    fn fields() -> Vec<ArgField>;

    /// Few-shot examples; every tool must define at least one
    fn examples() -> Vec<Self> {
        Vec::new()
    }

    /// Erased descriptor of this tool
    fn schema() -> ToolSchema {
        ToolSchema::new(Self::REQUEST, Self::purpose(), Self::fields())
    }

    /// Indented canonical request JSON for this instance
    fn json_example(&self) -> Result<String> {
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        Envelope::of(self)
            .serialize(&mut ser)
            .map_err(|e| render_error(Self::REQUEST, &e))?;
        String::from_utf8(buf).map_err(|e| render_error(Self::REQUEST, &e))
    }

    /// Canonical request of this instance as a JSON object
    fn dict_example(&self) -> Result<Value> {
        serde_json::to_value(Envelope::of(self)).map_err(|e| render_error(Self::REQUEST, &e))
    }

    /// One example picked uniformly at random, rendered by [`Self::json_example`]
    fn usage_example<R: Rng + ?Sized>(rng: &mut R) -> Result<String> {
        let examples = Self::examples();
        examples
            .choose(rng)
            .ok_or_else(|| no_examples(Self::REQUEST))?
            .json_example()
    }
}

pub(crate) fn no_examples(tool: &str) -> Error {
    Error::Configuration(format!("tool '{tool}' defines no examples"))
}

fn render_error(tool: &str, err: &dyn Display) -> Error {
    Error::Configuration(format!("cannot render example for tool '{tool}': {err}"))
}

#[derive(Serialize)]
struct Envelope<'a, M> {
    request: &'static str,
    #[serde(flatten)]
    arguments: &'a M,
}

impl<'a, M: ToolMessage> Envelope<'a, M> {
    fn of(arguments: &'a M) -> Self {
        Self {
            request: M::REQUEST,
            arguments,
        }
    }
}

/// Agent-side handler for one tool message type
///
/// The agent type implements this once per tool it exposes; the registry
/// binds the implementation to `M::REQUEST`.
#[async_trait]
pub trait HandleTool<M: ToolMessage>: Send + Sync {
    /// Value reported back as the response's `result`
    type Output: Display + Send;

    async fn handle(&self, message: M) -> Result<Self::Output>;
}

/// Response record of a dispatched tool request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Tool identifier, unchanged from the request
    pub request: String,
    /// Purpose declared by the tool schema
    pub purpose: String,
    /// Validated arguments the handler received
    #[serde(flatten)]
    pub arguments: Map<String, Value>,
    /// Handler output rendered to string
    pub result: String,
}

impl ToolResponse {
    /// Decode the arguments back into the typed message
    pub fn message<M: ToolMessage>(&self) -> Result<M> {
        serde_json::from_value(Value::Object(self.arguments.clone()))
            .map_err(|e| Error::validation(&self.request, "arguments", e.to_string()))
    }
}

/// Result of handling one LLM turn
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Not a tool request; left for the caller to handle
    NaturalLanguage(String),
    /// A tool was invoked exactly once
    Dispatched(ToolResponse),
}

impl TurnOutcome {
    /// The response, if a tool was dispatched
    pub fn response(&self) -> Option<&ToolResponse> {
        match self {
            Self::Dispatched(response) => Some(response),
            Self::NaturalLanguage(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ArgKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct CountryCapital {
        country: String,
        city: String,
    }

    impl ToolMessage for CountryCapital {
        const REQUEST: &'static str = "country_capital";

        fn purpose() -> &'static str {
            "check if <city> is the capital of <country>"
        }

        fn fields() -> Vec<ArgField> {
            vec![
                ArgField::required("country", ArgKind::String, "name of the country"),
                ArgField::required("city", ArgKind::String, "name of the city"),
            ]
        }

        fn examples() -> Vec<Self> {
            vec![
                Self {
                    country: "France".into(),
                    city: "Paris".into(),
                },
                Self {
                    country: "Japan".into(),
                    city: "Osaka".into(),
                },
            ]
        }
    }

    #[derive(Serialize, Deserialize)]
    struct Undocumented {
        x: f64,
    }

    impl ToolMessage for Undocumented {
        const REQUEST: &'static str = "undocumented";

        fn purpose() -> &'static str {
            "does something with <x>"
        }

        fn fields() -> Vec<ArgField> {
            vec![ArgField::required("x", ArgKind::Number, "")]
        }
    }

    #[test]
    fn test_json_example_layout() {
        let json = CountryCapital::examples()[0].json_example().unwrap();
        assert_eq!(
            json,
            "{\n    \"request\": \"country_capital\",\n    \"country\": \"France\",\n    \"city\": \"Paris\"\n}"
        );
    }

    #[test]
    fn test_dict_example_excludes_envelope_fields() {
        let dict = CountryCapital::examples()[0].dict_example().unwrap();
        assert_eq!(
            dict,
            json!({"request": "country_capital", "country": "France", "city": "Paris"})
        );
        assert!(dict.get("purpose").is_none());
        assert!(dict.get("result").is_none());
    }

    #[test]
    fn test_usage_example_is_one_of_the_examples() {
        let rendered: Vec<String> = CountryCapital::examples()
            .iter()
            .map(|e| e.json_example().unwrap())
            .collect();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let example = CountryCapital::usage_example(&mut rng).unwrap();
            assert!(rendered.contains(&example));
        }
    }

    #[test]
    fn test_usage_example_is_seed_deterministic() {
        let a = CountryCapital::usage_example(&mut StdRng::seed_from_u64(42)).unwrap();
        let b = CountryCapital::usage_example(&mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_examples_is_configuration_error() {
        let err = Undocumented::usage_example(&mut StdRng::seed_from_u64(1)).unwrap_err();
        assert_eq!(
            err,
            Error::Configuration("tool 'undocumented' defines no examples".to_string())
        );
    }

    #[test]
    fn test_response_wire_format() {
        let mut arguments = Map::new();
        arguments.insert("country".into(), json!("France"));
        arguments.insert("city".into(), json!("Paris"));
        let response = ToolResponse {
            request: "country_capital".into(),
            purpose: CountryCapital::purpose().into(),
            arguments,
            result: "true".into(),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["request"], "country_capital");
        assert_eq!(value["city"], "Paris");
        assert_eq!(value["result"], "true");

        let message: CountryCapital = response.message().unwrap();
        assert_eq!(message, CountryCapital::examples().remove(0));
    }
}
