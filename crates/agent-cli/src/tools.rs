//! Demo tools exposed by the CLI agent

use agent_core::Result;
use agent_message::{
    ArgField, ArgKind, HandleTool, ProtocolConfig, ToolMessage, ToolRegistry,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Check whether a city is the capital of a country
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryCapital {
    pub country: String,
    pub city: String,
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
                country: "France".to_string(),
                city: "Paris".to_string(),
            },
            Self {
                country: "Japan".to_string(),
                city: "Osaka".to_string(),
            },
        ]
    }
}

/// Double a number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoubleNumber {
    pub x: i64,
}

impl ToolMessage for DoubleNumber {
    const REQUEST: &'static str = "double_number";

    fn purpose() -> &'static str {
        "compute the double of the number <x>"
    }

    fn fields() -> Vec<ArgField> {
        vec![ArgField::required("x", ArgKind::Integer, "the number to double")]
    }

    fn examples() -> Vec<Self> {
        vec![Self { x: 15 }, Self { x: -4 }]
    }
}

const CAPITALS: &[(&str, &str)] = &[
    ("australia", "canberra"),
    ("canada", "ottawa"),
    ("china", "beijing"),
    ("france", "paris"),
    ("germany", "berlin"),
    ("india", "new delhi"),
    ("italy", "rome"),
    ("japan", "tokyo"),
    ("spain", "madrid"),
    ("united kingdom", "london"),
];

/// Handler for the demo tools
#[derive(Debug, Default)]
pub struct DemoAgent;

#[async_trait]
impl HandleTool<CountryCapital> for DemoAgent {
    type Output = bool;

    async fn handle(&self, message: CountryCapital) -> Result<bool> {
        let country = message.country.trim().to_lowercase();
        let city = message.city.trim().to_lowercase();
        Ok(CAPITALS.iter().any(|&(c, cap)| c == country && cap == city))
    }
}

#[async_trait]
impl HandleTool<DoubleNumber> for DemoAgent {
    type Output = i64;

    async fn handle(&self, message: DoubleNumber) -> Result<i64> {
        message.x.checked_mul(2).ok_or_else(|| {
            agent_core::Error::ProcessingFailed(format!("{} is too large to double", message.x))
        })
    }
}

/// Registry of the demo tools
pub fn registry(config: ProtocolConfig) -> Result<ToolRegistry<DemoAgent>> {
    Ok(ToolRegistry::builder()
        .config(config)
        .tool::<CountryCapital>()?
        .tool::<DoubleNumber>()?
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::Error;
    use agent_message::TurnOutcome;

    #[tokio::test]
    async fn test_country_capital() {
        let registry = registry(ProtocolConfig::default()).unwrap();
        let outcome = registry
            .dispatch(
                &DemoAgent,
                r#"{"request": "country_capital", "country": "France", "city": "Paris"}"#,
            )
            .await
            .unwrap();
        assert_eq!(outcome.response().unwrap().result, "true");

        let outcome = registry
            .dispatch(
                &DemoAgent,
                r#"{"request": "country_capital", "country": "Japan", "city": "Osaka"}"#,
            )
            .await
            .unwrap();
        assert_eq!(outcome.response().unwrap().result, "false");
    }

    #[tokio::test]
    async fn test_double_number_overflow() {
        let registry = registry(ProtocolConfig::default()).unwrap();
        let text = format!(r#"{{"request": "double_number", "x": {}}}"#, i64::MIN);
        let err = registry.dispatch(&DemoAgent, &text).await.unwrap_err();
        assert!(matches!(err, Error::HandlerFailed { .. }));
    }

    #[tokio::test]
    async fn test_question_passes_through() {
        let registry = registry(ProtocolConfig::strict()).unwrap();
        let outcome = registry
            .dispatch(&DemoAgent, "What is the population of France?")
            .await
            .unwrap();
        assert!(matches!(outcome, TurnOutcome::NaturalLanguage(_)));
    }
}
