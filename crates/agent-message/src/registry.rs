//! Tool registry binding tool identifiers to schemas and handlers

use crate::config::{ExtraFieldPolicy, ProtocolConfig};
use crate::message::{HandleTool, ToolMessage, no_examples};
use crate::schema::ToolSchema;
use agent_core::{Error, Result};
use agent_llm::ToolDefinition;
use futures::future::BoxFuture;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Decode validated arguments into `M` and start the handler
pub(crate) type Invoke<A> = for<'a> fn(&'a A, Value) -> Result<BoxFuture<'a, Result<String>>>;

fn invoke<'a, A, M>(agent: &'a A, arguments: Value) -> Result<BoxFuture<'a, Result<String>>>
where
    A: HandleTool<M>,
    M: ToolMessage,
{
    let message: M = serde_json::from_value(arguments)
        .map_err(|e| Error::validation(M::REQUEST, "arguments", e.to_string()))?;
    Ok(Box::pin(async move {
        let output = agent.handle(message).await?;
        Ok(output.to_string())
    }))
}

pub(crate) struct ToolEntry<A> {
    pub(crate) schema: ToolSchema,
    pub(crate) examples: Vec<String>,
    pub(crate) invoke: Invoke<A>,
}

/// Immutable table of the tools an agent of type `A` exposes
///
/// Built once with [`ToolRegistry::builder`]; tools keep their registration
/// order for instruction rendering.
///
/// # Example
///
/// ```
/// use agent_message::{ArgField, ArgKind, HandleTool, ToolMessage, ToolRegistry};
/// use async_trait::async_trait;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct DoubleNumber {
///     x: i64,
/// }
///
/// impl ToolMessage for DoubleNumber {
///     const REQUEST: &'static str = "double_number";
///     fn purpose() -> &'static str {
///         "compute the double of <x>"
///     }
///     fn fields() -> Vec<ArgField> {
///         vec![ArgField::required("x", ArgKind::Integer, "number to double")]
///     }
///     fn examples() -> Vec<Self> {
///         vec![DoubleNumber { x: 15 }]
///     }
/// }
///
/// struct Doubler;
///
/// #[async_trait]
/// impl HandleTool<DoubleNumber> for Doubler {
///     type Output = i64;
///     async fn handle(&self, message: DoubleNumber) -> agent_message::Result<i64> {
///         Ok(message.x * 2)
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let registry = ToolRegistry::<Doubler>::builder()
///     .tool::<DoubleNumber>()
///     .unwrap()
///     .build();
///
/// let outcome = registry
///     .dispatch(&Doubler, r#"{"request": "double_number", "x": 21}"#)
///     .await
///     .unwrap();
/// assert_eq!(outcome.response().unwrap().result, "42");
/// # });
/// ```
pub struct ToolRegistry<A> {
    pub(crate) tools: Vec<ToolEntry<A>>,
    pub(crate) index: HashMap<String, usize>,
    pub(crate) config: ProtocolConfig,
}

impl<A> ToolRegistry<A> {
    /// Start building a registry
    pub fn builder() -> ToolRegistryBuilder<A> {
        ToolRegistryBuilder::new()
    }

    pub(crate) fn entry(&self, request: &str) -> Option<&ToolEntry<A>> {
        self.index.get(request).map(|&i| &self.tools[i])
    }

    /// Protocol configuration in effect
    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    /// Schema of a registered tool
    pub fn schema(&self, request: &str) -> Option<&ToolSchema> {
        self.entry(request).map(|e| &e.schema)
    }

    /// Schemas in registration order
    pub fn schemas(&self) -> impl Iterator<Item = &ToolSchema> {
        self.tools.iter().map(|e| &e.schema)
    }

    /// Check whether a tool identifier is registered
    pub fn contains(&self, request: &str) -> bool {
        self.index.contains_key(request)
    }

    /// Rendered examples of a tool, in declaration order
    pub fn examples(&self, request: &str) -> Result<&[String]> {
        self.entry(request)
            .map(|e| e.examples.as_slice())
            .ok_or_else(|| Error::UnknownTool(request.to_string()))
    }

    /// One example of a tool, picked uniformly at random
    pub fn usage_example<R: Rng + ?Sized>(&self, request: &str, rng: &mut R) -> Result<&str> {
        self.examples(request)?
            .choose(rng)
            .map(String::as_str)
            .ok_or_else(|| no_examples(request))
    }

    /// Function-calling definitions of every tool
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.schemas().map(ToolSchema::definition).collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Builder for [`ToolRegistry`]
pub struct ToolRegistryBuilder<A> {
    tools: Vec<ToolEntry<A>>,
    index: HashMap<String, usize>,
    config: ProtocolConfig,
}

impl<A> Default for ToolRegistryBuilder<A> {
    fn default() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
            config: ProtocolConfig::default(),
        }
    }
}

impl<A> ToolRegistryBuilder<A> {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the protocol configuration
    pub fn config(mut self, config: ProtocolConfig) -> Self {
        self.config = config;
        self
    }

    /// Register tool `M`, handled by `A`'s `HandleTool<M>` implementation
    ///
    /// Fails with `Error::Configuration` if the identifier is taken, the
    /// schema is malformed, or the examples are missing or do not validate
    /// against the schema.
    pub fn tool<M>(mut self) -> Result<Self>
    where
        A: HandleTool<M>,
        M: ToolMessage,
    {
        let schema = M::schema();
        schema.check()?;
        if self.index.contains_key(&schema.request) {
            return Err(Error::Configuration(format!(
                "tool '{}' registered twice",
                schema.request
            )));
        }

        let examples = M::examples();
        if examples.is_empty() {
            return Err(no_examples(M::REQUEST));
        }
        let mut rendered = Vec::with_capacity(examples.len());
        for (i, example) in examples.iter().enumerate() {
            check_example::<M>(&schema, example)
                .map_err(|e| Error::Configuration(format!("example {i} is invalid: {e}")))?;
            rendered.push(example.json_example()?);
        }

        debug!(
            tool = %schema.request,
            fields = schema.fields.len(),
            examples = rendered.len(),
            "Registered tool"
        );
        self.index.insert(schema.request.clone(), self.tools.len());
        self.tools.push(ToolEntry {
            schema,
            examples: rendered,
            invoke: invoke::<A, M>,
        });
        Ok(self)
    }

    /// Finish the registry
    pub fn build(self) -> ToolRegistry<A> {
        ToolRegistry {
            tools: self.tools,
            index: self.index,
            config: self.config,
        }
    }
}

/// An example must be a strict, decodable instance of its own schema
fn check_example<M: ToolMessage>(schema: &ToolSchema, example: &M) -> Result<()> {
    let Value::Object(mut arguments) = example.dict_example()? else {
        return Err(Error::Configuration(
            "example does not serialize to an object".to_string(),
        ));
    };
    arguments.remove("request");
    let validated = schema.validate(&arguments, ExtraFieldPolicy::Reject)?;
    serde_json::from_value::<M>(Value::Object(validated))
        .map_err(|e| Error::validation(M::REQUEST, "arguments", e.to_string()))?;
    Ok(())
}
