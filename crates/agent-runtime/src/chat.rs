//! Chat agent: one LLM turn, at most one tool dispatch

use agent_core::{Agent, Error, Result};
use agent_llm::{CompletionRequestBuilder, CompletionSettings, LLMProvider, Message};
use agent_message::{ToolRegistry, ToolResponse, TurnOutcome};
use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Configuration for a chat agent
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatAgentConfig {
    /// Name of the agent
    pub name: String,

    /// System message; tool instructions are appended to it
    pub system_message: String,

    /// Model settings, forwarded to the provider untouched
    pub llm: CompletionSettings,

    /// Also advertise tools as function-calling definitions
    pub native_tools: bool,
}

impl Default for ChatAgentConfig {
    fn default() -> Self {
        Self {
            name: "chat-agent".to_string(),
            system_message: "You are a helpful assistant.".to_string(),
            llm: CompletionSettings::default(),
            native_tools: false,
        }
    }
}

/// What the agent produced for one turn
#[derive(Debug, Clone, PartialEq)]
pub enum AgentReply {
    /// The LLM answered in natural language
    Text(String),
    /// The LLM requested a tool and the handler ran
    Tool(ToolResponse),
}

impl AgentReply {
    /// Text shown to the user: the reply itself, or the tool's result
    pub fn content(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Tool(response) => &response.result,
        }
    }
}

/// An LLM-backed agent that exposes the tools in a [`ToolRegistry`]
///
/// `A` is the handler type implementing `HandleTool` for each registered
/// tool. The system message is rebuilt from the registry on every turn.
pub struct ChatAgent<A> {
    provider: Arc<dyn LLMProvider>,
    registry: Arc<ToolRegistry<A>>,
    handler: Arc<A>,
    config: ChatAgentConfig,
    rng: Mutex<StdRng>,
}

impl<A: Send + Sync + 'static> ChatAgent<A> {
    /// Create a new chat agent
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        registry: Arc<ToolRegistry<A>>,
        handler: Arc<A>,
        config: ChatAgentConfig,
    ) -> Self {
        Self {
            provider,
            registry,
            handler,
            config,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Use a fixed seed for few-shot example selection
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Get the agent's configuration
    pub fn config(&self) -> &ChatAgentConfig {
        &self.config
    }

    /// The tools this agent exposes
    pub fn registry(&self) -> &ToolRegistry<A> {
        &self.registry
    }

    /// System message for the next turn
    pub fn system_message(&self) -> Result<String> {
        let instructions = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|e| Error::ProcessingFailed(format!("rng lock poisoned: {e}")))?;
            self.registry.instructions(&mut *rng)?
        };

        if instructions.is_empty() {
            Ok(self.config.system_message.clone())
        } else {
            Ok(format!("{}\n\n{}", self.config.system_message, instructions))
        }
    }

    /// Route raw LLM output without calling the model
    pub async fn handle_output(&self, text: &str) -> Result<TurnOutcome> {
        self.registry.dispatch(self.handler.as_ref(), text).await
    }

    /// Run one turn: prompt the LLM, then dispatch at most one tool request
    pub async fn respond(&self, input: impl Into<String>) -> Result<AgentReply> {
        let mut builder = CompletionRequestBuilder::from_settings(&self.config.llm)
            .system(self.system_message()?)
            .add_message(Message::user(input));
        if self.config.native_tools && !self.registry.is_empty() {
            builder = builder.tools(self.registry.definitions());
        }
        let request = builder.build();

        info!(
            agent = %self.config.name,
            provider = %self.provider.name(),
            model = %request.model,
            tool_count = self.registry.len(),
            "Sending request to LLM"
        );
        let response = self.provider.complete(request).await?;
        debug!(
            stop_reason = ?response.stop_reason,
            output_tokens = response.usage.output_tokens,
            "LLM response received"
        );

        if let Some((name, input)) = response.message.tool_use() {
            let result = self
                .registry
                .dispatch_tool_call(self.handler.as_ref(), name, input)
                .await?;
            return Ok(AgentReply::Tool(result));
        }

        let text = response.message.text().unwrap_or_default();
        match self.handle_output(text).await? {
            TurnOutcome::Dispatched(result) => Ok(AgentReply::Tool(result)),
            TurnOutcome::NaturalLanguage(text) => Ok(AgentReply::Text(text)),
        }
    }
}

#[async_trait]
impl<A: Send + Sync + 'static> Agent for ChatAgent<A> {
    async fn process(&self, input: String) -> Result<String> {
        self.respond(input)
            .await
            .map(|reply| reply.content().to_string())
    }

    fn name(&self) -> &str {
        &self.config.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_llm::{
        CompletionRequest, CompletionResponse, ContentBlock, MessageContent, Role, StopReason,
        TokenUsage,
    };
    use agent_message::{ArgField, ArgKind, HandleTool, ToolMessage};
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize)]
    struct DoubleNumber {
        x: i64,
    }

    impl ToolMessage for DoubleNumber {
        const REQUEST: &'static str = "double_number";

        fn purpose() -> &'static str {
            "compute the double of <x>"
        }

        fn fields() -> Vec<ArgField> {
            vec![ArgField::required("x", ArgKind::Integer, "number to double")]
        }

        fn examples() -> Vec<Self> {
            vec![Self { x: 15 }]
        }
    }

    struct Doubler;

    #[async_trait]
    impl HandleTool<DoubleNumber> for Doubler {
        type Output = i64;

        async fn handle(&self, message: DoubleNumber) -> Result<i64> {
            Ok(message.x * 2)
        }
    }

    /// Replies with a fixed response and keeps the last request
    struct ScriptedProvider {
        reply: CompletionResponse,
        last_request: Mutex<Option<CompletionRequest>>,
    }

    impl ScriptedProvider {
        fn new(reply: CompletionResponse) -> Arc<Self> {
            Arc::new(Self {
                reply,
                last_request: Mutex::new(None),
            })
        }

        fn last_request(&self) -> CompletionRequest {
            self.last_request.lock().unwrap().clone().unwrap()
        }
    }

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> agent_llm::Result<CompletionResponse> {
            *self.last_request.lock().unwrap() = Some(request);
            Ok(self.reply.clone())
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn agent(provider: Arc<ScriptedProvider>, config: ChatAgentConfig) -> ChatAgent<Doubler> {
        let registry = ToolRegistry::builder()
            .tool::<DoubleNumber>()
            .unwrap()
            .build();
        ChatAgent::new(provider, Arc::new(registry), Arc::new(Doubler), config).with_seed(1)
    }

    #[tokio::test]
    async fn test_tool_request_is_dispatched() {
        let provider =
            ScriptedProvider::new(CompletionResponse::text(r#"{"request": "double_number", "x": 15}"#));
        let agent = agent(provider.clone(), ChatAgentConfig::default());

        let reply = agent.respond("15").await.unwrap();
        let AgentReply::Tool(response) = reply else {
            panic!("expected tool reply");
        };
        assert_eq!(response.result, "30");

        let request = provider.last_request();
        let system = request.system.unwrap();
        assert!(system.starts_with("You are a helpful assistant."));
        assert!(system.contains("double_number: compute the double of <x>"));
        assert!(request.tools.is_none());
    }

    #[tokio::test]
    async fn test_natural_language_reply() {
        let provider = ScriptedProvider::new(CompletionResponse::text("I cannot help with that."));
        let agent = agent(provider, ChatAgentConfig::default());

        assert_eq!(
            agent.process("hello".to_string()).await.unwrap(),
            "I cannot help with that."
        );
    }

    #[tokio::test]
    async fn test_native_tool_call() {
        let provider = ScriptedProvider::new(CompletionResponse {
            message: Message {
                role: Role::Assistant,
                content: Some(MessageContent::Blocks(vec![ContentBlock::ToolUse {
                    id: "call_1".to_string(),
                    name: "double_number".to_string(),
                    input: json!({"x": 4}),
                }])),
            },
            stop_reason: StopReason::ToolUse,
            usage: TokenUsage::default(),
        });
        let config = ChatAgentConfig {
            native_tools: true,
            ..ChatAgentConfig::default()
        };
        let agent = agent(provider.clone(), config);

        assert_eq!(agent.process("4".to_string()).await.unwrap(), "8");
        let tools = provider.last_request().tools.unwrap();
        assert_eq!(tools[0].name, "double_number");
    }

    #[tokio::test]
    async fn test_unknown_tool_surfaces() {
        let provider =
            ScriptedProvider::new(CompletionResponse::text(r#"{"request": "triple_number", "x": 1}"#));
        let agent = agent(provider, ChatAgentConfig::default());

        let err = agent.respond("1").await.unwrap_err();
        assert_eq!(err, Error::UnknownTool("triple_number".to_string()));
    }

    #[tokio::test]
    async fn test_settings_pass_through() {
        let provider = ScriptedProvider::new(CompletionResponse::text("ok"));
        let config = ChatAgentConfig {
            llm: CompletionSettings {
                model: "litellm/ollama/mixtral".to_string(),
                max_tokens: 100,
                temperature: Some(0.2),
            },
            ..ChatAgentConfig::default()
        };
        let agent = agent(provider.clone(), config);
        agent.respond("15").await.unwrap();

        let request = provider.last_request();
        assert_eq!(request.model, "litellm/ollama/mixtral");
        assert_eq!(request.max_tokens, 100);
        assert_eq!(request.temperature, Some(0.2));
    }

    #[test]
    fn test_empty_registry_keeps_system_message() {
        let provider = ScriptedProvider::new(CompletionResponse::text("ok"));
        let agent = ChatAgent::new(
            provider,
            Arc::new(ToolRegistry::<Doubler>::builder().build()),
            Arc::new(Doubler),
            ChatAgentConfig::default(),
        );
        assert_eq!(agent.system_message().unwrap(), "You are a helpful assistant.");
    }
}
