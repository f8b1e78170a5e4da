//! Core Agent trait definition

use crate::Result;
use async_trait::async_trait;

/// Core trait that all agents must implement
///
/// An agent consumes one turn of input and produces one turn of output.
/// Agents that expose tools answer structured requests with the tool's
/// result and pass anything else through as natural language.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Process one turn of input and return the agent's reply
    async fn process(&self, input: String) -> Result<String>;

    /// Get the agent's name
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl Agent for Echo {
        async fn process(&self, input: String) -> Result<String> {
            Ok(input)
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    #[tokio::test]
    async fn test_agent_object_safety() {
        let agent: Box<dyn Agent> = Box::new(Echo);
        assert_eq!(agent.name(), "echo");
        assert_eq!(agent.process("hi".to_string()).await.unwrap(), "hi");
    }
}
