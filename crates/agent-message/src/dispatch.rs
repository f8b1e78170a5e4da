//! Request parsing and dispatch
//!
//! One LLM turn moves from awaiting input to dispatched at most once:
//!
//! 1. the text is parsed as a `{"request": ...}` envelope, otherwise it is
//!    natural language and nothing happens;
//! 2. `request` is looked up in the registry;
//! 3. the arguments are validated against the tool's declared fields;
//! 4. the typed message is decoded and handed to the bound handler.
//!
//! Any failure before step 4 leaves the handler uninvoked.

use crate::message::{ToolResponse, TurnOutcome};
use crate::parse::{ToolRequest, parse_request};
use crate::registry::ToolRegistry;
use agent_core::{Error, Result};
use serde_json::Value;
use tracing::{debug, info, warn};

impl<A> ToolRegistry<A> {
    /// Handle one turn of raw LLM output
    pub async fn dispatch(&self, agent: &A, text: &str) -> Result<TurnOutcome> {
        match parse_request(text, &self.config) {
            Some(request) => self
                .dispatch_request(agent, request)
                .await
                .map(TurnOutcome::Dispatched),
            None => {
                debug!(length = text.len(), "Turn is natural language");
                Ok(TurnOutcome::NaturalLanguage(text.to_string()))
            }
        }
    }

    /// Dispatch a native tool call (`name` plus argument object)
    pub async fn dispatch_tool_call(
        &self,
        agent: &A,
        name: &str,
        input: &Value,
    ) -> Result<ToolResponse> {
        let request = ToolRequest::from_tool_call(name, input).ok_or_else(|| {
            Error::validation(name, "arguments", "must be a JSON object")
        })?;
        self.dispatch_request(agent, request).await
    }

    /// Validate an already parsed envelope and invoke its handler
    pub async fn dispatch_request(&self, agent: &A, request: ToolRequest) -> Result<ToolResponse> {
        let ToolRequest { request, arguments } = request;

        let Some(entry) = self.entry(&request) else {
            warn!(tool = %request, "Unknown tool requested");
            return Err(Error::UnknownTool(request));
        };

        let arguments = entry
            .schema
            .validate(&arguments, self.config.extra_fields)
            .inspect_err(|e| warn!(tool = %request, error = %e, "Rejected tool request"))?;

        let pending = (entry.invoke)(agent, Value::Object(arguments.clone()))
            .inspect_err(|e| warn!(tool = %request, error = %e, "Rejected tool request"))?;

        info!(tool = %request, "Dispatching tool request");
        let result = pending.await.map_err(|e| {
            warn!(tool = %request, error = %e, "Tool handler failed");
            Error::HandlerFailed {
                tool: request.clone(),
                reason: e.to_string(),
            }
        })?;
        debug!(tool = %request, result_length = result.len(), "Tool handler completed");

        Ok(ToolResponse {
            purpose: entry.schema.purpose.clone(),
            request,
            arguments,
            result,
        })
    }
}
