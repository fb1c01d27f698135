use anyhow::{Context, Result};
use futures::TryStreamExt;
use std::io::Write;
use tracing::{debug, info, warn};

use crate::errors::AgentResult;
use crate::models::completion::Completion;
use crate::models::conversation::Conversation;
use crate::models::message::Message;
use crate::models::tool::Tool;
use crate::providers::base::Provider;
use crate::tools::{ToolExecutor, ToolRegistry};

/// Printed, and returned, when the model answers without asking for a tool
pub const NO_TOOL_CALL_NOTICE: &str = "No function call detected.";

/// How a turn ended
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// The streamed answer given after the tool results were fed back
    Final(String),
    /// The model did not request a tool, so no answer was streamed
    NoToolCall,
}

impl Answer {
    pub fn text(&self) -> &str {
        match self {
            Answer::Final(text) => text,
            Answer::NoToolCall => NO_TOOL_CALL_NOTICE,
        }
    }
}

/// The result of one round of conversation
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub conversation: Conversation,
    pub answer: Answer,
}

/// Agent drives a single ask, maybe-invoke-tool, answer round against a chat endpoint
pub struct Agent {
    provider: Box<dyn Provider>,
    registry: ToolRegistry,
}

impl Agent {
    /// Create a new Agent with the specified provider and no tools
    pub fn new(provider: Box<dyn Provider>) -> Self {
        Self {
            provider,
            registry: ToolRegistry::new(),
        }
    }

    /// Register a local tool the model may ask for
    pub fn add_tool(&mut self, executor: Box<dyn ToolExecutor>) -> AgentResult<()> {
        self.registry.register(executor)
    }

    /// The catalog advertised to the model
    pub fn tools(&self) -> Vec<Tool> {
        self.registry.catalog()
    }

    /// Run one turn, offering every registered tool
    ///
    /// The final answer is written to `out` fragment by fragment as it streams in.
    pub async fn run_turn<W: Write>(
        &self,
        system_prompt: &str,
        user_question: &str,
        out: &mut W,
    ) -> Result<Turn> {
        let catalog = self.tools();
        self.run_turn_with_catalog(system_prompt, user_question, &catalog, out)
            .await
    }

    /// Run one turn, offering only `catalog`
    ///
    /// A tool request is only honoured when the catalog is non-empty, whatever the
    /// endpoint claims. Tool calls are still resolved against the registered tools.
    pub async fn run_turn_with_catalog<W: Write>(
        &self,
        system_prompt: &str,
        user_question: &str,
        catalog: &[Tool],
        out: &mut W,
    ) -> Result<Turn> {
        let mut conversation = Conversation::new(system_prompt, user_question);

        let (completion, usage) = self
            .provider
            .complete(conversation.messages(), catalog)
            .await?;
        debug!(?usage, tools = catalog.len(), "completion received");

        let request = match completion {
            Completion::ToolRequest(message) if !catalog.is_empty() => message,
            Completion::ToolRequest(message) => {
                warn!(
                    calls = message.tool_calls.len(),
                    "ignoring tool request, no tools were offered"
                );
                return Self::finish_without_tools(conversation, message, out);
            }
            Completion::Answer(message) => {
                return Self::finish_without_tools(conversation, message, out);
            }
        };

        let responses = self.dispatch_tool_calls(&request).await?;
        conversation.push(request);
        conversation.extend(responses);

        debug!(messages = conversation.len(), "streaming final answer");
        let mut stream = self.provider.stream(conversation.messages()).await?;
        let mut answer = String::new();
        while let Some(fragment) = stream.try_next().await? {
            // one write and one flush per fragment
            out.write_all(fragment.as_bytes())?;
            out.flush()?;
            answer.push_str(&fragment);
        }
        out.write_all(b"\n")?;
        out.flush()?;

        Ok(Turn {
            conversation,
            answer: Answer::Final(answer),
        })
    }

    /// Run every call in the request, in order, producing one tool message per call
    async fn dispatch_tool_calls(&self, request: &Message) -> Result<Vec<Message>> {
        let mut responses = Vec::with_capacity(request.tool_calls.len());
        for call in &request.tool_calls {
            info!(tool = %call.name, "dispatching tool call");
            let output = self
                .registry
                .dispatch(call)
                .await
                .with_context(|| format!("Tool call to {} failed", call.name))?;
            responses.push(Message::tool(&call.name).with_text(output));
        }
        Ok(responses)
    }

    fn finish_without_tools<W: Write>(
        mut conversation: Conversation,
        reply: Message,
        out: &mut W,
    ) -> Result<Turn> {
        conversation.push(reply);
        writeln!(out, "{}", NO_TOOL_CALL_NOTICE)?;
        out.flush()?;
        Ok(Turn {
            conversation,
            answer: Answer::NoToolCall,
        })
    }
}
