use super::message::Message;

/// The outcome of a single-shot chat call
///
/// The model either asks for one or more tools to be run, or answers directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// An assistant message carrying at least one tool call
    ToolRequest(Message),
    /// An assistant message with no tool calls
    Answer(Message),
}

impl Completion {
    /// Classify an assistant message by whether it carries tool calls
    pub fn from_message(message: Message) -> Self {
        if message.has_tool_calls() {
            Completion::ToolRequest(message)
        } else {
            Completion::Answer(message)
        }
    }

    pub fn message(&self) -> &Message {
        match self {
            Completion::ToolRequest(message) | Completion::Answer(message) => message,
        }
    }
}
