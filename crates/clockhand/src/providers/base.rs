use anyhow::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

use crate::models::completion::Completion;
use crate::models::message::Message;
use crate::models::tool::Tool;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

/// A lazy, single-use sequence of text deltas from a streamed chat response
pub type FragmentStream = BoxStream<'static, Result<String>>;

/// Base trait for chat endpoints
#[async_trait]
pub trait Provider: Send + Sync {
    /// Generate the next assistant message for the conversation, offering the given tools
    async fn complete(&self, messages: &[Message], tools: &[Tool]) -> Result<(Completion, Usage)>;

    /// Generate the next assistant message as a stream of text fragments, without tools
    async fn stream(&self, messages: &[Message]) -> Result<FragmentStream>;
}
