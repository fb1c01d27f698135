use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;

use crate::models::completion::Completion;
use crate::models::message::Message;
use crate::models::tool::Tool;
use crate::providers::base::{FragmentStream, Provider, Usage};

/// A mock provider that returns pre-configured responses for testing
///
/// Every call is recorded along with the messages it was given, so tests can inspect
/// the conversation exactly as the endpoint would have seen it.
#[derive(Clone, Default)]
pub struct MockProvider {
    completions: Arc<Mutex<Vec<Message>>>,
    streams: Arc<Mutex<Vec<Vec<String>>>>,
    complete_calls: Arc<Mutex<Vec<(Vec<Message>, Vec<Tool>)>>>,
    stream_calls: Arc<Mutex<Vec<Vec<Message>>>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of single-shot responses
    pub fn new(completions: Vec<Message>) -> Self {
        Self {
            completions: Arc::new(Mutex::new(completions)),
            ..Default::default()
        }
    }

    /// Queue the fragments of a streamed response
    pub fn with_stream<S: Into<String>>(self, fragments: Vec<S>) -> Self {
        self.streams
            .lock()
            .unwrap()
            .push(fragments.into_iter().map(Into::into).collect());
        self
    }

    pub fn complete_calls(&self) -> Vec<(Vec<Message>, Vec<Tool>)> {
        self.complete_calls.lock().unwrap().clone()
    }

    pub fn stream_calls(&self) -> Vec<Vec<Message>> {
        self.stream_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, messages: &[Message], tools: &[Tool]) -> Result<(Completion, Usage)> {
        self.complete_calls
            .lock()
            .unwrap()
            .push((messages.to_vec(), tools.to_vec()));

        let mut completions = self.completions.lock().unwrap();
        let message = if completions.is_empty() {
            // Return empty response if no more pre-configured responses
            Message::assistant()
        } else {
            completions.remove(0)
        };
        Ok((Completion::from_message(message), Usage::default()))
    }

    async fn stream(&self, messages: &[Message]) -> Result<FragmentStream> {
        self.stream_calls.lock().unwrap().push(messages.to_vec());

        let mut streams = self.streams.lock().unwrap();
        let fragments = if streams.is_empty() {
            Vec::new()
        } else {
            streams.remove(0)
        };
        Ok(Box::pin(futures::stream::iter(
            fragments.into_iter().map(Ok::<_, anyhow::Error>),
        )))
    }
}
