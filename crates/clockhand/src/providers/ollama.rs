use super::base::{FragmentStream, Provider, Usage};
use super::configs::OllamaProviderConfig;
use super::utils::{
    get_usage, messages_to_ollama_spec, ollama_response_to_message, ollama_stream_to_fragments,
    tools_to_ollama_spec,
};
use crate::models::completion::Completion;
use crate::models::message::Message;
use crate::models::tool::Tool;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;

pub const OLLAMA_HOST: &str = "http://localhost:11434";
pub const OLLAMA_MODEL: &str = "llama3.1";

pub struct OllamaProvider {
    client: Client,
    config: OllamaProviderConfig,
}

impl OllamaProvider {
    pub fn new(config: OllamaProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // 10 minutes timeout
            .build()?;

        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn payload(&self, messages: &[Message], tools: &[Tool], stream: bool) -> Result<Value> {
        let mut payload = json!({
            "model": self.config.model,
            "messages": messages_to_ollama_spec(messages),
            "stream": stream,
        });

        let tools_spec = tools_to_ollama_spec(tools)?;
        if !tools_spec.is_empty() {
            payload["tools"] = json!(tools_spec);
        }

        let mut options = serde_json::Map::new();
        if let Some(temp) = self.config.temperature {
            options.insert("temperature".to_string(), json!(temp));
        }
        if let Some(tokens) = self.config.max_tokens {
            options.insert("num_predict".to_string(), json!(tokens));
        }
        if !options.is_empty() {
            payload["options"] = Value::Object(options);
        }

        Ok(payload)
    }

    async fn post(&self, payload: &Value) -> Result<Response> {
        let url = format!("{}/api/chat", self.config.host.trim_end_matches('/'));
        tracing::debug!(%url, %payload, "sending chat request");

        let response = self.client.post(&url).json(payload).send().await?;

        match response.status() {
            StatusCode::OK => Ok(response),
            status if status == StatusCode::TOO_MANY_REQUESTS || status.as_u16() >= 500 => {
                Err(anyhow!("Server error: {}", status))
            }
            status => Err(anyhow!("Request failed: {}\nPayload: {}", status, payload)),
        }
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    async fn complete(&self, messages: &[Message], tools: &[Tool]) -> Result<(Completion, Usage)> {
        let payload = self.payload(messages, tools, false)?;
        let response: Value = self.post(&payload).await?.json().await?;

        let message = ollama_response_to_message(&response, !tools.is_empty())?;
        let usage = get_usage(&response);

        Ok((Completion::from_message(message), usage))
    }

    async fn stream(&self, messages: &[Message]) -> Result<FragmentStream> {
        let payload = self.payload(messages, &[], true)?;
        let response = self.post(&payload).await?;

        Ok(Box::pin(ollama_stream_to_fragments(response.bytes_stream())))
    }
}
