use anyhow::{anyhow, Context, Result};
use futures::{Stream, StreamExt};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::base::Usage;
use crate::errors::AgentError;
use crate::models::message::Message;
use crate::models::tool::{Tool, ToolCall};

lazy_static! {
    static ref VALID_NAME: Regex = Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// Convert internal Message format to ollama's `/api/chat` message specification
pub fn messages_to_ollama_spec(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|message| {
            let mut converted = json!({
                "role": message.role,
                "content": message.content,
            });

            if !message.tool_calls.is_empty() {
                let tool_calls: Vec<Value> = message
                    .tool_calls
                    .iter()
                    .map(|call| {
                        json!({
                            "function": {
                                "name": call.name,
                                "arguments": call.arguments,
                            }
                        })
                    })
                    .collect();
                converted["tool_calls"] = json!(tool_calls);
            }

            if let Some(name) = &message.name {
                converted["name"] = json!(name);
            }

            converted
        })
        .collect()
}

/// Convert internal Tool format to ollama's tool specification
pub fn tools_to_ollama_spec(tools: &[Tool]) -> Result<Vec<Value>> {
    let mut tool_names = std::collections::HashSet::new();
    let mut result = Vec::new();

    for tool in tools {
        if !tool_names.insert(&tool.name) {
            return Err(AgentError::DuplicateTool(tool.name.clone()).into());
        }

        result.push(json!({
            "type": "function",
            "function": {
                "name": tool.name,
                "description": tool.description,
                "parameters": tool.parameters,
            }
        }));
    }

    Ok(result)
}

/// Convert a non-streamed `/api/chat` response to an assistant Message
///
/// Tool calls are only decoded when tools were offered; otherwise any claimed calls are
/// dropped without being validated.
pub fn ollama_response_to_message(response: &Value, tools_offered: bool) -> Result<Message> {
    let original = response
        .get("message")
        .ok_or_else(|| anyhow!("No message in response: {}", response))?;

    let mut message = Message::assistant();
    if let Some(text) = original.get("content").and_then(|v| v.as_str()) {
        message = message.with_text(text);
    }

    let tool_calls = original
        .get("tool_calls")
        .and_then(|v| v.as_array())
        .filter(|calls| !calls.is_empty());

    if let Some(tool_calls) = tool_calls {
        if !tools_offered {
            tracing::warn!(
                calls = tool_calls.len(),
                "ignoring tool calls in response, no tools were offered"
            );
            return Ok(message);
        }

        for tool_call in tool_calls {
            let function_name = tool_call["function"]["name"]
                .as_str()
                .unwrap_or_default()
                .to_string();

            if !is_valid_function_name(&function_name) {
                return Err(AgentError::InvalidToolName(format!(
                    "The provided function name '{}' had invalid characters, it must match this regex [a-zA-Z0-9_-]+",
                    function_name
                ))
                .into());
            }

            let arguments =
                parse_arguments(&function_name, &tool_call["function"]["arguments"])?;
            message = message.with_tool_call(ToolCall::new(function_name, arguments));
        }
    }

    Ok(message)
}

/// Tool arguments arrive as a json object from ollama, or as an encoded string from
/// openai compatible servers
fn parse_arguments(function_name: &str, raw: &Value) -> Result<Value> {
    let arguments = match raw {
        Value::Null => Value::Object(Map::new()),
        Value::String(encoded) if encoded.trim().is_empty() => Value::Object(Map::new()),
        Value::String(encoded) => serde_json::from_str(encoded).map_err(|e| {
            AgentError::InvalidParameters(format!(
                "Could not interpret tool use parameters for {}: {}",
                function_name, e
            ))
        })?,
        other => other.clone(),
    };

    if !arguments.is_object() {
        return Err(AgentError::InvalidParameters(format!(
            "Tool use parameters for {} must be an object, got {}",
            function_name, arguments
        ))
        .into());
    }
    Ok(arguments)
}

/// Read ollama's token counts from a response body
pub fn get_usage(data: &Value) -> Usage {
    let input_tokens = data
        .get("prompt_eval_count")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32);

    let output_tokens = data
        .get("eval_count")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32);

    let total_tokens = match (input_tokens, output_tokens) {
        (Some(input), Some(output)) => Some(input + output),
        _ => None,
    };

    Usage::new(input_tokens, output_tokens, total_tokens)
}

#[derive(Debug, Deserialize)]
struct StreamMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    message: Option<StreamMessage>,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<String>,
}

fn parse_stream_line(line: &[u8]) -> Result<Option<StreamChunk>> {
    let line = String::from_utf8_lossy(line);
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let chunk: StreamChunk = serde_json::from_str(line)
        .with_context(|| format!("Malformed stream chunk: {}", line))?;
    if let Some(error) = &chunk.error {
        return Err(anyhow!("Stream error: {}", error));
    }
    Ok(Some(chunk))
}

/// Decode an ollama newline-delimited json body into its text deltas
///
/// Lines may be split across network chunks at any byte. Empty deltas are dropped and
/// the stream ends at the first chunk marked `done`, or when the body ends.
pub fn ollama_stream_to_fragments<S, B, E>(bytes: S) -> impl Stream<Item = Result<String>>
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::error::Error + Send + Sync + 'static,
{
    async_stream::try_stream! {
        futures::pin_mut!(bytes);
        let mut buffer: Vec<u8> = Vec::new();
        let mut done = false;

        while !done {
            let chunk = match bytes.next().await {
                Some(chunk) => chunk.context("Error reading stream chunk")?,
                None => break,
            };
            buffer.extend_from_slice(chunk.as_ref());

            while let Some(newline) = buffer.iter().position(|b| *b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=newline).collect();
                if let Some(parsed) = parse_stream_line(&line)? {
                    let text = parsed.message.map(|m| m.content).unwrap_or_default();
                    if !text.is_empty() {
                        yield text;
                    }
                    if parsed.done {
                        done = true;
                        break;
                    }
                }
            }
        }

        if !done {
            if let Some(parsed) = parse_stream_line(&buffer)? {
                let text = parsed.message.map(|m| m.content).unwrap_or_default();
                if !text.is_empty() {
                    yield text;
                }
            }
        }
    }
}

fn is_valid_function_name(name: &str) -> bool {
    VALID_NAME.is_match(name)
}
