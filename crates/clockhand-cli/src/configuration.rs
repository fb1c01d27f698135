use crate::error::ConfigError;
use clockhand::providers::{configs::OllamaProviderConfig, ollama};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_SYSTEM_PROMPT: &str = "Use tools when asked for the time.";
pub const DEFAULT_QUESTION: &str = "What time is it?";

#[derive(Debug, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_ollama_host")]
    pub host: String,
    #[serde(default = "default_ollama_model")]
    pub model: String,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<i32>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            host: default_ollama_host(),
            model: default_ollama_model(),
            temperature: None,
            max_tokens: None,
        }
    }
}

impl ProviderSettings {
    // Convert to the clockhand OllamaProviderConfig
    pub fn into_config(self) -> OllamaProviderConfig {
        OllamaProviderConfig {
            host: self.host,
            model: self.model,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PromptSettings {
    #[serde(default = "default_system_prompt")]
    pub system: String,
    #[serde(default = "default_question")]
    pub question: String,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            system: default_system_prompt(),
            question: default_question(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub prompt: PromptSettings,
}

impl Settings {
    /// Load settings from defaults, an optional toml file, then `CLOCKHAND_*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("provider.host", default_ollama_host())?
            .set_default("provider.model", default_ollama_model())?
            .set_default("prompt.system", default_system_prompt())?
            .set_default("prompt.question", default_question())?;

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.display().to_string()));
            }
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(
                Environment::with_prefix("CLOCKHAND")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Self = config.try_deserialize()?;
        tracing::debug!(?settings, "configuration loaded");
        Ok(settings)
    }
}

fn default_ollama_host() -> String {
    ollama::OLLAMA_HOST.to_string()
}

fn default_ollama_model() -> String {
    ollama::OLLAMA_MODEL.to_string()
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

fn default_question() -> String {
    DEFAULT_QUESTION.to_string()
}
