mod configuration;
mod error;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use clockhand::agent::Agent;
use clockhand::providers::ollama::OllamaProvider;
use clockhand::tools::ClockTool;
use configuration::Settings;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Question to ask the model
    question: Option<String>,

    /// Model to use (can also be set via CLOCKHAND_PROVIDER__MODEL)
    #[arg(short, long)]
    model: Option<String>,

    /// Ollama host (can also be set via CLOCKHAND_PROVIDER__HOST)
    #[arg(long)]
    host: Option<String>,

    /// System prompt (can also be set via CLOCKHAND_PROMPT__SYSTEM)
    #[arg(short, long)]
    system: Option<String>,

    /// TOML file with provider and prompt settings
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // stdout is reserved for the answer
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()).await {
        eprintln!("{} {:#}", style("error:").red().bold(), err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut settings =
        Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(host) = cli.host {
        settings.provider.host = host;
    }
    if let Some(model) = cli.model {
        settings.provider.model = model;
    }
    if let Some(system) = cli.system {
        settings.prompt.system = system;
    }
    let question = cli.question.unwrap_or(settings.prompt.question);

    let provider = OllamaProvider::new(settings.provider.into_config())?;
    tracing::info!(model = provider.model(), "using ollama");

    let mut agent = Agent::new(Box::new(provider));
    agent.add_tool(Box::new(ClockTool::new()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    agent
        .run_turn(&settings.prompt.system, &question, &mut out)
        .await?;
    Ok(())
}
