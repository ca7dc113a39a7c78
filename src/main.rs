//! Renoplan - conversational home renovation planner
//!
//! CLI entry point: interactive chat plus offline estimate commands.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use renoplan::cli::{Cli, Command};
use renoplan::config::Config;
use renoplan::estimate::{estimate_cost, timeline_reply};

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("renoplan")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Setup tracing subscriber - write to log file, not stdout/stderr
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("renoplan.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!(
        "Renoplan loaded config: provider={}, advisory={}, rendering={}",
        config.llm.provider, config.llm.advisory_model, config.llm.rendering_model
    );

    match cli.command {
        Some(Command::Chat { initial }) => cmd_chat(&config, initial).await,
        Some(Command::Estimate { room, scope, area }) => cmd_estimate(&room, &scope, area),
        Some(Command::Timeline { scope }) => cmd_timeline(&scope),
        Some(Command::Compose {
            description,
            aspect_ratio,
        }) => cmd_compose(&description, &aspect_ratio),
        None => {
            // Default to the interactive session
            cmd_chat(&config, None).await
        }
    }
}

/// Run the interactive planning session
async fn cmd_chat(config: &Config, initial: Option<String>) -> Result<()> {
    renoplan::repl::run_interactive(config, initial).await
}

/// Print a cost estimate (no model access required)
fn cmd_estimate(room: &str, scope: &str, area: i64) -> Result<()> {
    let estimate = estimate_cost(room, scope, area)?;
    println!("{}", estimate);
    println!("{}", timeline_reply(scope));
    Ok(())
}

/// Print a timeline estimate (no model access required)
fn cmd_timeline(scope: &str) -> Result<()> {
    println!("{}", timeline_reply(scope));
    Ok(())
}

/// Print the composed create-rendering prompt (debug helper)
fn cmd_compose(description: &str, aspect_ratio: &str) -> Result<()> {
    let composer = renoplan::prompts::PromptComposer::new();
    println!("{}", composer.compose_create(description, aspect_ratio));
    Ok(())
}
