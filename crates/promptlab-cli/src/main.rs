//! PromptLab
//!
//! Sends the same texts through several hand-written classification prompts
//! and prints the raw model responses side by side, or classifies a single
//! text with a confidence gate.

use anyhow::Result;
use clap::Parser;
use promptlab_core::{ChatCompletionsClient, CompletionClient};
use tracing::{debug, info};

mod cli;
mod commands;
mod config;
mod output;

use cli::{Cli, Commands};
use config::PromptLabConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) => debug!("No .env file loaded: {}", e),
    }

    // Load configuration; a missing API key stops here, before any request
    let config = PromptLabConfig::load(&cli.config, &cli.overrides())?;
    let client = ChatCompletionsClient::new(config.client_config()?)?;
    info!(
        model = client.model(),
        base_url = %config.provider.base_url,
        "Completion client ready"
    );

    let experiment = &config.experiment;
    let rendered = match cli.command() {
        Commands::Compare(args) => commands::run_compare(&client, experiment, &args).await?,
        Commands::Classify(args) => commands::run_classify(&client, experiment, &args).await?,
        Commands::Analyze(args) => commands::run_analyze(&client, experiment, &args).await?,
    };

    print!("{rendered}");
    if !rendered.ends_with('\n') {
        println!();
    }

    Ok(())
}

/// Log levels used when neither `--verbose` nor `RUST_LOG` is given
const DEFAULT_LOG_FILTER: &str = "promptlab=info,promptlab_core=info,promptlab_classifiers=info";

/// Initialize tracing/logging on stderr so stdout carries only results
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("promptlab=debug,promptlab_core=debug,promptlab_classifiers=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
