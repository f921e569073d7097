//! Linkfill CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{debug, warn};

use linkfill::cli::{handle_error, print_summary, Cli, TerminalInteraction};
use linkfill::domain::models::Config;
use linkfill::domain::ports::{QueryService, UrlVerifier};
use linkfill::infrastructure::config::ConfigLoader;
use linkfill::infrastructure::llm::{OpenAiClient, OpenAiClientConfig};
use linkfill::infrastructure::logging::LoggerImpl;
use linkfill::infrastructure::verifier::HttpUrlVerifier;
use linkfill::services::{ConversationalResolver, DocumentProcessor};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        handle_error(&err);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    cli.apply_overrides(&mut config);
    ConfigLoader::validate(&config).context("Invalid configuration after command-line overrides")?;

    let _logger = LoggerImpl::init(&config.logging)?;
    debug!(input = %cli.input.display(), model = %config.llm.model, "starting");

    let processor = build_processor(&config)?;
    let mut ui = TerminalInteraction::new(config.resolver.confidence_floor);
    let summary = processor
        .process_file(&cli.input, &cli.output_target(), &mut ui)
        .await?;

    print_summary(&summary);
    Ok(())
}

fn build_processor(config: &Config) -> Result<DocumentProcessor> {
    let client_config = OpenAiClientConfig::from_config(config).context(
        "No API key configured. Set OPENAI_API_KEY, LINKFILL_LLM__API_KEY, or llm.api_key in .linkfill/config.yaml",
    )?;
    let query: Arc<dyn QueryService> =
        Arc::new(OpenAiClient::new(client_config).context("Failed to create LLM client")?);

    let mut resolver = ConversationalResolver::new(query, config.resolver.clone());
    if config.verifier.enabled {
        let verifier: Arc<dyn UrlVerifier> = Arc::new(
            HttpUrlVerifier::new(&config.verifier).context("Failed to create URL verifier")?,
        );
        resolver = resolver.with_verifier(verifier);
    } else {
        warn!("URL verification disabled");
    }

    Ok(DocumentProcessor::new(resolver))
}
