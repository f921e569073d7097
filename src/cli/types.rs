//! CLI type definitions
//!
//! This module contains the clap structure that defines the CLI interface.

use clap::Parser;
use std::path::PathBuf;

use crate::domain::models::Config;
use crate::services::OutputTarget;

#[derive(Parser, Debug)]
#[command(name = "linkfill")]
#[command(
    about = "Linkfill - resolve placeholder markdown links into real URLs",
    long_about = "Scans a markdown document for links whose target is a description \
                  instead of a URL, asks an LLM for a suggestion per link, and lets you \
                  accept, override, or refine each one before the document is rewritten."
)]
#[command(version)]
pub struct Cli {
    /// Markdown document to process
    pub input: PathBuf,

    /// Where to write the rewritten document
    #[arg(required_unless_present = "in_place", conflicts_with = "in_place")]
    pub output: Option<PathBuf>,

    /// Overwrite the input file instead of writing OUTPUT
    #[arg(short, long)]
    pub in_place: bool,

    /// Load configuration from this file instead of .linkfill/
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the LLM model
    #[arg(long, value_name = "NAME")]
    pub model: Option<String>,

    /// Do not probe suggested URLs before presenting them
    #[arg(long)]
    pub no_verify: bool,

    /// Minimum confidence for accepting a suggestion with a plain `y`
    #[arg(long, value_name = "FLOAT", value_parser = parse_confidence_floor)]
    pub confidence_floor: Option<f64>,
}

impl Cli {
    /// Output destination selected on the command line.
    pub fn output_target(&self) -> OutputTarget {
        match &self.output {
            Some(path) if !self.in_place => OutputTarget::File(path.clone()),
            _ => OutputTarget::InPlace,
        }
    }

    /// Layer command-line overrides on top of loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(model) = &self.model {
            config.llm.model.clone_from(model);
        }
        if self.no_verify {
            config.verifier.enabled = false;
        }
        if let Some(floor) = self.confidence_floor {
            config.resolver.confidence_floor = floor;
        }
    }
}

fn parse_confidence_floor(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is outside 0.0..=1.0"))
    }
}
