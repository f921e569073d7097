//! End-to-end processing of one document.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::models::LinkCandidate;
use crate::domain::ports::Interaction;
use crate::services::link_extractor::LinkExtractor;
use crate::services::patcher::DocumentPatcher;
use crate::services::resolver::ConversationalResolver;

/// Where the rewritten document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Overwrite the input file.
    InPlace,
    /// Write to a separate file.
    File(PathBuf),
}

/// Outcome of a run.
#[derive(Debug)]
pub struct RunSummary {
    /// Every candidate in document order, in its terminal state.
    pub candidates: Vec<LinkCandidate>,
    /// File written, or `None` when no links were found.
    pub written_to: Option<PathBuf>,
}

impl RunSummary {
    pub fn settled(&self) -> usize {
        self.candidates.iter().filter(|c| c.is_settled()).count()
    }

    pub fn is_noop(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Extraction, resolution and patching for a whole document.
pub struct DocumentProcessor {
    extractor: LinkExtractor,
    resolver: ConversationalResolver,
}

impl DocumentProcessor {
    pub fn new(resolver: ConversationalResolver) -> Self {
        Self {
            extractor: LinkExtractor::new(),
            resolver,
        }
    }

    /// Resolve all links in `text` and return the rewritten text with the
    /// final candidates.
    pub async fn process_text(
        &self,
        text: &str,
        ui: &mut dyn Interaction,
    ) -> (String, Vec<LinkCandidate>) {
        let mut candidates = self.extractor.extract(text);
        if candidates.is_empty() {
            return (text.to_string(), candidates);
        }

        ui.begin_document(&candidates).await;
        for candidate in &mut candidates {
            self.resolver.resolve(candidate, ui).await;
        }

        let patched = DocumentPatcher::apply(text, &candidates);
        (patched, candidates)
    }

    /// Read `input`, resolve its links, and write the result exactly once.
    ///
    /// A document without links is left alone and nothing is written.
    #[instrument(skip(self, ui), fields(input = %input.display()))]
    pub async fn process_file(
        &self,
        input: &Path,
        target: &OutputTarget,
        ui: &mut dyn Interaction,
    ) -> Result<RunSummary> {
        let text = tokio::fs::read_to_string(input)
            .await
            .with_context(|| format!("Failed to read input file {}", input.display()))?;

        let (patched, candidates) = self.process_text(&text, ui).await;
        if candidates.is_empty() {
            info!("no links found");
            return Ok(RunSummary {
                candidates,
                written_to: None,
            });
        }

        let destination = match target {
            OutputTarget::InPlace => input.to_path_buf(),
            OutputTarget::File(path) => path.clone(),
        };
        tokio::fs::write(&destination, patched)
            .await
            .with_context(|| format!("Failed to write output file {}", destination.display()))?;

        let summary = RunSummary {
            candidates,
            written_to: Some(destination),
        };
        info!(
            total = summary.candidates.len(),
            settled = summary.settled(),
            "document written"
        );
        Ok(summary)
    }
}
