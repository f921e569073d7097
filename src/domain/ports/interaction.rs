//! Interaction port - the prompt surface the resolver talks to.

use async_trait::async_trait;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{LinkCandidate, Suggestion};

/// Progress and outcome notifications emitted by the resolver.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolverEvent {
    /// A suggestion request is about to be sent.
    RequestingSuggestion { round: u32 },
    /// The query service failed or replied without a usable URL.
    ServiceFailed(DomainError),
    /// The service re-offered a URL that was already rejected.
    PreviouslyRejected { url: String },
    /// A reachability probe is starting.
    Verifying { url: String },
    /// The probe succeeded.
    Reachable { url: String },
    /// The probe failed; status 0 means a transport failure.
    Unreachable { url: String, status: u16 },
    /// Too many automatic re-queries in a row.
    AutoRoundLimit { rounds: u32 },
    /// Plain accept refused below the confidence floor.
    ConfidenceTooLow { confidence: f64, floor: f64 },
    /// `yN`/`vN` pointed past the presented list.
    InvalidSelection { index: usize, available: usize },
    /// The user typed something URL-like that is not a usable URL.
    InvalidUrl(DomainError),
    /// `v` opened the URL in a browser.
    BrowserOpened { url: String },
    /// `v` failed to launch a browser.
    BrowserFailed(DomainError),
    /// Free-text context was recorded for the next round.
    ContextAdded { context: String },
    /// The candidate settled.
    Settled { url: String, user_supplied: bool },
    /// The candidate was skipped.
    Skipped,
}

/// User-facing surface used while resolving a candidate.
///
/// Implementations render output however they like; the resolver only
/// depends on the raw strings returned by `read_command` and the answers
/// from `confirm`.
#[async_trait]
pub trait Interaction: Send {
    /// Extraction finished; called once per document with links found.
    async fn begin_document(&mut self, candidates: &[LinkCandidate]);

    /// A new candidate enters the resolution loop.
    async fn begin_candidate(&mut self, candidate: &LinkCandidate);

    /// Report progress or an outcome.
    async fn report(&mut self, event: ResolverEvent);

    /// Show the suggestions the next command refers to (1-based).
    async fn present(&mut self, candidate: &LinkCandidate, suggestions: &[Suggestion]);

    /// Read one line of raw input for the decision prompt; `None` once the
    /// input is closed.
    async fn read_command(&mut self) -> Option<String>;

    /// Ask a yes/no question. A closed input answers no.
    async fn confirm(&mut self, question: &str) -> bool;

    /// Open `url` in the user's browser.
    async fn open_in_browser(&mut self, url: &str) -> DomainResult<()>;
}
