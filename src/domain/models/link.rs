//! Link candidate domain model.

use serde::{Deserialize, Serialize};

use super::transcript::Transcript;

/// URL schemes accepted as an already-resolved link.
const URL_SCHEMES: [&str; 3] = ["http://", "https://", "ftp://"];

/// Pure prefix test used for descriptions and user input alike.
pub fn is_url(value: &str) -> bool {
    URL_SCHEMES.iter().any(|scheme| value.starts_with(scheme))
}

/// Half-open byte range `[start, end)` into the original document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start < end, "span must be non-empty: {start}..{end}");
        Self { start, end }
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Resolution state of a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResolutionState {
    /// Still in the refinement loop; `round` counts suggestion requests.
    Unresolved { round: u32 },
    /// Final URL accepted.
    Settled { url: String, confidence: f64 },
    /// User declined to resolve; the placeholder is left untouched.
    Skipped,
}

impl ResolutionState {
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Unresolved { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Unresolved { .. } => "unresolved",
            Self::Settled { .. } => "settled",
            Self::Skipped => "skipped",
        }
    }
}

/// Ordered set of URLs ruled out for a candidate.
///
/// Only grows: there is no way to remove an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RejectedUrls {
    urls: Vec<String>,
}

impl RejectedUrls {
    /// Adds `url`; returns false if it was already present.
    pub fn insert(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.contains(&url) {
            return false;
        }
        self.urls.push(url);
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.iter().any(|rejected| rejected == url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }

    /// Comma-separated list, in rejection order.
    pub fn joined(&self) -> String {
        self.urls.join(", ")
    }
}

/// A URL proposal parsed from a service reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub url: String,
    pub confidence: f64,
    pub reasoning: String,
}

/// One placeholder link discovered in a document.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkCandidate {
    label: String,
    description: String,
    sentence_context: String,
    span: Span,
    state: ResolutionState,
    transcript: Transcript,
    rejected_urls: RejectedUrls,
}

impl LinkCandidate {
    /// Create a candidate. Descriptions that already are URLs settle
    /// immediately with full confidence.
    pub fn new(
        label: impl Into<String>,
        description: impl Into<String>,
        sentence_context: impl Into<String>,
        span: Span,
    ) -> Self {
        let description = description.into();
        let state = if is_url(&description) {
            ResolutionState::Settled {
                url: description.clone(),
                confidence: 1.0,
            }
        } else {
            ResolutionState::Unresolved { round: 0 }
        };

        Self {
            label: label.into(),
            description,
            sentence_context: sentence_context.into(),
            span,
            state,
            transcript: Transcript::new(),
            rejected_urls: RejectedUrls::default(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn sentence_context(&self) -> &str {
        &self.sentence_context
    }

    pub const fn span(&self) -> Span {
        self.span
    }

    pub const fn state(&self) -> &ResolutionState {
        &self.state
    }

    pub const fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Mutable access is safe: `Transcript` only supports appends.
    pub fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    pub const fn rejected_urls(&self) -> &RejectedUrls {
        &self.rejected_urls
    }

    /// Present iff the candidate is settled.
    pub fn resolved_url(&self) -> Option<&str> {
        match &self.state {
            ResolutionState::Settled { url, .. } => Some(url),
            _ => None,
        }
    }

    pub const fn confidence(&self) -> f64 {
        match self.state {
            ResolutionState::Settled { confidence, .. } => confidence,
            _ => 0.0,
        }
    }

    pub const fn is_settled(&self) -> bool {
        matches!(self.state, ResolutionState::Settled { .. })
    }

    pub const fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Number of suggestion rounds started so far.
    pub const fn round(&self) -> u32 {
        match self.state {
            ResolutionState::Unresolved { round } => round,
            _ => 0,
        }
    }

    /// Placeholder markup as written in the original document.
    pub fn original_markup(&self) -> String {
        format!("[{}]({})", self.label, self.description)
    }

    /// Markup the patcher writes for a settled candidate.
    pub fn resolved_markup(&self) -> Option<String> {
        self.resolved_url()
            .map(|url| format!("[{}]({url})", self.label))
    }

    /// Start a new suggestion round. No-op once terminal.
    pub fn begin_round(&mut self) -> u32 {
        if let ResolutionState::Unresolved { round } = &mut self.state {
            *round += 1;
            return *round;
        }
        0
    }

    /// Rule out `url`; returns false when it was already rejected.
    pub fn reject(&mut self, url: &str) -> bool {
        self.rejected_urls.insert(url)
    }

    /// Accept `url`. Empty URLs and terminal candidates are left alone.
    pub fn settle(&mut self, url: impl Into<String>, confidence: f64) -> bool {
        let url = url.into();
        if self.is_terminal() || url.is_empty() {
            return false;
        }
        self.state = ResolutionState::Settled {
            url,
            confidence: confidence.clamp(0.0, 1.0),
        };
        true
    }

    /// Give up on this candidate. No-op once terminal.
    pub fn skip(&mut self) {
        if !self.is_terminal() {
            self.state = ResolutionState::Skipped;
        }
    }
}
