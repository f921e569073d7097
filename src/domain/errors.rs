//! Domain errors for link resolution.

use thiserror::Error;

/// Errors surfaced while resolving a single link candidate.
///
/// None of these is fatal to a run: the resolver either offers a retry
/// (`ServiceCall`, `Parse`) or re-prompts the user (`InvalidUserUrl`,
/// `Browser`). Reading or writing the document is handled at the
/// application edge with `anyhow`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Service call failed: {0}")]
    ServiceCall(String),

    #[error("Could not parse service reply: {0}")]
    Parse(String),

    #[error("Not a usable URL (expected http://, https:// or ftp://): {0}")]
    InvalidUserUrl(String),

    #[error("Failed to open browser: {0}")]
    Browser(String),
}

impl DomainError {
    /// Whether the user should be offered a retry for this error.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ServiceCall(_) | Self::Parse(_))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
