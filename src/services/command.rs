//! Decision prompt command grammar.

use crate::domain::errors::DomainError;
use crate::domain::models::is_url;

/// A parsed line from the decision prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Blank line.
    Empty,
    /// `y` or `yN`; the index is 1-based.
    Accept(Option<usize>),
    /// `v` or `vN`; the index is 1-based.
    View(Option<usize>),
    /// A literal `http://`, `https://` or `ftp://` URL.
    Url(String),
    /// Something URL-shaped that fails the scheme check.
    InvalidUrl(DomainError),
    /// Free text to feed back as extra context.
    Context(String),
}

impl UserCommand {
    pub fn parse(raw: &str) -> Self {
        let input = raw.trim();
        if input.is_empty() {
            return Self::Empty;
        }
        if let Some(index) = parse_indexed(input, 'y') {
            return Self::Accept(index);
        }
        if let Some(index) = parse_indexed(input, 'v') {
            return Self::View(index);
        }
        if is_url(input) {
            return Self::Url(input.to_string());
        }
        if looks_like_url(input) {
            return Self::InvalidUrl(DomainError::InvalidUserUrl(input.to_string()));
        }
        Self::Context(input.to_string())
    }
}

/// `c`, `C`, `c2`, `C12` -> `Some(None)`, `Some(Some(2))`, ...
///
/// An index too large for `usize` saturates, so it still reads as a
/// selection that is out of range.
#[allow(clippy::option_option)]
fn parse_indexed(input: &str, command: char) -> Option<Option<usize>> {
    let mut chars = input.chars();
    let first = chars.next()?;
    if !first.eq_ignore_ascii_case(&command) {
        return None;
    }
    let rest = chars.as_str();
    if rest.is_empty() {
        return Some(None);
    }
    if !rest.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(Some(rest.parse::<usize>().unwrap_or(usize::MAX)))
}

/// Single token that reads like an address but has no accepted scheme.
fn looks_like_url(input: &str) -> bool {
    !input.contains(char::is_whitespace)
        && (input.contains("://") || input.to_ascii_lowercase().starts_with("www."))
}
