//! Parsing of structured replies from the query/answer service.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Suggestion;

const URL_TAG: &str = "URL:";
const CONFIDENCE_TAG: &str = "CONFIDENCE:";
const REASONING_TAG: &str = "REASONING:";

/// Extract `URL:`, `CONFIDENCE:` and `REASONING:` from a reply.
///
/// The first line carrying each tag wins; everything else is ignored. A
/// missing or empty URL is a parse error. Confidence that does not parse
/// counts as 0 and is clamped to `[0, 1]`.
pub fn parse_reply(reply: &str) -> DomainResult<Suggestion> {
    let mut url: Option<&str> = None;
    let mut confidence: Option<f64> = None;
    let mut reasoning: Option<&str> = None;

    for line in reply.lines().map(str::trim) {
        if let Some(rest) = line.strip_prefix(URL_TAG) {
            url.get_or_insert(rest.trim());
        } else if let Some(rest) = line.strip_prefix(CONFIDENCE_TAG) {
            confidence.get_or_insert_with(|| parse_confidence(rest));
        } else if let Some(rest) = line.strip_prefix(REASONING_TAG) {
            reasoning.get_or_insert(rest.trim());
        }
    }

    let url = url
        .filter(|url| !url.is_empty())
        .ok_or_else(|| DomainError::Parse("reply has no URL: line".to_string()))?;

    Ok(Suggestion {
        url: url.to_string(),
        confidence: confidence.unwrap_or(0.0),
        reasoning: reasoning.unwrap_or_default().to_string(),
    })
}

/// Leading float of `raw`, e.g. `0.85 (fairly sure)` -> 0.85.
fn parse_confidence(raw: &str) -> f64 {
    let raw = raw.trim();
    let numeric_len = raw
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_digit() || c == '.'))
        .map_or(raw.len(), |(i, _)| i);

    raw[..numeric_len]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map_or(0.0, |value| value.clamp(0.0, 1.0))
}
