//! Placeholder link discovery.

use regex::Regex;
use tracing::debug;

use crate::domain::models::{LinkCandidate, Span};
use crate::services::sentence::extract_sentence;

/// `[label](description)`; brackets may not nest inside the label and
/// parentheses may not nest inside the description.
const LINK_PATTERN: &str = r"\[([^\[\]]+)\]\(([^()]+)\)";

/// Finds bracket-paren links and turns them into candidates.
pub struct LinkExtractor {
    pattern: Regex,
}

impl Default for LinkExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkExtractor {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(LINK_PATTERN).expect("link pattern is a valid regex"),
        }
    }

    /// All links in document order, each with its sentence context.
    ///
    /// Descriptions that are already URLs come back settled.
    pub fn extract(&self, text: &str) -> Vec<LinkCandidate> {
        let candidates: Vec<LinkCandidate> = self
            .pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let label = caps.get(1)?.as_str();
                let description = caps.get(2)?.as_str();
                let sentence = extract_sentence(text, whole.start());
                Some(LinkCandidate::new(
                    label,
                    description,
                    sentence,
                    Span::new(whole.start(), whole.end()),
                ))
            })
            .collect();

        debug!(
            total = candidates.len(),
            settled = candidates.iter().filter(|c| c.is_settled()).count(),
            "extracted link candidates"
        );
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ResolutionState;
    use proptest::prelude::*;

    #[test]
    fn test_scenario_document() {
        let text = "See [X](my query) and [Y](https://a.com/b).";
        let links = LinkExtractor::new().extract(text);

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].label(), "X");
        assert_eq!(links[0].description(), "my query");
        assert_eq!(links[0].span(), Span::new(4, 17));
        assert_eq!(&text[4..17], "[X](my query)");
        assert_eq!(links[0].state(), &ResolutionState::Unresolved { round: 0 });
        // The forward scan stops at the first '.', here inside the URL.
        assert_eq!(
            links[0].sentence_context(),
            "See [X](my query) and [Y](https://a."
        );

        assert!(links[1].is_settled());
        assert_eq!(links[1].resolved_url(), Some("https://a.com/b"));
        assert!((links[1].confidence() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_all_url_schemes_short_circuit() {
        let text = "[a](http://a.io) [b](https://b.io) [c](ftp://c.io) [d](www.d.io)";
        let links = LinkExtractor::new().extract(text);
        let settled: Vec<bool> = links.iter().map(LinkCandidate::is_settled).collect();
        assert_eq!(settled, vec![true, true, true, false]);
    }

    #[test]
    fn test_nested_and_malformed_constructs() {
        let extractor = LinkExtractor::new();

        // Nested brackets: only the inner well-formed link matches.
        let links = extractor.extract("[outer [inner](thing)]");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].label(), "inner");

        // Nested parentheses in the description do not match.
        assert!(extractor.extract("[a](b (c) d)").is_empty());

        // Missing pieces do not match.
        assert!(extractor.extract("[a]() [](b) [a] (b) [a](b").is_empty());
    }

    #[test]
    fn test_no_links() {
        assert!(LinkExtractor::new().extract("plain text, nothing here").is_empty());
    }

    #[test]
    fn test_context_uses_enclosing_sentence() {
        let text = "Intro sentence. Install [the CLI](cli install guide) first! Done.";
        let links = LinkExtractor::new().extract(text);
        assert_eq!(
            links[0].sentence_context(),
            "Install [the CLI](cli install guide) first!"
        );
    }

    proptest! {
        #[test]
        fn prop_extraction_is_idempotent_and_ordered(
            parts in prop::collection::vec(
                prop_oneof![
                    "[a-z ]{0,12}",
                    "\\[[a-z]{1,6}\\]\\([a-z ]{1,10}\\)",
                    "[\\[\\]()a-z.]{0,6}",
                ],
                0..12,
            )
        ) {
            let text = parts.concat();
            let extractor = LinkExtractor::new();
            let first: Vec<Span> = extractor.extract(&text).iter().map(LinkCandidate::span).collect();
            let second: Vec<Span> = extractor.extract(&text).iter().map(LinkCandidate::span).collect();
            prop_assert_eq!(&first, &second);

            for pair in first.windows(2) {
                prop_assert!(pair[0].end <= pair[1].start);
                prop_assert!(!pair[0].overlaps(&pair[1]));
            }
            for span in &first {
                prop_assert!(span.start < span.end);
                prop_assert!(text[span.start..span.end].starts_with('['));
                prop_assert!(text[span.start..span.end].ends_with(')'));
            }
        }
    }
}
