//! Text formatters for candidates, suggestions, and the run summary.

use console::style;

use super::colors::{check_mark, colorize_confidence, cross_mark};
use crate::domain::models::{LinkCandidate, Suggestion};

/// Sentence context with the candidate's markup highlighted.
///
/// When the markup is not fully inside the sentence (a terminator inside
/// the placeholder cut it short), the `[label]` part is highlighted instead.
pub fn highlight_in_context(candidate: &LinkCandidate) -> String {
    let context = candidate.sentence_context().trim();
    let markup = candidate.original_markup();
    let label = format!("[{}]", candidate.label());

    let target = if context.contains(&markup) {
        markup
    } else if context.contains(&label) {
        label
    } else {
        return context.to_string();
    };

    context.replacen(
        &target,
        &style(&target).cyan().bold().underlined().to_string(),
        1,
    )
}

/// Candidates that still need a decision.
pub fn pending_count(candidates: &[LinkCandidate]) -> usize {
    candidates.iter().filter(|c| !c.is_terminal()).count()
}

/// Opening lines for a document.
///
/// Links whose description is already a URL are listed by extraction
/// number, followed by how many are left to resolve.
pub fn document_overview(candidates: &[LinkCandidate]) -> Vec<String> {
    let mut lines: Vec<String> = candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_settled())
        .map(|(i, c)| {
            format!(
                "{} Link {}: {} already a URL",
                style("\u{2022}").dim(),
                i + 1,
                c.original_markup()
            )
        })
        .collect();
    lines.push(format!(
        "Found {} to resolve.",
        style(count_label(pending_count(candidates), "link", "links")).bold()
    ));
    lines
}

/// Notice shown when a plain accept is refused below the floor.
pub fn low_confidence_notice(confidence: f64, floor: f64) -> String {
    format!(
        "Confidence {:.0}% is below {:.0}%. Add context to ask again, or type a URL to use it.",
        confidence * 100.0,
        floor * 100.0
    )
}

/// One numbered line per suggestion, followed by its reasoning.
pub fn suggestion_lines(suggestions: &[Suggestion], floor: f64) -> Vec<String> {
    let mut lines = Vec::with_capacity(suggestions.len() * 2);
    for (i, suggestion) in suggestions.iter().enumerate() {
        lines.push(format!(
            "  {}. {} ({})",
            i + 1,
            style(&suggestion.url).bold(),
            colorize_confidence(suggestion.confidence, floor)
        ));
        if !suggestion.reasoning.is_empty() {
            lines.push(format!("     {}", style(&suggestion.reasoning).dim()));
        }
    }
    lines
}

/// Final per-candidate summary lines.
pub fn summary_lines(candidates: &[LinkCandidate]) -> Vec<String> {
    candidates
        .iter()
        .map(|candidate| match candidate.resolved_url() {
            Some(url) => format!("{} [{}] -> {url}", check_mark(), candidate.label()),
            None => format!(
                "{} [{}] ({})",
                cross_mark(),
                candidate.label(),
                candidate.state().label()
            ),
        })
        .collect()
}

/// Format a count with a label: "1 link", "3 links".
pub fn count_label(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}
