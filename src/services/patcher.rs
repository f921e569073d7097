//! Position-safe rewriting of settled links.

use tracing::{debug, warn};

use crate::domain::models::LinkCandidate;

/// One pending replacement.
#[derive(Debug, Clone)]
struct Edit {
    start: usize,
    end: usize,
    expected: String,
    replacement: String,
}

/// Applies settled candidates to the document they were extracted from.
pub struct DocumentPatcher;

impl DocumentPatcher {
    /// Rewrite every settled candidate's span as `[label](resolved_url)`.
    ///
    /// Spans refer to `original` and are never modified on the candidates;
    /// offsets are remapped here only. Edits run right to left; after each
    /// splice the length delta is applied to any remaining edit lying to the
    /// right of it. With strictly descending starts that set is empty, so
    /// edits still to be applied always see their original offsets.
    ///
    /// A span whose text no longer matches the candidate's placeholder is
    /// left untouched.
    pub fn apply(original: &str, candidates: &[LinkCandidate]) -> String {
        let mut edits: Vec<Edit> = candidates
            .iter()
            .filter_map(|candidate| {
                let replacement = candidate.resolved_markup()?;
                let span = candidate.span();
                Some(Edit {
                    start: span.start,
                    end: span.end,
                    expected: candidate.original_markup(),
                    replacement,
                })
            })
            .collect();

        if edits.is_empty() {
            return original.to_string();
        }

        edits.sort_by(|a, b| b.start.cmp(&a.start));

        let mut text = original.to_string();
        let mut applied = 0usize;
        for i in 0..edits.len() {
            let edit = edits[i].clone();
            if text.get(edit.start..edit.end) != Some(edit.expected.as_str()) {
                warn!(
                    start = edit.start,
                    end = edit.end,
                    expected = %edit.expected,
                    "span does not hold the expected placeholder; leaving it untouched"
                );
                continue;
            }

            text.replace_range(edit.start..edit.end, &edit.replacement);
            applied += 1;

            let delta = edit.replacement.len() as isize - (edit.end - edit.start) as isize;
            if delta != 0 {
                for remaining in &mut edits[i + 1..] {
                    if remaining.start >= edit.end {
                        remaining.start = remaining.start.saturating_add_signed(delta);
                        remaining.end = remaining.end.saturating_add_signed(delta);
                    }
                }
            }
        }

        debug!(applied, total = edits.len(), "patched document");
        text
    }
}
