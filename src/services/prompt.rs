//! Prompt text sent to the query/answer service.

use crate::domain::models::RejectedUrls;

/// Marker that opens the rejected-URL clause of the seed prompt.
pub const REJECTED_CLAUSE_MARKER: &str = "IMPORTANT: Never suggest these previously rejected URLs:";

/// Seed prompt for a candidate.
///
/// The rejected-URL clause is derived from `rejected`, so rebuilding the
/// seed after a rejection yields exactly one up-to-date clause.
pub fn seed_prompt(sentence_context: &str, description: &str, rejected: &RejectedUrls) -> String {
    let mut prompt = format!(
        r#"Given this context: "{sentence_context}"

Find the most appropriate URL for the description: "{description}"

Answer in exactly this format:
URL: [the URL you found]
CONFIDENCE: [a number between 0.0 and 1.0]
REASONING: [a short explanation of the choice and how sure you are]

Be conservative with confidence. Use 0.8 or higher only when you are very sure this is the exact resource meant.

If the user says a URL is wrong or broken, answer with a completely different URL. Never repeat a rejected URL."#
    );
    if let Some(clause) = rejected_clause(rejected) {
        prompt.push_str("\n\n");
        prompt.push_str(&clause);
    }
    prompt
}

/// `None` while nothing has been rejected.
pub fn rejected_clause(rejected: &RejectedUrls) -> Option<String> {
    (!rejected.is_empty()).then(|| format!("{REJECTED_CLAUSE_MARKER} {}", rejected.joined()))
}

/// Follow-up when the service re-offers a rejected URL.
pub fn already_rejected(url: &str) -> String {
    format!("You already suggested {url} and it was rejected. Please provide a different URL.")
}

/// Follow-up when a suggestion failed the reachability probe.
pub fn unreachable(url: &str, status: u16, rejected: &RejectedUrls) -> String {
    let reason = if status == 0 {
        "could not be reached".to_string()
    } else {
        format!("is not accessible (HTTP {status})")
    };
    format!(
        "The URL {url} {reason}. Please provide a working URL that is NOT any of these rejected URLs: {}",
        rejected.joined()
    )
}

/// Follow-up carrying user-supplied context.
pub fn with_context(context: &str, rejected: &RejectedUrls) -> String {
    format!(
        "{context} (Note: do NOT suggest any of these rejected URLs: {})",
        rejected.joined()
    )
}
