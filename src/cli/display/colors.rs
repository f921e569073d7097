//! Color mapping for confidence values and status marks.
//!
//! Styling goes through `console`, which drops colors automatically when
//! the output is not a terminal or `NO_COLOR` is set.

use console::{style, StyledObject};

/// Returns a styled percentage for a confidence value.
///
/// At or above `floor` = green, within 0.2 below = yellow, else red.
pub fn colorize_confidence(confidence: f64, floor: f64) -> StyledObject<String> {
    let text = format!("{:.0}%", confidence * 100.0);
    if confidence >= floor {
        style(text).green().bold()
    } else if confidence >= floor - 0.2 {
        style(text).yellow()
    } else {
        style(text).red()
    }
}

/// Render a success mark.
pub fn check_mark() -> StyledObject<&'static str> {
    style("\u{2713}").green().bold()
}

/// Render a failure mark.
pub fn cross_mark() -> StyledObject<&'static str> {
    style("\u{2717}").red().bold()
}
