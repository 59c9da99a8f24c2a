//! Removal of inline reasoning blocks from model output.

use std::sync::OnceLock;

use regex::Regex;

pub const REASONING_OPEN: &str = "<reasoning>";
pub const REASONING_CLOSE: &str = "</reasoning>";

fn reasoning_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Fixed literal; `pattern_matches_marker_constants` compiles it.
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)<reasoning>.*?</reasoning>").expect("reasoning pattern is a valid regex")
    })
}

/// Strips every `<reasoning>...</reasoning>` block and trims the rest.
///
/// If nothing but whitespace survives, the original text is returned as-is so
/// the caller never surfaces an empty answer for non-empty input.
pub fn strip_reasoning(text: &str) -> String {
    let stripped = reasoning_pattern().replace_all(text, "");
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        text.to_string()
    } else {
        trimmed.to_string()
    }
}
