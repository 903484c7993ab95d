//! Rich-text (page body) helpers.

use std::sync::OnceLock;

use regex::Regex;

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid regex"))
}

/// Whether an HTML fragment contains any visible text once tags are stripped.
///
/// Used to reject page bodies that are technically non-empty but render as
/// nothing (e.g. `<p></p>`).
pub fn has_visible_text(html: &str) -> bool {
    !tag_regex().replace_all(html, "").trim().is_empty()
}
