//! Email address detection in free text.

use lazy_regex::lazy_regex;

/// Conventional email shape: local part, `@`, dot-separated domain labels.
///
/// Word characters are ASCII-only, like the pattern the chat backend uses
/// to extract the address it files the ticket under.
static RE_EMAIL: lazy_regex::Lazy<regex::Regex> =
    lazy_regex!(r"[A-Za-z0-9_.\-]+@[A-Za-z0-9_.\-]+\.[A-Za-z0-9_]+");

/// Returns the first email address found in `text`.
#[must_use]
pub fn find_email(text: &str) -> Option<&str> {
    RE_EMAIL.find(text).map(|m| m.as_str())
}
