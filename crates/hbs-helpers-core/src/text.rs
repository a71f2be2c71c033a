//! Word-boundary machinery shared by the case-changing helpers.
//!
//! `camelcase`, `dashcase`, `snakecase` and friends all follow the same
//! recipe: strip non-word characters off the ends, lowercase, then rewrite
//! each run of separators through a per-helper transform of the character
//! that follows it.

use std::sync::OnceLock;

use regex::Regex;

fn edge_separators() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-_.\W\s]+|[-_.\W\s]+$").unwrap())
}

fn inner_separators() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[-_.\W\s]+(\w|$)").unwrap())
}

/// Trims whitespace and non-word characters from both ends of a string.
pub fn chop(input: &str) -> String {
    edge_separators().replace_all(input.trim(), "").into_owned()
}

/// Lowercases a string and replaces each separator run with
/// `transform(following_char)`. Single-character input is just lowercased.
pub fn change_case<F>(input: &str, transform: F) -> String
where
    F: Fn(&str) -> String,
{
    if input.chars().count() == 1 {
        return input.to_lowercase();
    }
    let lowered = chop(input).to_lowercase();
    inner_separators()
        .replace_all(&lowered, |caps: &regex::Captures<'_>| transform(&caps[1]))
        .into_owned()
}
