// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contact extraction heuristics for free-text replies.
//!
//! Both extractors are deliberately permissive: any digit run fitting the
//! Russian phone shape passes, and any two whitespace-separated tokens pass
//! as a name. They are heuristics, not validators — false positives are
//! accepted and left to the operator to sort out.

use std::sync::LazyLock;

use regex::Regex;

/// Russian-format phone number: optional `+7`/`7`/`8` country code, then
/// optionally parenthesized or hyphenated digit groups totaling 10 digits.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+?7|8)?[\s\-]?\(?[0-9]{3}\)?[\s\-]?[0-9]{3}[\s\-]?[0-9]{2}[\s\-]?[0-9]{2}")
        .expect("phone pattern is valid")
});

/// Scan `text` for the first phone-shaped match and normalize it by
/// stripping spaces, hyphens, and parentheses. No further validation.
pub fn extract_phone(text: &str) -> Option<String> {
    let m = PHONE_RE.find(text)?;
    let normalized: String = m
        .as_str()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    Some(normalized)
}

/// `text` with the first phone-shaped match removed.
///
/// Name extraction runs on the stripped text so a message that is only a
/// phone number does not double as a name.
pub fn strip_phone(text: &str) -> String {
    match PHONE_RE.find(text) {
        Some(m) => format!("{}{}", &text[..m.start()], &text[m.end()..]),
        None => text.to_string(),
    }
}

/// Take the first two whitespace-separated tokens as a name, or a single
/// token if it is longer than two characters.
pub fn extract_name(text: &str) -> Option<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    match words.as_slice() {
        [] => None,
        [single] => {
            if single.chars().count() > 2 {
                Some((*single).to_string())
            } else {
                None
            }
        }
        [first, second, ..] => Some(format!("{first} {second}")),
    }
}
