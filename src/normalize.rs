//! Text normalization.
//!
//! Turns a markup or text fragment into a single line of clean plain text:
//! tags dropped, whitespace runs collapsed to one space, ends trimmed.
//! Pasted study-view markup additionally carries rating widgets and lettered
//! multiple-choice prefixes, which can be stripped on request.

use std::sync::LazyLock;

use regex::Regex;

use crate::dom;

/// Any run of whitespace, newlines included.
#[allow(clippy::expect_used)]
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Confidence prompt rendered under every card in study view.
#[allow(clippy::expect_used)]
static RATING_PROMPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"How well did you know this\?").expect("valid regex"));

/// The 1-5 confidence scale labels.
#[allow(clippy::expect_used)]
static RATING_SCALE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Not at all.*?Perfectly").expect("valid regex"));

/// A run of `A. ` through `G. ` prefixes at the start of the text or after
/// whitespace. Adjacent prefixes share their separating whitespace.
#[allow(clippy::expect_used)]
static LETTERED_OPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|\s)(?:[A-G]\.\s+)+").expect("valid regex"));

/// Options for [`normalize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Remove the rating prompt, the rating scale and lettered-option prefixes.
    pub strip_boilerplate: bool,
}

/// Convert a fragment into clean plain text.
///
/// ```rust
/// use brainscape_export::normalize::{normalize, NormalizeOptions};
///
/// let opts = NormalizeOptions::default();
/// assert_eq!(normalize("  <b>Hi</b>\n\n there ", &opts), "Hi there");
/// assert_eq!(normalize("", &opts), "");
/// ```
#[must_use]
pub fn normalize(fragment: &str, opts: &NormalizeOptions) -> String {
    if fragment.is_empty() {
        return String::new();
    }

    if looks_like_markup(fragment) {
        normalize_text(&dom::body_text(&dom::parse(fragment)), opts)
    } else {
        normalize_text(fragment, opts)
    }
}

/// Clean text that was already extracted from markup.
///
/// Unlike [`normalize`], angle brackets are kept as literal characters.
///
/// ```rust
/// use brainscape_export::normalize::{normalize_text, NormalizeOptions};
///
/// let opts = NormalizeOptions::default();
/// assert_eq!(normalize_text(" Vec<String>\n ", &opts), "Vec<String>");
/// ```
#[must_use]
pub fn normalize_text(text: &str, opts: &NormalizeOptions) -> String {
    let text = collapse_whitespace(text);

    if opts.strip_boilerplate {
        strip_boilerplate(&text)
    } else {
        text
    }
}

/// Collapse whitespace runs to one space and trim both ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

fn looks_like_markup(fragment: &str) -> bool {
    fragment.contains('<') && fragment.contains('>')
}

fn strip_boilerplate(text: &str) -> String {
    let text = RATING_PROMPT.replace_all(text, "");
    let text = RATING_SCALE.replace_all(&text, "");
    let text = LETTERED_OPTION.replace_all(&text, "$1");

    // Removals can leave doubled spaces behind.
    collapse_whitespace(&text)
}
