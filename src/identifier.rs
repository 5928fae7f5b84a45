//! Deck identifier resolution.
//!
//! Rules are tried in order and the first match wins; more specific path
//! shapes come before generic ones. URLs matching nothing get a synthetic,
//! call-unique identifier that must never be sent to the card endpoint.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// `/decks/<digits>` or `/packs/<digits>` directly under the site root.
#[allow(clippy::expect_used)]
static DECK_OR_PACK_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/(?:decks|packs)/(\d+)").expect("valid regex"));

/// `/learn/<digits>`.
#[allow(clippy::expect_used)]
static LEARN_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/learn/(\d+)").expect("valid regex"));

/// `/flashcards/<slug>`.
#[allow(clippy::expect_used)]
static FLASHCARDS_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/flashcards/([^/]+)").expect("valid regex"));

/// Query keys carrying a numeric deck id. `deck_id` is the study page shape.
const ID_QUERY_KEYS: &[&str] = &["id", "deck_id"];

static SYNTHETIC_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A deck identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeckId {
    /// Taken from the URL; addressable on the card endpoint.
    Resolved(String),

    /// Generated because no rule matched; not addressable.
    Synthetic(String),
}

impl DeckId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Resolved(id) | Self::Synthetic(id) => id,
        }
    }

    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        matches!(self, Self::Synthetic(_))
    }

    /// The identifier if it may be used to address deck data.
    #[must_use]
    pub fn addressable(&self) -> Option<&str> {
        match self {
            Self::Resolved(id) => Some(id),
            Self::Synthetic(_) => None,
        }
    }
}

impl fmt::Display for DeckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive a deck identifier from a URL.
///
/// ```rust
/// use brainscape_export::identifier::{resolve, DeckId};
///
/// assert_eq!(
///     resolve("https://www.brainscape.com/packs/123456"),
///     DeckId::Resolved("123456".to_string())
/// );
/// assert!(resolve("https://example.com/about").is_synthetic());
/// ```
#[must_use]
pub fn resolve(url: &str) -> DeckId {
    match Url::parse(url.trim()) {
        Ok(parsed) => match_rules(&parsed).map_or_else(synthetic, DeckId::Resolved),
        Err(_) => synthetic(),
    }
}

fn match_rules(url: &Url) -> Option<String> {
    let path = url.path();

    for rule in [&DECK_OR_PACK_PATH, &LEARN_PATH, &FLASHCARDS_PATH] {
        if let Some(caps) = rule.captures(path) {
            return caps.get(1).map(|m| m.as_str().to_string());
        }
    }

    url.query_pairs()
        .find(|(key, value)| {
            ID_QUERY_KEYS.contains(&key.as_ref())
                && !value.is_empty()
                && value.chars().all(|c| c.is_ascii_digit())
        })
        .map(|(_, value)| value.into_owned())
}

/// Timestamp-derived identifier, unique per call within the process.
fn synthetic() -> DeckId {
    let nanos = chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_default();
    let seq = SYNTHETIC_COUNTER.fetch_add(1, Ordering::Relaxed);

    DeckId::Synthetic(format!("unknown-{nanos}-{seq}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(id: &str) -> DeckId {
        DeckId::Resolved(id.to_string())
    }

    #[test]
    fn test_decks_and_packs() {
        assert_eq!(resolve("https://www.brainscape.com/decks/42"), resolved("42"));
        assert_eq!(resolve("https://www.brainscape.com/packs/987654/"), resolved("987654"));
    }

    #[test]
    fn test_learn() {
        assert_eq!(resolve("https://www.brainscape.com/learn/5551212"), resolved("5551212"));
    }

    #[test]
    fn test_flashcards_slug() {
        assert_eq!(
            resolve("https://www.brainscape.com/flashcards/spanish-verbs-1234567/packs/7654321"),
            resolved("spanish-verbs-1234567")
        );
    }

    #[test]
    fn test_specific_path_precedes_query() {
        assert_eq!(resolve("https://www.brainscape.com/decks/11?id=22"), resolved("11"));
    }

    #[test]
    fn test_query_id() {
        assert_eq!(resolve("https://www.brainscape.com/view?id=314"), resolved("314"));
        assert_eq!(resolve("https://www.brainscape.com/study?deck_id=271"), resolved("271"));
        assert!(resolve("https://www.brainscape.com/view?id=abc").is_synthetic());
    }

    #[test]
    fn test_nested_decks_path_is_not_rule_one() {
        // Rule 1 only applies directly under the root.
        assert!(resolve("https://www.brainscape.com/users/decks/12").is_synthetic());
    }

    #[test]
    fn test_unmatched_url_is_synthetic_and_unique() {
        let first = resolve("https://www.brainscape.com/");
        let second = resolve("https://www.brainscape.com/");

        assert!(first.is_synthetic());
        assert!(!first.as_str().is_empty());
        assert_ne!(first, second);
        assert_eq!(first.addressable(), None);
    }

    #[test]
    fn test_unparseable_url_is_synthetic() {
        assert!(resolve("not a url").is_synthetic());
        assert!(resolve("").is_synthetic());
    }
}
