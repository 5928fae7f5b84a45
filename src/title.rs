//! Deck title resolution.

use dom_query::Document;

use crate::dom;
use crate::normalize::collapse_whitespace;

/// Title used when no candidate yields text.
pub const DEFAULT_TITLE: &str = "Brainscape Deck";

/// Ordered candidates: deck-title heading, first `<h1>`, `<title>`, `og:title`.
///
/// ```rust
/// use brainscape_export::{dom, title};
///
/// let doc = dom::parse("<html><head><title>Biology 101</title></head><body></body></html>");
/// assert_eq!(title::resolve(&doc), "Biology 101");
///
/// let empty = dom::parse("<p>nothing</p>");
/// assert_eq!(title::resolve(&empty), title::DEFAULT_TITLE);
/// ```
#[must_use]
pub fn resolve(doc: &Document) -> String {
    const CANDIDATES: [fn(&Document) -> Option<String>; 4] =
        [deck_title_heading, first_heading, title_element, og_title];

    CANDIDATES
        .iter()
        .find_map(|candidate| candidate(doc))
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}

fn deck_title_heading(doc: &Document) -> Option<String> {
    text_of(doc, "h1.deck-title")
}

fn first_heading(doc: &Document) -> Option<String> {
    text_of(doc, "h1")
}

fn title_element(doc: &Document) -> Option<String> {
    text_of(doc, "title")
}

fn text_of(doc: &Document, selector: &str) -> Option<String> {
    let root = doc.select("html");
    let elem = dom::find(&root, selector)?;
    non_empty(&dom::text_content(&elem))
}

fn og_title(doc: &Document) -> Option<String> {
    let root = doc.select("html");
    let meta = dom::find(&root, "meta[property='og:title']")?;
    non_empty(&dom::get_attribute(&meta, "content")?)
}

fn non_empty(text: &str) -> Option<String> {
    let text = collapse_whitespace(text);
    (!text.is_empty()).then_some(text)
}
