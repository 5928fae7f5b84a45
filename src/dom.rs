//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate covering what the extractors need:
//! find-by-tag-and-class, find-all, next-sibling lookup, attribute reads,
//! text extraction and node removal on detached copies.

// Re-export core types for external use
pub use dom_query::{Document, Selection};

pub use tendril::StrTendril;

// === Parsing ===

/// Parse markup into a document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Attributes ===

/// Get any attribute value.
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Check whether the first element of the selection carries `class`.
#[inline]
#[must_use]
pub fn has_class(sel: &Selection, class: &str) -> bool {
    sel.has_class(class)
}

/// Get tag name (lowercase).
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_string())
}

// === Text Content ===

/// All text content of the node and its descendants, tags dropped.
///
/// Returns `StrTendril` for zero-copy passing.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Text content of the `<body>` of a parsed document.
#[must_use]
pub fn body_text(doc: &Document) -> StrTendril {
    doc.select("body").text()
}

// === Querying ===

/// First descendant matching a CSS selector, in document order.
#[must_use]
pub fn find<'a>(sel: &Selection<'a>, selector: &str) -> Option<Selection<'a>> {
    let found = sel.select_single(selector);
    found.exists().then_some(found)
}

/// All descendants matching a CSS selector, in document order.
#[must_use]
pub fn find_all<'a>(sel: &Selection<'a>, selector: &str) -> Vec<Selection<'a>> {
    sel.select(selector)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .collect()
}

// === Tree Navigation ===

/// Parent element, if any.
#[must_use]
pub fn parent<'a>(sel: &Selection<'a>) -> Option<Selection<'a>> {
    let parent = sel.parent();
    parent.exists().then_some(parent)
}

/// First following element sibling with the given tag and class.
///
/// Text nodes and non-matching elements in between are skipped.
#[must_use]
pub fn next_sibling_matching<'a>(sel: &Selection<'a>, tag: &str, class: &str) -> Option<Selection<'a>> {
    let node = sel.nodes().first()?;
    let mut sibling = node.next_sibling();

    while let Some(s) = sibling {
        if s.is_element() {
            let candidate = Selection::from(s);
            if tag_name(&candidate).as_deref() == Some(tag) && has_class(&candidate, class) {
                return Some(candidate);
            }
        }
        sibling = s.next_sibling();
    }

    None
}

// === Detached copies ===

/// Copy an element and its descendants into a fresh document.
///
/// Mutating the copy leaves the source tree untouched, so extraction never
/// edits the document it walks.
#[must_use]
pub fn clone_element(sel: &Selection) -> Document {
    Document::from(sel.html())
}

/// Text of `sel` with every descendant matching `selector` removed first.
#[must_use]
pub fn text_without(sel: &Selection, selector: &str) -> String {
    let copy = clone_element(sel);
    copy.select(selector).remove();
    body_text(&copy).to_string()
}
