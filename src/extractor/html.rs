//! Markup Cascade Extraction
//!
//! Card pages have no documented layout and several markup variants live side
//! by side. Every `div.flashcard-row` is run through a fixed-priority list of
//! methods; the first one yielding both a question and an answer wins for that
//! row. Rows no method understands are skipped and reported, never fatal.
//!
//! The order of [`CASCADE`] is significant: each later method covers a variant
//! the earlier ones miss, and reordering changes which one wins on rows that
//! match more than one.

use std::fmt;

use dom_query::{Document, Selection};
use serde::Serialize;
use tracing::{debug, trace};

use super::RawCard;
use crate::dom;

/// Container marking one card on a deck page.
pub const ROW_SELECTOR: &str = "div.flashcard-row";

/// One cascade method: a row in, both fragments out, or nothing.
pub type Method = fn(&Selection) -> Option<RawCard>;

/// Identifies a cascade method in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CascadeMethod {
    /// `question-contents` / `answer-contents` holding `main-fields-container`s.
    FullCard,
    /// Two or more `scf-face` containers.
    FaceMarkers,
    /// Two or more `preview-html` containers.
    PreviewHtml,
    /// `card-face question` / `card-face answer` pair.
    CardFaces,
    /// Card faces on an `is-blurrable` row, links removed from the answer.
    BlurredAnswer,
    /// `Q` / `A` indicator labels followed by content containers.
    TypeIndicators,
}

impl fmt::Display for CascadeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FullCard => "full-card",
            Self::FaceMarkers => "face-markers",
            Self::PreviewHtml => "preview-html",
            Self::CardFaces => "card-faces",
            Self::BlurredAnswer => "blurred-answer",
            Self::TypeIndicators => "type-indicators",
        };
        f.write_str(name)
    }
}

/// The cascade, in priority order.
pub const CASCADE: [(CascadeMethod, Method); 6] = [
    (CascadeMethod::FullCard, full_card),
    (CascadeMethod::FaceMarkers, face_markers),
    (CascadeMethod::PreviewHtml, preview_html),
    (CascadeMethod::CardFaces, card_faces),
    (CascadeMethod::BlurredAnswer, blurred_answer),
    (CascadeMethod::TypeIndicators, type_indicators),
];

/// Outcome for one row, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowReport {
    /// Zero-based position among flashcard rows.
    pub index: usize,
    /// The winning method, or `None` when the row was skipped.
    pub method: Option<CascadeMethod>,
}

/// Fragments found in a document plus per-row diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlExtraction {
    pub cards: Vec<RawCard>,
    pub rows: Vec<RowReport>,
}

impl HtmlExtraction {
    /// Rows no method could read.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.rows.iter().filter(|r| r.method.is_none()).count()
    }
}

/// Run the standard cascade over every flashcard row of `doc`.
#[must_use]
pub fn extract(doc: &Document) -> HtmlExtraction {
    extract_with(doc, &CASCADE)
}

/// Run a custom cascade over every flashcard row of `doc`.
#[must_use]
pub fn extract_with(doc: &Document, cascade: &[(CascadeMethod, Method)]) -> HtmlExtraction {
    let rows = dom::find_all(&doc.select("html"), ROW_SELECTOR);
    debug!(rows = rows.len(), "found flashcard rows");

    let mut result = HtmlExtraction::default();

    for (index, row) in rows.iter().enumerate() {
        let matched = extract_row(row, cascade);
        let method = matched.as_ref().map(|(method, _)| *method);

        match matched {
            Some((method, card)) => {
                trace!(index, %method, "row matched");
                result.cards.push(card);
            }
            None => debug!(index, "no cascade method matched row"),
        }

        result.rows.push(RowReport { index, method });
    }

    result
}

/// First method in `cascade` that reads `row`.
#[must_use]
pub fn extract_row(row: &Selection, cascade: &[(CascadeMethod, Method)]) -> Option<(CascadeMethod, RawCard)> {
    cascade
        .iter()
        .find_map(|(method, run)| run(row).map(|card| (*method, card)))
}

// === Cascade methods ===

/// Full-card layout: nested `main-fields-container` inside the
/// `question-contents` and `answer-contents` blocks.
#[must_use]
pub fn full_card(row: &Selection) -> Option<RawCard> {
    if !dom::has_class(row, "full-card") {
        return None;
    }

    let question = dom::find(row, "div.question-contents")?;
    let answer = dom::find(row, "div.answer-contents")?;

    let q_fields = dom::find(&question, "div.main-fields-container")?;
    let a_fields = dom::find(&answer, "div.main-fields-container")?;

    Some(RawCard::text(text(&q_fields), text(&a_fields)))
}

/// Full-card row with at least two `scf-face` containers.
#[must_use]
pub fn face_markers(row: &Selection) -> Option<RawCard> {
    first_two_on_full_card(row, "div.scf-face")
}

/// Full-card row with at least two `preview-html` containers.
#[must_use]
pub fn preview_html(row: &Selection) -> Option<RawCard> {
    first_two_on_full_card(row, "div.preview-html")
}

/// Paired card faces, preferring their nested content containers.
///
/// Blurrable rows are left to [`blurred_answer`].
#[must_use]
pub fn card_faces(row: &Selection) -> Option<RawCard> {
    if dom::has_class(row, "is-blurrable") {
        return None;
    }

    let (question, answer) = faces(row)?;

    let contents = dom::find(&question, "div.question-content")
        .zip(dom::find(&answer, "div.answer-content"));

    match contents {
        Some((q_content, a_content)) => Some(RawCard::text(text(&q_content), text(&a_content))),
        None => Some(RawCard::text(text(&question), text(&answer))),
    }
}

/// Blurrable row: the answer has promotional links that must not leak into
/// the card text.
#[must_use]
pub fn blurred_answer(row: &Selection) -> Option<RawCard> {
    if !dom::has_class(row, "is-blurrable") {
        return None;
    }

    let (question, answer) = faces(row)?;
    let container = dom::find(&answer, "div.answer-content").unwrap_or(answer);

    Some(RawCard::text(text(&question), dom::text_without(&container, "a")))
}

/// Single-letter `Q` / `A` labels; content is the next `main-fields-container`
/// sibling of each label's parent.
#[must_use]
pub fn type_indicators(row: &Selection) -> Option<RawCard> {
    let indicators = dom::find_all(row, "div.flashcard-type-indicator");
    let labelled = |letter: &str| {
        indicators
            .iter()
            .find(|ind| dom::text_content(ind).trim() == letter)
            .cloned()
    };

    let question = content_after_label(&labelled("Q")?)?;
    let answer = content_after_label(&labelled("A")?)?;

    Some(RawCard::text(text(&question), text(&answer)))
}

// === Helpers ===

fn text(sel: &Selection) -> String {
    dom::text_content(sel).to_string()
}

fn faces<'a>(row: &Selection<'a>) -> Option<(Selection<'a>, Selection<'a>)> {
    let question = dom::find(row, "div.card-face.question")?;
    let answer = dom::find(row, "div.card-face.answer")?;
    Some((question, answer))
}

fn first_two_on_full_card(row: &Selection, selector: &str) -> Option<RawCard> {
    if !dom::has_class(row, "full-card") {
        return None;
    }

    match dom::find_all(row, selector).as_slice() {
        [question, answer, ..] => Some(RawCard::text(text(question), text(answer))),
        _ => None,
    }
}

fn content_after_label<'a>(indicator: &Selection<'a>) -> Option<Selection<'a>> {
    let header = dom::parent(indicator)?;
    dom::next_sibling_matching(&header, "div", "main-fields-container")
}
