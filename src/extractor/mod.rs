//! Card extraction strategies.
//!
//! Both strategies produce raw question/answer fragments; normalization into
//! [`Flashcard`](crate::Flashcard)s happens in the assembler.
//!
//! # Module Structure
//!
//! - `api`: structured per-deck card endpoint
//! - `html`: ordered cascade of layout heuristics over parsed markup

pub mod api;
pub mod html;

pub use api::ApiExtractor;
pub use html::{CascadeMethod, HtmlExtraction, RowReport};

/// How a fragment must be read during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    /// May contain tags and entities; parsed before cleanup.
    Markup,
    /// Already element text with entities decoded; never parsed again.
    Text,
}

/// A question/answer pair before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCard {
    pub question: String,
    pub answer: String,
    pub kind: FragmentKind,
}

impl RawCard {
    /// Fragments that may carry markup, as the card endpoint returns them.
    #[must_use]
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            kind: FragmentKind::Markup,
        }
    }

    /// Fragments read as element text from parsed markup.
    #[must_use]
    pub fn text(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            kind: FragmentKind::Text,
        }
    }
}
