//! Result types for extraction output.
//!
//! A [`Deck`] only exists with at least one [`Flashcard`], and a flashcard
//! only exists with a non-empty normalized front and back. Everything that
//! went wrong along the way is described by an [`ExtractionReport`].

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::ExportError;
use crate::normalize::{self, NormalizeOptions};

/// One question/answer pair of plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    front: String,
    back: String,
}

impl Flashcard {
    /// Normalize both fragments and build a card.
    ///
    /// Returns `None` when either side is empty after normalization.
    ///
    /// ```rust
    /// use brainscape_export::{Flashcard, NormalizeOptions};
    ///
    /// let opts = NormalizeOptions::default();
    /// let card = Flashcard::from_fragments("<b>2 + 2</b>", " 4 ", &opts).unwrap();
    /// assert_eq!(card.front(), "2 + 2");
    /// assert!(Flashcard::from_fragments("Q", "   ", &opts).is_none());
    /// ```
    #[must_use]
    pub fn from_fragments(front: &str, back: &str, opts: &NormalizeOptions) -> Option<Self> {
        Self::from_normalized(normalize::normalize(front, opts), normalize::normalize(back, opts))
    }

    /// Like [`from_fragments`](Self::from_fragments) for element text that
    /// must not be parsed as markup again.
    #[must_use]
    pub fn from_text(front: &str, back: &str, opts: &NormalizeOptions) -> Option<Self> {
        Self::from_normalized(
            normalize::normalize_text(front, opts),
            normalize::normalize_text(back, opts),
        )
    }

    fn from_normalized(front: String, back: String) -> Option<Self> {
        if front.is_empty() || back.is_empty() {
            return None;
        }

        Some(Self { front, back })
    }

    #[must_use]
    pub fn front(&self) -> &str {
        &self.front
    }

    #[must_use]
    pub fn back(&self) -> &str {
        &self.back
    }
}

/// A titled, non-empty, ordered collection of flashcards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    title: String,
    flashcards: Vec<Flashcard>,
    url: String,
    source_id: Option<String>,
}

impl Deck {
    /// Build a deck, or `None` if `flashcards` is empty.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        flashcards: Vec<Flashcard>,
        url: impl Into<String>,
        source_id: Option<String>,
    ) -> Option<Self> {
        if flashcards.is_empty() {
            return None;
        }

        Some(Self {
            title: title.into(),
            flashcards,
            url: url.into(),
            source_id,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Cards in extraction order.
    #[must_use]
    pub fn flashcards(&self) -> &[Flashcard] {
        &self.flashcards
    }

    /// Source locator: the page URL, or a caller-supplied label for pasted markup.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Resolved deck identifier. `None` for synthetic identifiers and pasted markup.
    #[must_use]
    pub fn source_id(&self) -> Option<&str> {
        self.source_id.as_deref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.flashcards.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flashcards.is_empty()
    }
}

/// Either a populated deck, or an explicit absence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    Deck(Deck),
    Absent,
}

impl ExtractionOutcome {
    #[must_use]
    pub fn deck(&self) -> Option<&Deck> {
        match self {
            Self::Deck(deck) => Some(deck),
            Self::Absent => None,
        }
    }

    #[must_use]
    pub fn into_deck(self) -> Option<Deck> {
        match self {
            Self::Deck(deck) => Some(deck),
            Self::Absent => None,
        }
    }
}

/// Which strategy supplied the cards of a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardSource {
    Api,
    DeckPage,
    StudyPage,
    PastedMarkup,
}

impl fmt::Display for CardSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Api => "card endpoint",
            Self::DeckPage => "deck page",
            Self::StudyPage => "study page",
            Self::PastedMarkup => "pasted markup",
        };
        f.write_str(name)
    }
}

/// Structured account of one pipeline invocation.
///
/// The core never decides how loudly to report; callers log or display this.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionReport {
    /// Identifier used for the structured endpoint, if any.
    pub identifier: Option<String>,

    /// `true` when no URL rule matched and a synthetic identifier was generated.
    pub synthetic_identifier: bool,

    /// Resolved deck title.
    pub title: Option<String>,

    /// Strategy whose cards made it into the deck.
    pub source: Option<CardSource>,

    /// Why the deck page could not be fetched.
    pub page_failure: Option<String>,

    /// Why the structured endpoint was not used.
    pub api_failure: Option<String>,

    /// Per-row cascade results of the markup strategy, in document order.
    pub rows: Vec<crate::extractor::RowReport>,

    /// Candidate cards dropped because a side normalized to empty.
    pub dropped_empty: usize,

    /// Cards in the final deck.
    pub card_count: usize,

    /// Non-fatal issues encountered along the way.
    pub warnings: Vec<String>,
}

/// Deck extraction result plus its diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub outcome: ExtractionOutcome,
    pub report: ExtractionReport,
}

impl Extraction {
    #[must_use]
    pub fn deck(&self) -> Option<&Deck> {
        self.outcome.deck()
    }
}

/// Terminal outcome of extracting and exporting one deck.
#[derive(Debug)]
pub enum RunOutcome {
    /// Deck extracted and written to `path`.
    Exported {
        deck: Deck,
        path: PathBuf,
        report: ExtractionReport,
    },

    /// Deck extracted but the export failed.
    NotSaved {
        deck: Deck,
        error: ExportError,
        report: ExtractionReport,
    },

    /// No cards could be extracted.
    NoDeck { report: ExtractionReport },
}

impl RunOutcome {
    #[must_use]
    pub fn report(&self) -> &ExtractionReport {
        match self {
            Self::Exported { report, .. }
            | Self::NotSaved { report, .. }
            | Self::NoDeck { report } => report,
        }
    }

    /// Number of cards extracted, whether or not they were saved.
    #[must_use]
    pub fn card_count(&self) -> usize {
        match self {
            Self::Exported { deck, .. } | Self::NotSaved { deck, .. } => deck.len(),
            Self::NoDeck { .. } => 0,
        }
    }
}
