//! Deck assembly.
//!
//! Orchestrates one deck: title resolution, the card endpoint, the markup
//! cascade as fallback, normalization of every fragment, and the final
//! decision between a [`Deck`] and absence.
//!
//! Strategies run strictly one after another. Parsed documents are never held
//! across an `.await`: all awaiting happens first, then the markup is parsed
//! and walked synchronously.

use tracing::{debug, info, warn};

use crate::error::Error;
use crate::extractor::{html, ApiExtractor, FragmentKind, RawCard};
use crate::fetch::Fetcher;
use crate::identifier::DeckId;
use crate::normalize::NormalizeOptions;
use crate::result::{CardSource, Deck, Extraction, ExtractionOutcome, ExtractionReport, Flashcard};
use crate::{dom, title, Options};

/// Markup available to the cascade, tagged with where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markup<'a> {
    pub html: &'a str,
    pub origin: CardSource,
}

impl<'a> Markup<'a> {
    #[must_use]
    pub fn deck_page(html: &'a str) -> Self {
        Self {
            html,
            origin: CardSource::DeckPage,
        }
    }

    #[must_use]
    pub fn pasted(html: &'a str) -> Self {
        Self {
            html,
            origin: CardSource::PastedMarkup,
        }
    }
}

/// Builds decks from markup and, when allowed, the card endpoint.
pub struct DeckAssembler<'a, F: Fetcher + ?Sized> {
    fetcher: &'a F,
    options: &'a Options,
}

impl<'a, F: Fetcher + ?Sized> DeckAssembler<'a, F> {
    #[must_use]
    pub fn new(fetcher: &'a F, options: &'a Options) -> Self {
        Self { fetcher, options }
    }

    /// Assemble a deck for `source`.
    ///
    /// With `prefer_api` and an addressable identifier the card endpoint is
    /// tried first. On failure, an empty result, or without `prefer_api`,
    /// the cascade runs over `markup`. With no markup at all, the study page
    /// is fetched if the identifier allows it.
    pub async fn assemble(
        &self,
        source: &str,
        markup: Option<Markup<'_>>,
        identifier: &DeckId,
        prefer_api: bool,
    ) -> Extraction {
        let mut report = ExtractionReport {
            identifier: Some(identifier.to_string()),
            synthetic_identifier: identifier.is_synthetic(),
            ..ExtractionReport::default()
        };

        let api_cards = if prefer_api {
            self.api_cards(identifier, &mut report).await
        } else {
            Vec::new()
        };

        let study_html = if api_cards.is_empty() && markup.is_none() {
            self.study_page(identifier, &mut report).await
        } else {
            None
        };
        let markup = markup.or_else(|| {
            study_html.as_deref().map(|html| Markup {
                html,
                origin: CardSource::StudyPage,
            })
        });

        finish(source, markup, identifier, api_cards, self.options, report)
    }

    async fn api_cards(&self, identifier: &DeckId, report: &mut ExtractionReport) -> Vec<Flashcard> {
        let Some(id) = identifier.addressable() else {
            debug!(%identifier, "synthetic identifier, skipping card endpoint");
            report.api_failure = Some("no deck identifier in URL".to_string());
            return Vec::new();
        };

        let parsed = match ApiExtractor::new(self.fetcher, self.options).extract(id).await {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(%err, "card endpoint failed, falling back to markup");
                report.api_failure = Some(err.to_string());
                return Vec::new();
            }
        };

        if parsed.skipped > 0 {
            report
                .warnings
                .push(format!("{} card records lacked a question or answer", parsed.skipped));
        }

        let cards = normalize_cards(parsed.cards, self.options, report);
        if cards.is_empty() {
            report.api_failure = Some(Error::ExtractionEmpty.to_string());
        }
        cards
    }

    async fn study_page(&self, identifier: &DeckId, report: &mut ExtractionReport) -> Option<String> {
        if !self.options.study_page_fallback {
            return None;
        }
        let id = identifier.addressable()?;
        let url = self.options.study_url(id);
        debug!(%url, "fetching study page");

        match self.fetcher.fetch(&url, self.options.timeout).await {
            Ok(body) => Some(body),
            Err(err) => {
                warn!(%err, "study page fetch failed");
                report.warnings.push(format!("study page: {err}"));
                None
            }
        }
    }
}

/// Synchronous tail of assembly: title, cascade, normalization, outcome.
///
/// Used directly for pasted markup, where nothing needs awaiting.
#[must_use]
pub fn finish(
    source: &str,
    markup: Option<Markup<'_>>,
    identifier: &DeckId,
    api_cards: Vec<Flashcard>,
    options: &Options,
    mut report: ExtractionReport,
) -> Extraction {
    let doc = markup.map(|m| dom::parse(m.html));
    let deck_title = doc
        .as_ref()
        .map_or_else(|| title::DEFAULT_TITLE.to_string(), title::resolve);
    report.title = Some(deck_title.clone());

    let (cards, card_source) = if !api_cards.is_empty() {
        (api_cards, Some(CardSource::Api))
    } else if let (Some(doc), Some(markup)) = (doc.as_ref(), markup) {
        let extracted = html::extract(doc);
        report.rows = extracted.rows;
        let cards = normalize_cards(extracted.cards, options, &mut report);
        (cards, Some(markup.origin))
    } else {
        (Vec::new(), None)
    };

    report.card_count = cards.len();
    let source_id = identifier.addressable().map(str::to_string);

    let outcome = match Deck::new(deck_title, cards, source, source_id) {
        Some(deck) => {
            report.source = card_source;
            info!(cards = deck.len(), source = ?card_source, "deck assembled");
            ExtractionOutcome::Deck(deck)
        }
        None => {
            info!("no cards found");
            ExtractionOutcome::Absent
        }
    };

    Extraction { outcome, report }
}

/// Normalize fragments, dropping cards with an empty side.
fn normalize_cards(raw: Vec<RawCard>, options: &Options, report: &mut ExtractionReport) -> Vec<Flashcard> {
    let opts = NormalizeOptions {
        strip_boilerplate: options.strip_boilerplate,
    };
    let total = raw.len();

    let cards: Vec<Flashcard> = raw
        .iter()
        .filter_map(|card| match card.kind {
            FragmentKind::Markup => Flashcard::from_fragments(&card.question, &card.answer, &opts),
            FragmentKind::Text => Flashcard::from_text(&card.question, &card.answer, &opts),
        })
        .collect();

    report.dropped_empty += total - cards.len();
    cards
}
