//! End-to-end pipeline: URL or markup in, deck and exported file out.
//!
//! A `Pipeline` holds no mutable state, so one instance can serve any number
//! of concurrent invocations; each invocation builds its own deck and report.

use std::path::Path;

use tracing::{info, instrument, warn};

use crate::assemble::{DeckAssembler, Markup};
use crate::error::FetchError;
use crate::export::{CsvExporter, Exporter};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::identifier;
use crate::result::{Extraction, ExtractionOutcome, RunOutcome};
use crate::Options;

/// Fetch, extract and export decks.
pub struct Pipeline<F = HttpFetcher, E = CsvExporter> {
    fetcher: F,
    exporter: E,
    options: Options,
}

impl Pipeline {
    /// Pipeline over HTTP writing CSV files.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] if the HTTP client cannot be built.
    pub fn new(options: Options) -> Result<Self, FetchError> {
        let fetcher = HttpFetcher::new(&options)?;
        Ok(Self::with_parts(fetcher, CsvExporter, options))
    }
}

impl<F: Fetcher, E: Exporter> Pipeline<F, E> {
    /// Pipeline over any fetcher and exporter.
    #[must_use]
    pub fn with_parts(fetcher: F, exporter: E, options: Options) -> Self {
        Self {
            fetcher,
            exporter,
            options,
        }
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Extract the deck behind `url`.
    ///
    /// A failed page fetch is not fatal: the card endpoint and the study page
    /// are still tried when the URL carries a deck identifier.
    #[instrument(skip(self))]
    pub async fn scrape(&self, url: &str) -> Extraction {
        let identifier = identifier::resolve(url);
        if identifier.is_synthetic() {
            warn!(%identifier, "no deck identifier in URL");
        }

        let (page, page_failure) = match self.fetcher.fetch(url, self.options.timeout).await {
            Ok(body) => (Some(body), None),
            Err(err) => {
                warn!(%err, "deck page fetch failed");
                (None, Some(err.to_string()))
            }
        };

        let assembler = DeckAssembler::new(&self.fetcher, &self.options);
        let mut extraction = assembler
            .assemble(
                url,
                page.as_deref().map(Markup::deck_page),
                &identifier,
                self.options.prefer_api,
            )
            .await;

        extraction.report.page_failure = page_failure;
        extraction
    }

    /// Extract a deck from markup already in hand. No network access.
    ///
    /// `source` labels the deck's origin (a file name, a URL the markup was
    /// copied from); it is resolved for an identifier like any URL.
    #[must_use]
    pub fn import_html(&self, html: &str, source: &str) -> Extraction {
        crate::extract_deck_from_html_with_options(html, source, &self.options)
    }

    /// Scrape `url` and export the deck into `dir`.
    pub async fn run(&self, url: &str, dir: &Path) -> RunOutcome {
        let extraction = self.scrape(url).await;
        self.export(extraction, dir)
    }

    /// Import `html` and export the deck into `dir`.
    pub fn run_html(&self, html: &str, source: &str, dir: &Path) -> RunOutcome {
        let extraction = self.import_html(html, source);
        self.export(extraction, dir)
    }

    fn export(&self, extraction: Extraction, dir: &Path) -> RunOutcome {
        let Extraction { outcome, report } = extraction;

        let ExtractionOutcome::Deck(deck) = outcome else {
            return RunOutcome::NoDeck { report };
        };

        match self.exporter.export(&deck, dir) {
            Ok(path) => {
                info!(path = %path.display(), cards = deck.len(), "exported");
                RunOutcome::Exported { deck, path, report }
            }
            Err(error) => {
                warn!(%error, cards = deck.len(), "export failed");
                RunOutcome::NotSaved {
                    deck,
                    error,
                    report,
                }
            }
        }
    }
}
