//! # brainscape-export
//!
//! Converts Brainscape flashcard decks into portable `Front,Back` CSV files.
//!
//! Deck pages have no documented layout, so cards are read from the structured
//! card endpoint when possible and otherwise from the page markup through an
//! ordered cascade of layout heuristics. Every fragment is normalized to plain
//! text before it becomes a [`Flashcard`].
//!
//! ## Quick Start
//!
//! ```rust
//! use brainscape_export::extract_deck_from_html;
//!
//! let html = r#"<html><head><title>Capitals</title></head><body>
//!   <div class="flashcard-row">
//!     <div class="card-face question">France</div>
//!     <div class="card-face answer">Paris</div>
//!   </div>
//! </body></html>"#;
//!
//! let extraction = extract_deck_from_html(html, "capitals.html");
//! let deck = extraction.deck().expect("one card");
//! assert_eq!(deck.title(), "Capitals");
//! assert_eq!(deck.flashcards()[0].back(), "Paris");
//! ```
//!
//! Fetching a live deck and writing it to disk:
//!
//! ```rust,no_run
//! use std::path::Path;
//! use brainscape_export::{Options, Pipeline, RunOutcome};
//!
//! # async fn demo() -> Result<(), brainscape_export::FetchError> {
//! let pipeline = Pipeline::new(Options::default())?;
//! match pipeline.run("https://www.brainscape.com/packs/123456", Path::new("out")).await {
//!     RunOutcome::Exported { deck, path, .. } => println!("{} cards -> {}", deck.len(), path.display()),
//!     RunOutcome::NotSaved { deck, error, .. } => eprintln!("{} cards, not saved: {error}", deck.len()),
//!     RunOutcome::NoDeck { .. } => eprintln!("no cards found"),
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod options;
mod result;

/// DOM helpers over `dom_query`.
pub mod dom;

/// Markup/text fragment normalization.
pub mod normalize;

/// Deck identifier resolution from URLs.
pub mod identifier;

/// Deck title resolution from parsed markup.
pub mod title;

/// Card extraction strategies (card endpoint, markup cascade).
pub mod extractor;

/// Network access behind the `Fetcher` capability.
pub mod fetch;

/// Deck assembly and strategy fallback.
pub mod assemble;

/// CSV export.
pub mod export;

/// End-to-end pipeline.
pub mod pipeline;

// Public API - re-exports
pub use error::{Error, ExportError, FetchError, ParseError, Result};
pub use export::{CsvExporter, Exporter};
pub use fetch::{Fetcher, HttpFetcher};
pub use identifier::DeckId;
pub use normalize::NormalizeOptions;
pub use options::Options;
pub use pipeline::Pipeline;
pub use result::{
    CardSource, Deck, Extraction, ExtractionOutcome, ExtractionReport, Flashcard, RunOutcome,
};

/// Extracts a deck from pasted or saved markup using the import preset.
///
/// Boilerplate stripping is on and no network access happens. `source`
/// labels the deck's origin.
#[must_use]
pub fn extract_deck_from_html(html: &str, source: &str) -> Extraction {
    extract_deck_from_html_with_options(html, source, &Options::for_html_import())
}

/// Extracts a deck from markup with custom options. No network access.
#[must_use]
pub fn extract_deck_from_html_with_options(html: &str, source: &str, options: &Options) -> Extraction {
    let identifier = identifier::resolve(source);
    let report = ExtractionReport {
        identifier: Some(identifier.to_string()),
        synthetic_identifier: identifier.is_synthetic(),
        ..ExtractionReport::default()
    };

    assemble::finish(
        source,
        Some(assemble::Markup::pasted(html)),
        &identifier,
        Vec::new(),
        options,
        report,
    )
}

/// Scrapes the deck behind `url` over HTTP with default options.
///
/// # Errors
///
/// Only fails if the HTTP client cannot be built; extraction failures are
/// reported through [`Extraction::outcome`].
pub async fn scrape(url: &str) -> std::result::Result<Extraction, FetchError> {
    let pipeline = Pipeline::new(Options::default())?;
    Ok(pipeline.scrape(url).await)
}
