//! Structured card endpoint extraction.
//!
//! The endpoint returns a JSON array of card records. A record contributes a
//! card only when it carries both a `question` and an `answer` key; records
//! missing either are skipped. Transport and decode failures are returned to
//! the assembler, which treats them as a signal to fall back to markup.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::RawCard;
use crate::error::{Error, ParseError, Result};
use crate::fetch::Fetcher;
use crate::Options;

/// Cards decoded from one endpoint response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiCards {
    pub cards: Vec<RawCard>,
    /// Records dropped for lacking a question or an answer key.
    pub skipped: usize,
}

/// Fetches and decodes a deck's cards from the structured endpoint.
pub struct ApiExtractor<'a, F: Fetcher + ?Sized> {
    fetcher: &'a F,
    options: &'a Options,
}

impl<'a, F: Fetcher + ?Sized> ApiExtractor<'a, F> {
    #[must_use]
    pub fn new(fetcher: &'a F, options: &'a Options) -> Self {
        Self { fetcher, options }
    }

    /// Fetch the cards for `id`.
    ///
    /// # Errors
    ///
    /// [`Error::Fetch`] when the request fails, [`Error::Parse`] when the body
    /// is not a JSON array of objects, [`Error::ExtractionEmpty`] when no
    /// record carried both keys.
    pub async fn extract(&self, id: &str) -> Result<ApiCards> {
        let url = self.options.api_url(id);
        debug!(%url, "requesting card endpoint");

        let body = self.fetcher.fetch(&url, self.options.timeout).await?;
        let parsed = parse_cards(&body)?;

        if parsed.skipped > 0 {
            warn!(skipped = parsed.skipped, "card records without question or answer");
        }
        if parsed.cards.is_empty() {
            return Err(Error::ExtractionEmpty);
        }

        debug!(cards = parsed.cards.len(), "card endpoint returned cards");
        Ok(parsed)
    }
}

/// Decode an endpoint body into raw cards, preserving record order.
///
/// # Errors
///
/// Returns [`ParseError`] if the body is not JSON or not an array. Records
/// that are not objects are skipped like records missing a key.
///
/// ```rust
/// use brainscape_export::extractor::api::parse_cards;
///
/// let parsed = parse_cards(r#"[{"question":"Q1","answer":"A1"},{"question":"Q2"}]"#).unwrap();
/// assert_eq!(parsed.cards.len(), 1);
/// assert_eq!(parsed.skipped, 1);
/// ```
pub fn parse_cards(body: &str) -> std::result::Result<ApiCards, ParseError> {
    let value: Value = serde_json::from_str(body).map_err(|e| ParseError(e.to_string()))?;

    let Value::Array(records) = value else {
        return Err(ParseError("expected an array of card records".to_string()));
    };

    let mut parsed = ApiCards::default();

    for (index, record) in records.iter().enumerate() {
        let Value::Object(fields) = record else {
            debug!(index, "skipping card record that is not an object");
            parsed.skipped += 1;
            continue;
        };

        match (field(fields, "question"), field(fields, "answer")) {
            (Some(question), Some(answer)) => parsed.cards.push(RawCard::new(question, answer)),
            _ => {
                debug!(index, "skipping card record without question or answer");
                parsed.skipped += 1;
            }
        }
    }

    Ok(parsed)
}

/// Field value as a fragment. `null` counts as present but empty.
fn field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).map(|value| match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
