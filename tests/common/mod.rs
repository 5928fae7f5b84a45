//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use brainscape_export::{FetchError, Fetcher};

/// In-memory fetcher: canned responses per URL, 404 for anything else.
#[derive(Default)]
pub struct StubFetcher {
    responses: HashMap<String, Result<String, FetchError>>,
    requests: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, body: &str) -> Self {
        self.responses.insert(url.to_string(), Ok(body.to_string()));
        self
    }

    pub fn failing(mut self, url: &str, err: FetchError) -> Self {
        self.responses.insert(url.to_string(), Err(err));
        self
    }

    /// URLs requested so far, in order.
    pub fn requested(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, url: &str, _timeout: Duration) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .unwrap_or(Err(FetchError::HttpStatus(404)))
    }
}

pub const DECK_URL: &str = "https://www.brainscape.com/packs/1234";
pub const API_URL: &str = "https://www.brainscape.com/api/decks/1234/cards";
pub const STUDY_URL: &str = "https://www.brainscape.com/study?deck_id=1234";

/// Deck page with two card-face rows.
pub const DECK_PAGE: &str = r#"
<html>
  <head>
    <title>Spanish Verbs | Brainscape</title>
    <meta property="og:title" content="Spanish Verbs">
  </head>
  <body>
    <h1 class="deck-title">Spanish Verbs</h1>
    <div class="flashcard-row">
      <div class="card-face question">to be</div>
      <div class="card-face answer">ser</div>
    </div>
    <div class="flashcard-row">
      <div class="card-face question">to have</div>
      <div class="card-face answer">tener</div>
    </div>
  </body>
</html>
"#;

pub const API_BODY: &str = r#"[
  {"question": "<p>to go</p>", "answer": "<p>ir</p>"},
  {"question": "to eat", "answer": "comer"},
  {"question": "orphan"}
]"#;
