//! Configuration options for deck extraction.
//!
//! The `Options` struct controls network bounds, strategy preference and text
//! cleanup. Use `Default::default()` for page-fetched decks and
//! [`Options::for_html_import`] for pasted markup.

use std::time::Duration;

/// Default structured endpoint, `{id}` is replaced by the deck identifier.
pub const DEFAULT_API_URL_TEMPLATE: &str = "https://www.brainscape.com/api/decks/{id}/cards";

/// Default study page, used when no deck page markup is available.
pub const DEFAULT_STUDY_URL_TEMPLATE: &str = "https://www.brainscape.com/study?deck_id={id}";

/// Configuration options for deck extraction.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use brainscape_export::Options;
///
/// let options = Options {
///     timeout: Duration::from_secs(10),
///     prefer_api: false,
///     ..Options::default()
/// };
/// assert!(!options.strip_boilerplate);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Upper bound for each individual request.
    ///
    /// Default: 30 seconds
    pub timeout: Duration,

    /// Try the structured card endpoint before the markup cascade.
    ///
    /// Never applied to synthetic identifiers.
    ///
    /// Default: `true`
    pub prefer_api: bool,

    /// Remove rating prompts and lettered-option prefixes from card text.
    ///
    /// Default: `false`
    pub strip_boilerplate: bool,

    /// Structured endpoint template containing `{id}`.
    pub api_url_template: String,

    /// Study page template containing `{id}`.
    pub study_url_template: String,

    /// Fetch the study page when neither the API nor the deck page gave cards.
    ///
    /// Default: `true`
    pub study_page_fallback: bool,

    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            prefer_api: true,
            strip_boilerplate: false,
            api_url_template: DEFAULT_API_URL_TEMPLATE.to_string(),
            study_url_template: DEFAULT_STUDY_URL_TEMPLATE.to_string(),
            study_page_fallback: true,
            user_agent: format!("brainscape-export/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Options {
    /// Preset for markup pasted or loaded from a file: no network, boilerplate stripped.
    #[must_use]
    pub fn for_html_import() -> Self {
        Self {
            prefer_api: false,
            strip_boilerplate: true,
            study_page_fallback: false,
            ..Self::default()
        }
    }

    /// Structured endpoint URL for `id`.
    #[must_use]
    pub fn api_url(&self, id: &str) -> String {
        self.api_url_template.replace("{id}", id)
    }

    /// Study page URL for `id`.
    #[must_use]
    pub fn study_url(&self, id: &str) -> String {
        self.study_url_template.replace("{id}", id)
    }
}
