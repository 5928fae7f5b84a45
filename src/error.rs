//! Error types for brainscape-export.
//!
//! Request, decode, extraction and export failures each get their own type so
//! callers can tell "no deck" apart from "deck produced, not saved".

use std::path::PathBuf;

/// A single network request failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Connection, DNS, TLS or body-read failure.
    #[error("network error: {0}")]
    Network(String),

    /// The request exceeded its timeout.
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-2xx status.
    #[error("HTTP status {0}")]
    HttpStatus(u16),
}

/// A structured card response could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed card response: {0}")]
pub struct ParseError(pub String);

/// Writing a deck to disk failed.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The target directory could not be created.
    #[error("could not create directory {}: {source}", path.display())]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output file could not be written or moved into place.
    #[error("could not write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error type for extraction and export operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A strategy ran successfully but produced zero cards.
    #[error("no cards found")]
    ExtractionEmpty,

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
