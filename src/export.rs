//! Deck serialization.
//!
//! [`CsvExporter`] writes `<dir>/<sanitized title>.csv` with a `Front,Back`
//! header and one minimally quoted row per card. The file is written to a
//! temporary sibling and renamed into place, so an interrupted export never
//! leaves a truncated file behind under the final name.

use std::io::Write;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::ExportError;
use crate::result::Deck;

/// Characters not allowed in exported file names.
const FORBIDDEN: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Longest base name kept as is, in characters.
const MAX_NAME_CHARS: usize = 100;

/// Length a too-long base name is cut to before the marker.
const TRUNCATED_CHARS: usize = 97;

const ELLIPSIS: &str = "...";

/// Writes a deck somewhere under a target directory.
pub trait Exporter: Send + Sync {
    /// Write `deck` into `dir`, returning the path written.
    ///
    /// # Errors
    ///
    /// Directory creation and write failures are returned, never swallowed.
    fn export(&self, deck: &Deck, dir: &Path) -> Result<PathBuf, ExportError>;
}

/// CSV exporter producing the `Front,Back` import format.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn export(&self, deck: &Deck, dir: &Path) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(dir).map_err(|source| ExportError::DirectoryCreateFailed {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = dir.join(format!("{}.csv", sanitize_filename(deck.title())));
        let write_failed = |source| ExportError::WriteFailed {
            path: path.clone(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_failed)?;
        write_csv(deck, tmp.as_file_mut()).map_err(write_failed)?;
        tmp.as_file().sync_all().map_err(write_failed)?;
        tmp.persist(&path).map_err(|e| write_failed(e.error))?;

        debug!(path = %path.display(), cards = deck.len(), "deck exported");
        Ok(path)
    }
}

/// Replace forbidden characters with `_` and cap the length.
///
/// ```rust
/// use brainscape_export::export::sanitize_filename;
///
/// assert_eq!(sanitize_filename("A/B:Test?"), "A_B_Test_");
/// ```
#[must_use]
pub fn sanitize_filename(title: &str) -> String {
    let sanitized: String = title
        .chars()
        .map(|c| if FORBIDDEN.contains(&c) { '_' } else { c })
        .collect();

    if sanitized.chars().count() > MAX_NAME_CHARS {
        let mut truncated: String = sanitized.chars().take(TRUNCATED_CHARS).collect();
        truncated.push_str(ELLIPSIS);
        truncated
    } else {
        sanitized
    }
}

fn write_csv<W: Write>(deck: &Deck, out: W) -> std::io::Result<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(line_terminator())
        .from_writer(out);

    writer.write_record(["Front", "Back"])?;
    for card in deck.flashcards() {
        writer.write_record([card.front(), card.back()])?;
    }

    writer.flush()
}

fn line_terminator() -> Terminator {
    if cfg!(windows) {
        Terminator::CRLF
    } else {
        Terminator::Any(b'\n')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::NormalizeOptions;
    use crate::result::Flashcard;

    fn deck(title: &str, cards: &[(&str, &str)]) -> Deck {
        let opts = NormalizeOptions::default();
        let cards = cards
            .iter()
            .filter_map(|(f, b)| Flashcard::from_fragments(f, b, &opts))
            .collect();
        Deck::new(title, cards, "https://example.com", None).unwrap()
    }

    #[test]
    fn test_sanitize_forbidden_characters() {
        assert_eq!(sanitize_filename("A/B:Test?"), "A_B_Test_");
        assert_eq!(sanitize_filename(r#"a\b*c"d<e>f|g"#), "a_b_c_d_e_f_g");
        assert_eq!(sanitize_filename("Plain Title"), "Plain Title");
    }

    #[test]
    fn test_sanitize_length() {
        let exact = "x".repeat(100);
        assert_eq!(sanitize_filename(&exact), exact);

        let long = "y".repeat(150);
        let name = sanitize_filename(&long);
        assert_eq!(name, format!("{}...", "y".repeat(97)));
        assert_eq!(name.chars().count(), 100);
    }

    #[test]
    fn test_sanitize_counts_characters_not_bytes() {
        let long = "é".repeat(120);
        let name = sanitize_filename(&long);
        assert_eq!(name.chars().count(), 100);
        assert!(name.starts_with("éé"));
    }

    #[test]
    fn test_csv_quoting() {
        let deck = deck(
            "Quoting",
            &[("Plain", "Text"), ("Comma, here", "Say \"hi\"")],
        );
        let mut out = Vec::new();
        write_csv(&deck, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Front,Back");
        assert_eq!(lines[1], "Plain,Text");
        assert_eq!(lines[2], r#""Comma, here","Say ""hi""""#);
    }
}
