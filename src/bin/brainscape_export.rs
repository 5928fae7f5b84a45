//! Command-line front end: fetch a deck URL (or read saved markup) and write
//! `<title>.csv` into the output directory.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use brainscape_export::{Options, Pipeline, RunOutcome};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "brainscape-export", version, about = "Export a Brainscape deck to a Front,Back CSV file")]
struct Cli {
    /// Deck page URL
    #[arg(required_unless_present = "html", conflicts_with = "html")]
    url: Option<String>,

    /// Read deck markup from a file instead of fetching (`-` for stdin)
    #[arg(long, value_name = "FILE")]
    html: Option<PathBuf>,

    /// Directory to write the CSV file into
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Skip the structured card endpoint and read the page markup only
    #[arg(long)]
    no_api: bool,

    /// Strip rating prompts and lettered options from card text
    /// (always on for --html)
    #[arg(long)]
    strip_boilerplate: bool,

    /// Print the extraction report as JSON on stdout
    #[arg(long)]
    json_report: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> Options {
        let base = if self.html.is_some() {
            Options::for_html_import()
        } else {
            Options::default()
        };

        Options {
            timeout: Duration::from_secs(self.timeout),
            prefer_api: base.prefer_api && !self.no_api,
            strip_boilerplate: base.strip_boilerplate || self.strip_boilerplate,
            ..base
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "brainscape_export=warn",
        1 => "brainscape_export=debug",
        _ => "brainscape_export=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_markup(path: &Path) -> io::Result<String> {
    if path.as_os_str() == "-" {
        let mut html = String::new();
        io::stdin().read_to_string(&mut html)?;
        Ok(html)
    } else {
        std::fs::read_to_string(path)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let pipeline = match Pipeline::new(cli.options()) {
        Ok(pipeline) => pipeline,
        Err(err) => {
            eprintln!("Failed to initialise HTTP client: {err}");
            return ExitCode::FAILURE;
        }
    };

    let outcome = match (&cli.html, &cli.url) {
        (Some(path), _) => match read_markup(path) {
            Ok(html) => pipeline.run_html(&html, &path.display().to_string(), &cli.output),
            Err(err) => {
                eprintln!("Failed to read {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        },
        (None, Some(url)) => pipeline.run(url, &cli.output).await,
        (None, None) => {
            eprintln!("A deck URL or --html is required");
            return ExitCode::FAILURE;
        }
    };

    let printed = report(
        &outcome,
        cli.json_report,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );

    match printed {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Failed to write output: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Print the outcome; returns whether the deck was saved.
///
/// With `json_report` stdout carries only the JSON report and the summary
/// goes to `err`.
fn report<O: Write, E: Write>(
    outcome: &RunOutcome,
    json_report: bool,
    out: &mut O,
    err: &mut E,
) -> io::Result<bool> {
    let details = outcome.report();

    if json_report {
        let json = serde_json::to_string_pretty(details).map_err(io::Error::other)?;
        writeln!(out, "{json}")?;
    }

    for warning in &details.warnings {
        writeln!(err, "warning: {warning}")?;
    }

    match outcome {
        RunOutcome::Exported { deck, path, .. } => {
            let source = details.source.map(|s| s.to_string()).unwrap_or_default();
            let summary = format!(
                "Exported {} cards from \"{}\" ({source}) to {}",
                deck.len(),
                deck.title(),
                path.display()
            );
            if json_report {
                writeln!(err, "{summary}")?;
            } else {
                writeln!(out, "{summary}")?;
            }
            Ok(true)
        }
        RunOutcome::NotSaved { deck, error, .. } => {
            writeln!(err, "Extracted {} cards but could not save them: {error}", deck.len())?;
            Ok(false)
        }
        RunOutcome::NoDeck { .. } => {
            writeln!(err, "No cards found")?;
            if let Some(reason) = &details.page_failure {
                writeln!(err, "  deck page: {reason}")?;
            }
            if let Some(reason) = &details.api_failure {
                writeln!(err, "  card endpoint: {reason}")?;
            }
            let skipped = details.rows.iter().filter(|r| r.method.is_none()).count();
            if skipped > 0 {
                writeln!(err, "  {skipped} of {} card rows had an unrecognised layout", details.rows.len())?;
            }
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brainscape_export::{CardSource, Deck, ExtractionReport, Flashcard, NormalizeOptions};

    fn exported() -> RunOutcome {
        let card = Flashcard::from_fragments("Q", "A", &NormalizeOptions::default()).unwrap();
        let deck = Deck::new("Capitals", vec![card], "https://example.com", None).unwrap();
        RunOutcome::Exported {
            deck,
            path: PathBuf::from("out/Capitals.csv"),
            report: ExtractionReport {
                source: Some(CardSource::DeckPage),
                card_count: 1,
                ..ExtractionReport::default()
            },
        }
    }

    #[test]
    fn test_json_report_keeps_stdout_parseable() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let saved = report(&exported(), true, &mut out, &mut err).unwrap();

        assert!(saved);
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["card_count"], 1);
        assert!(String::from_utf8(err).unwrap().contains("Exported 1 cards"));
    }

    #[test]
    fn test_summary_on_stdout_without_json() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        report(&exported(), false, &mut out, &mut err).unwrap();

        assert!(String::from_utf8(out).unwrap().starts_with("Exported 1 cards"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_no_deck_is_failure() {
        let outcome = RunOutcome::NoDeck {
            report: ExtractionReport::default(),
        };
        let (mut out, mut err) = (Vec::new(), Vec::new());

        assert!(!report(&outcome, false, &mut out, &mut err).unwrap());
        assert!(out.is_empty());
        assert!(String::from_utf8(err).unwrap().contains("No cards found"));
    }
}
