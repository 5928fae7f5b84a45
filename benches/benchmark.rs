//! Performance benchmarks for deck extraction.
//!
//! Run with: `cargo bench`

use brainscape_export::extractor::html;
use brainscape_export::normalize::{normalize, NormalizeOptions};
use brainscape_export::{dom, extract_deck_from_html};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const ROW_LAYOUTS: [&str; 4] = [
    r#"<div class="flashcard-row full-card">
         <div class="question-contents"><div class="main-fields-container">Question {n}</div></div>
         <div class="answer-contents"><div class="main-fields-container">Answer {n}</div></div>
       </div>"#,
    r#"<div class="flashcard-row">
         <div class="card-face question"><div class="question-content">Question {n}</div></div>
         <div class="card-face answer"><div class="answer-content">Answer {n}</div></div>
       </div>"#,
    r#"<div class="flashcard-row is-blurrable">
         <div class="card-face question">Question {n}</div>
         <div class="card-face answer"><div class="answer-content">Answer {n} <a href="/pro">Unlock</a></div></div>
       </div>"#,
    r#"<div class="flashcard-row">
         <div class="card-header"><div class="flashcard-type-indicator">Q</div></div>
         <div class="main-fields-container">Question {n}</div>
         <div class="card-header"><div class="flashcard-type-indicator">A</div></div>
         <div class="main-fields-container">Answer {n}</div>
       </div>"#,
];

/// Deck page with `cards` rows cycling through every layout.
fn deck_page(cards: usize) -> String {
    let rows: String = (0..cards)
        .map(|n| ROW_LAYOUTS[n % ROW_LAYOUTS.len()].replace("{n}", &n.to_string()))
        .collect();
    format!(
        "<html><head><title>Bench Deck</title></head><body><h1 class=\"deck-title\">Bench Deck</h1>{rows}</body></html>"
    )
}

fn bench_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade");

    for cards in [10, 100, 1000] {
        let page = deck_page(cards);
        let doc = dom::parse(&page);
        group.throughput(Throughput::Elements(cards as u64));
        group.bench_with_input(BenchmarkId::new("extract", cards), &doc, |b, doc| {
            b.iter(|| html::extract(black_box(doc)));
        });
    }

    group.finish();
}

fn bench_import(c: &mut Criterion) {
    let page = deck_page(200);
    c.bench_function("import_200_cards", |b| {
        b.iter(|| extract_deck_from_html(black_box(&page), "bench.html"));
    });
}

fn bench_normalize(c: &mut Criterion) {
    let fragment = "<div><p>B. Mitochondria</p>\n\n<p>How well did you know this?</p>\
                    <p>Not at all</p><p>Perfectly</p></div>";
    let opts = NormalizeOptions {
        strip_boilerplate: true,
    };

    c.bench_function("normalize_markup", |b| {
        b.iter(|| normalize(black_box(fragment), &opts));
    });
    c.bench_function("normalize_plain", |b| {
        b.iter(|| normalize(black_box("  plain   text\n with  gaps "), &opts));
    });
}

criterion_group!(benches, bench_cascade, bench_import, bench_normalize);
criterion_main!(benches);
