use brainscape_export::dom;
use brainscape_export::extractor::html::{extract, extract_with, CascadeMethod, CASCADE};
use brainscape_export::extractor::RawCard;

const MIXED_PAGE: &str = r#"
<html><body>
  <div class="flashcard-row full-card">
    <div class="question-contents">
      <div class="main-fields-container">Capital of France?</div>
    </div>
    <div class="answer-contents">
      <div class="main-fields-container">Paris</div>
    </div>
  </div>
  <div class="flashcard-row">
    <div class="card-face question">Capital of Spain?</div>
    <div class="card-face answer">Madrid</div>
  </div>
  <div class="flashcard-row">
    <div class="advert">Upgrade now</div>
  </div>
  <div class="flashcard-row">
    <div class="card-header"><div class="flashcard-type-indicator">Q</div></div>
    <div class="main-fields-container">Capital of Italy?</div>
    <div class="card-header"><div class="flashcard-type-indicator">A</div></div>
    <div class="main-fields-container">Rome</div>
  </div>
</body></html>
"#;

fn trimmed(cards: &[RawCard]) -> Vec<(String, String)> {
    cards
        .iter()
        .map(|c| (c.question.trim().to_string(), c.answer.trim().to_string()))
        .collect()
}

#[test]
fn mixed_layouts_come_out_in_document_order() {
    let doc = dom::parse(MIXED_PAGE);
    let result = extract(&doc);

    assert_eq!(
        trimmed(&result.cards),
        vec![
            ("Capital of France?".to_string(), "Paris".to_string()),
            ("Capital of Spain?".to_string(), "Madrid".to_string()),
            ("Capital of Italy?".to_string(), "Rome".to_string()),
        ]
    );

    let methods: Vec<_> = result.rows.iter().map(|r| r.method).collect();
    assert_eq!(
        methods,
        vec![
            Some(CascadeMethod::FullCard),
            Some(CascadeMethod::CardFaces),
            None,
            Some(CascadeMethod::TypeIndicators),
        ]
    );
    assert_eq!(result.skipped(), 1);
}

#[test]
fn rows_matching_one_method_ignore_cascade_order() {
    let doc = dom::parse(MIXED_PAGE);
    let forward = extract(&doc);

    let mut reversed = CASCADE;
    reversed.reverse();
    let backward = extract_with(&doc, &reversed);

    assert_eq!(forward, backward);
}

#[test]
fn blurrable_row_drops_link_text() {
    let html = r#"
        <div class="flashcard-row is-blurrable">
          <div class="card-face question">Define osmosis</div>
          <div class="card-face answer">
            <div class="answer-content">Diffusion of water <a href="/pro">Unlock with Pro</a></div>
          </div>
        </div>"#;
    let doc = dom::parse(html);
    let result = extract(&doc);

    assert_eq!(result.rows[0].method, Some(CascadeMethod::BlurredAnswer));
    assert_eq!(result.cards.len(), 1);
    assert!(result.cards[0].answer.contains("Diffusion of water"));
    assert!(!result.cards[0].answer.contains("Unlock"));
}

#[test]
fn page_without_rows_yields_nothing() {
    let doc = dom::parse("<html><body><p>Log in to continue</p></body></html>");
    let result = extract(&doc);

    assert!(result.cards.is_empty());
    assert!(result.rows.is_empty());
}
