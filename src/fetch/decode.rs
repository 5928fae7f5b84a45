//! Response body decoding.
//!
//! Bodies are decoded using the first charset found in: the `Content-Type`
//! header, `<meta charset>`, `<meta http-equiv="Content-Type">`. Anything
//! else is treated as UTF-8. Invalid sequences become U+FFFD.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// `charset=...` inside a `Content-Type` value.
#[allow(clippy::expect_used)]
static HEADER_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"';\s]+)"#).expect("valid regex")
});

/// `<meta charset="...">`
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>]+)"#).expect("valid regex")
});

/// `<meta http-equiv="Content-Type" content="...; charset=...">`
#[allow(clippy::expect_used)]
static CONTENT_TYPE_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#).expect("valid regex")
});

/// Only the head of the document is scanned for meta declarations.
const META_SCAN_BYTES: usize = 1024;

/// Pick the encoding for a body.
#[must_use]
pub fn detect_encoding(body: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some(encoding) = content_type.and_then(|ct| label(&HEADER_CHARSET_RE, ct)) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&body[..body.len().min(META_SCAN_BYTES)]);

    label(&CHARSET_META_RE, &head)
        .or_else(|| label(&CONTENT_TYPE_META_RE, &head))
        .unwrap_or(UTF_8)
}

/// Decode a body to UTF-8.
///
/// ```
/// use brainscape_export::fetch::decode::decode_body;
///
/// let body = b"<html><head><meta charset=\"ISO-8859-1\"></head><body>Caf\xE9</body></html>";
/// assert!(decode_body(body, None).contains("Café"));
/// ```
#[must_use]
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = detect_encoding(body, content_type);

    if encoding == UTF_8 {
        return String::from_utf8_lossy(body).into_owned();
    }

    let (decoded, _used, _had_errors) = encoding.decode(body);
    decoded.into_owned()
}

fn label(pattern: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let charset = pattern.captures(haystack)?.get(1)?;
    Encoding::for_label(charset.as_str().as_bytes())
}
