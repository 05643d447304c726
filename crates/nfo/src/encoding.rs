// crates/nfo/src/encoding.rs
//! Text encoding detection and transcoding
//!
//! NFO files in the wild are written by many tools: some emit UTF-8 with a
//! byte-order mark, older scrapers write GBK, Shift_JIS or a Windows code
//! page with no declaration at all. Detection combines BOM sniffing, a
//! strict UTF-8 check and the `chardetng` statistical guesser.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};

/// Label returned when nothing better can be inferred
pub const FALLBACK_ENCODING: &str = "utf-8";

/// Infers the most likely text encoding of `bytes`.
///
/// Never fails. Empty input yields [`FALLBACK_ENCODING`]. The returned label
/// is an `encoding_rs` canonical name such as `UTF-8`, `GBK` or `Shift_JIS`.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return FALLBACK_ENCODING.to_string();
    }

    if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
        return encoding.name().to_string();
    }

    // Pure ASCII is valid UTF-8 too, which keeps chardetng from
    // guessing windows-1252 for plain English files.
    if std::str::from_utf8(bytes).is_ok() {
        return UTF_8.name().to_string();
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true).name().to_string()
}

/// Returns true when `label` names UTF-8 (case-insensitive)
pub fn is_utf8_label(label: &str) -> bool {
    label.eq_ignore_ascii_case("utf-8") || label.eq_ignore_ascii_case("utf8")
}

/// Decodes `bytes` into UTF-8 text using the encoding named by `label`.
///
/// A leading byte-order mark is stripped. Malformed sequences are replaced
/// with U+FFFD. An unknown label falls back to UTF-8.
pub fn decode_text(bytes: &[u8], label: &str) -> String {
    if is_utf8_label(label) {
        return decode_utf8(bytes);
    }

    match Encoding::for_label(label.as_bytes()) {
        Some(encoding) => {
            let (text, actual, had_errors) = encoding.decode(bytes);
            if had_errors {
                log::warn!(
                    "Malformed {} sequences replaced while decoding",
                    actual.name()
                );
            }
            text.into_owned()
        }
        None => {
            log::warn!("Unknown encoding label '{}', decoding as UTF-8", label);
            decode_utf8(bytes)
        }
    }
}

fn decode_utf8(bytes: &[u8]) -> String {
    let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
    if had_errors {
        log::warn!("Invalid UTF-8 sequences replaced while decoding");
    }
    text.into_owned()
}
