//! Deterministic cleaning of raw social-media text.
//!
//! Darija constraint: digits 2, 3, 7 and 9 transliterate Arabic phonemes
//! (2=ء, 3=ع, 7=ح, 9=ق) and must survive every step, as must the full
//! Arabic Unicode ranges. Every stripping pattern below either targets a
//! closed class (tags, urls, symbols) or whitelists those ranges.
use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::config::CleaningConfig;

lazy_static! {
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref URL: Regex =
        Regex::new(r"https?://(?:[a-zA-Z0-9$-_@.&+!*(),]|%[0-9a-fA-F]{2})+").unwrap();
    static ref SYMBOLS: Regex = Regex::new(
        "[\u{1F300}-\u{1F5FF}\u{1F600}-\u{1F64F}\u{1F680}-\u{1F6FF}\u{1F900}-\u{1F9FF}\
         \u{1F1E6}-\u{1F1FF}\u{2600}-\u{27BF}\u{2B00}-\u{2BFF}\u{FE0F}\u{200D}\u{3030}]+"
    )
    .unwrap();
    // whitelist: Arabic ranges, latin letters, digits, whitespace and
    // latin + arabic punctuation
    static ref JUNK: Regex = Regex::new(
        "[^\u{0600}-\u{06FF}\u{0750}-\u{077F}\u{FB50}-\u{FDFF}\u{FE70}-\u{FEFF}\
         a-zA-Z0-9\\s.,!?;:'\"()\\-،؟؛]"
    )
    .unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Collapse runs of 3+ identical chars down to 2 ("waaaaw" -> "waaw").
/// Hand-rolled since the regex crate has no backreferences.
fn collapse_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut run = 0usize;
    for c in text.chars() {
        if prev == Some(c) {
            run += 1;
        } else {
            prev = Some(c);
            run = 1;
        }
        if run <= 2 {
            out.push(c);
        }
    }
    out
}

/// Text normalizer. Pure and `Sync`: one instance is shared read-only
/// across all pipeline workers.
#[derive(Debug, Clone)]
pub struct Normalizer {
    config: CleaningConfig,
}

impl Normalizer {
    pub fn new(config: CleaningConfig) -> Self {
        Self { config }
    }

    /// Clean `raw`, returning `None` when the result is empty or falls
    /// outside the configured length bounds.
    ///
    /// Steps run in a fixed order, each feeding the next:
    /// NFC composition, tag strip, url strip, optional symbol strip,
    /// optional junk strip, repetition collapse, whitespace collapse.
    /// Idempotent: renormalizing an in-bounds output is a no-op.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        if raw.is_empty() {
            return None;
        }

        let text: String = raw.nfc().collect();

        let text = if self.config.strip_html {
            HTML_TAG.replace_all(&text, "").into_owned()
        } else {
            text
        };
        let text = if self.config.strip_urls {
            URL.replace_all(&text, "").into_owned()
        } else {
            text
        };
        let text = if self.config.strip_symbols {
            SYMBOLS.replace_all(&text, "").into_owned()
        } else {
            text
        };
        let text = if self.config.strip_junk {
            JUNK.replace_all(&text, " ").into_owned()
        } else {
            text
        };

        let text = collapse_runs(&text);
        let text = WHITESPACE.replace_all(&text, " ");
        let text = text.trim();

        let length = text.chars().count();
        if length < self.config.min_chars || length > self.config.max_chars {
            return None;
        }
        Some(text.to_string())
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(CleaningConfig::default())
    }
}
