/*! Darija lexicon and affinity scoring.

The wordbank is a static, two-register inventory (Arabic script and
romanized "3arbiya") built once and shared read-only across workers.
The scorer turns it into a per-text affinity signal that recovers
dialect vocabulary the statistical classifier systematically misses.
!*/
mod scorer;
mod wordbank;

pub use scorer::{has_arabic_script, LexiconScorer};

/// True when both registers are empty. Checked at startup; an empty
/// lexicon is a configuration error.
pub fn is_empty() -> bool {
    wordbank::ARABIC.is_empty() && wordbank::LATIN.is_empty()
}
