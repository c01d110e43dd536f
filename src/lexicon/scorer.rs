//! Lexicon affinity scoring.
use lazy_static::lazy_static;
use regex::Regex;
use unicode_script::{Script, UnicodeScript};

use super::wordbank;

lazy_static! {
    // script-aware word boundaries: contiguous Arabic runs or
    // contiguous latin alphanumeric runs
    static ref TOKEN: Regex = Regex::new(
        "[\u{0600}-\u{06FF}\u{0750}-\u{077F}\u{FB50}-\u{FDFF}\u{FE70}-\u{FEFF}]+|[a-zA-Z0-9]+"
    )
    .unwrap();
    // romanized-register words carrying a phoneme digit (3=ع 2=ء 7=ح 9=ق)
    static ref PHONEME_DIGIT_WORD: Regex = Regex::new(r"\b\w*[3279]\w*\b").unwrap();
}

/// True if any char belongs to the Arabic script (all ranges, including
/// presentation forms).
pub fn has_arabic_script(text: &str) -> bool {
    text.chars().any(|c| c.script() == Script::Arabic)
}

/// Scores texts against the static wordbank. Stateless and `Sync`; the
/// underlying sets are built once and shared by reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }

    /// Returns `(affinity, match_count)`.
    ///
    /// Whole matches come from token membership in either register and
    /// from substring hits of longer expressions (which may not align
    /// with token boundaries). Tokens mixing letters with phoneme digits
    /// add a fractional 0.5 each; purely numeric tokens never count.
    /// The affinity normalizes the count against 30% of the token count,
    /// saturating at 1.0.
    pub fn score(&self, text: &str) -> (f64, f64) {
        if text.trim().is_empty() {
            return (0.0, 0.0);
        }

        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = TOKEN.find_iter(text).map(|m| m.as_str()).collect();
        let total_tokens = tokens.len();

        let mut count = 0.0f64;
        for token in &tokens {
            if wordbank::ARABIC.contains(token) {
                count += 1.0;
            } else if wordbank::LATIN.contains(token.to_lowercase().as_str()) {
                count += 1.0;
            }
        }

        for expr in wordbank::ARABIC_SUBSTRINGS.iter() {
            if text.contains(expr) {
                count += 1.0;
            }
        }
        for expr in wordbank::LATIN_SUBSTRINGS.iter() {
            if lowered.contains(expr) {
                count += 1.0;
            }
        }

        for m in PHONEME_DIGIT_WORD.find_iter(&lowered) {
            let word = m.as_str();
            if !word.chars().all(|c| c.is_numeric()) && word.chars().any(|c| c.is_alphabetic()) {
                count += 0.5;
            }
        }

        let affinity = (count / (total_tokens as f64 * 0.3).max(1.0)).min(1.0);
        (affinity, count)
    }

    pub fn match_count(&self, text: &str) -> f64 {
        self.score(text).1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        let s = LexiconScorer::new();
        assert_eq!(s.score(""), (0.0, 0.0));
        assert_eq!(s.score("   "), (0.0, 0.0));
    }

    #[test]
    fn arabic_register_tokens() {
        let s = LexiconScorer::new();
        let (affinity, count) = s.score("واش كاين شي خدمة فهاد المدينة");
        assert!(count >= 2.0, "count was {}", count);
        assert!(affinity > 0.0);
    }

    #[test]
    fn romanized_register_case_insensitive() {
        let s = LexiconScorer::new();
        let (_, lower) = s.score("salam khoya, labas?");
        let (_, upper) = s.score("Salam KHOYA, Labas?");
        assert!(lower >= 3.0);
        assert_eq!(lower, upper);
    }

    #[test]
    fn expression_substring_match() {
        let s = LexiconScorer::new();
        // attached clitic: token boundary does not isolate the expression
        let (_, count) = s.score("والله ما شفت حاجة بحال هادي");
        assert!(count >= 1.0);
    }

    #[test]
    fn phoneme_digit_bonus_is_fractional() {
        let s = LexiconScorer::new();
        let (_, count) = s.score("m3ak nishan");
        // "m3ak" is not a wordbank entry: only the digit bonus fires
        assert_eq!(count, 0.5);
    }

    #[test]
    fn purely_numeric_tokens_ignored() {
        let s = LexiconScorer::new();
        let (_, count) = s.score("1239 372 927");
        assert_eq!(count, 0.0);
    }

    #[test]
    fn english_text_scores_zero() {
        let s = LexiconScorer::new();
        let (affinity, count) = s.score("This is an English comment");
        assert_eq!(count, 0.0);
        assert_eq!(affinity, 0.0);
    }

    #[test]
    fn affinity_saturates() {
        let s = LexiconScorer::new();
        let (affinity, _) = s.score("wallah bzaf zwin salam labas safi wakha");
        assert_eq!(affinity, 1.0);
    }

    #[test]
    fn arabic_script_detection() {
        assert!(has_arabic_script("كاين"));
        assert!(has_arabic_script("mixed كاين text"));
        assert!(!has_arabic_script("latin only 379"));
    }
}
