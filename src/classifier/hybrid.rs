//! Hybrid accept/reject policy.
//!
//! The statistical classifier alone under-recognizes Darija: it is
//! trained on standard-register Arabic and misses both the romanized
//! register and dialectal vocabulary. The lexicon signal recovers those,
//! while the confident-foreign short-circuit keeps the lexicon's
//! permissiveness from admitting unrelated languages that share a few
//! common words.
use std::sync::Mutex;

use log::debug;
use serde::Serialize;

use super::cache::{text_key, BoundedCache, CacheStats};
use crate::config::DetectionConfig;
use crate::identifiers::Predict;
use crate::lexicon::{has_arabic_script, LexiconScorer};

pub const UNKNOWN_LABEL: &str = "unknown";

/// Outcome of classifying one cleaned text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub accepted: bool,
    pub label: String,
    pub confidence: f32,
    pub lexicon_score: f64,
    pub lexicon_matches: f64,
}

/// Explain-mode projection of a verdict, for debugging runs.
#[derive(Debug, Clone, Serialize)]
pub struct VerdictDetails {
    pub text: String,
    pub label: String,
    pub confidence: f32,
    pub lexicon_score: f64,
    pub lexicon_matches: f64,
    pub arabic_script: bool,
    pub accepted: bool,
}

/// Combines the external classifier, the lexicon scorer and the
/// rejection list into a single decision, memoized in a bounded cache.
///
/// Shared read-only across workers: the only mutable state is the cache,
/// guarded by its own lock.
pub struct HybridClassifier {
    predictor: Box<dyn Predict>,
    scorer: LexiconScorer,
    config: DetectionConfig,
    cache: Mutex<BoundedCache<Verdict>>,
}

impl HybridClassifier {
    pub fn new(predictor: Box<dyn Predict>, config: DetectionConfig) -> Self {
        let cache = Mutex::new(BoundedCache::new(config.cache_size));
        Self {
            predictor,
            scorer: LexiconScorer::new(),
            config,
            cache,
        }
    }

    /// Classify one cleaned text.
    ///
    /// Rules, first match decides:
    /// 1. confidently foreign label and zero lexicon matches: reject
    /// 2. accepted label with sufficient confidence: accept
    /// 3. enough lexicon matches on their own: accept
    /// 4. Arabic script present and at least one lexicon match: accept
    /// 5. reject
    ///
    /// An external classifier failure degrades to an unknown label with
    /// zero confidence and falls through to rules 3-5; it is never
    /// surfaced to the caller.
    pub fn classify(&self, text: &str) -> Verdict {
        let key = text_key(text);
        if let Some(verdict) = self.cache.lock().unwrap().get(key) {
            return verdict;
        }

        let verdict = self.decide(text);
        self.cache.lock().unwrap().insert(key, verdict.clone());
        verdict
    }

    fn decide(&self, text: &str) -> Verdict {
        if text.trim().chars().count() < 3 {
            return Verdict {
                accepted: false,
                label: UNKNOWN_LABEL.to_string(),
                confidence: 0.0,
                lexicon_score: 0.0,
                lexicon_matches: 0.0,
            };
        }

        let (lexicon_score, lexicon_matches) = self.scorer.score(text);

        let (label, confidence) = match self.predictor.predict(text) {
            Ok(Some(id)) => (id.label().to_string(), id.prob()),
            Ok(None) => (UNKNOWN_LABEL.to_string(), 0.0),
            Err(e) => {
                debug!("classifier failure, falling back to lexicon: {:?}", e);
                (UNKNOWN_LABEL.to_string(), 0.0)
            }
        };

        let accepted = self.accept(&label, confidence, lexicon_matches, text);

        Verdict {
            accepted,
            label,
            confidence,
            lexicon_score,
            lexicon_matches,
        }
    }

    fn accept(&self, label: &str, confidence: f32, matches: f64, text: &str) -> bool {
        let c = &self.config;

        // rule 1: confident foreign label with no lexicon support
        if c.rejected_labels.iter().any(|l| l == label)
            && confidence >= c.reject_confidence
            && matches == 0.0
        {
            return false;
        }
        // rule 2: the external classifier recognizes the dialect family
        if c.accepted_labels.iter().any(|l| l == label) && confidence >= c.confidence_threshold {
            return true;
        }
        // rule 3: the lexicon alone is conclusive
        if matches >= f64::from(c.min_lexicon_matches) {
            return true;
        }
        // rule 4: Arabic script plus at least one known word
        if has_arabic_script(text) && matches >= 1.0 {
            return true;
        }
        false
    }

    /// Full projection for the `explain` subcommand.
    pub fn explain(&self, text: &str) -> VerdictDetails {
        let verdict = self.classify(text);
        let preview: String = text.chars().take(80).collect();
        VerdictDetails {
            text: preview,
            label: verdict.label,
            confidence: verdict.confidence,
            lexicon_score: verdict.lexicon_score,
            lexicon_matches: verdict.lexicon_matches,
            arabic_script: has_arabic_script(text),
            accepted: verdict.accepted,
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.lock().unwrap().stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::identifiers::Identification;

    /// Stub backend with a fixed answer.
    struct Fixed(Option<Identification>);
    impl Predict for Fixed {
        fn predict(&self, _text: &str) -> Result<Option<Identification>, Error> {
            Ok(self.0.clone())
        }
    }

    /// Stub backend that always fails.
    struct Broken;
    impl Predict for Broken {
        fn predict(&self, _text: &str) -> Result<Option<Identification>, Error> {
            Err(Error::Classifier("backend down".to_string()))
        }
    }

    fn classifier(predictor: Box<dyn Predict>) -> HybridClassifier {
        HybridClassifier::new(predictor, DetectionConfig::default())
    }

    #[test]
    fn rule1_confident_foreign_rejected() {
        let c = classifier(Box::new(Fixed(Some(Identification::new("en", 0.95)))));
        let v = c.classify("This is an English comment");
        assert!(!v.accepted);
        assert_eq!(v.label, "en");
    }

    #[test]
    fn rule1_needs_zero_matches() {
        // foreign label but one lexicon word and Arabic script: rule 4 accepts
        let c = classifier(Box::new(Fixed(Some(Identification::new("fr", 0.8)))));
        let v = c.classify("je passe par السلام عليكم والله c'est vrai");
        assert!(v.lexicon_matches >= 1.0);
        assert!(v.accepted);
    }

    #[test]
    fn rule2_accepted_label() {
        let c = classifier(Box::new(Fixed(Some(Identification::new("ar", 0.9)))));
        let v = c.classify("نص عربي فصيح بدون كلمات دارجة هنا");
        assert!(v.accepted);
    }

    #[test]
    fn rule2_needs_threshold() {
        let c = classifier(Box::new(Fixed(Some(Identification::new("ar", 0.2)))));
        // below threshold and no lexicon support: rejected
        let v = c.classify("نص قصير غامض تماما");
        assert!(!v.accepted);
    }

    #[test]
    fn rule3_lexicon_only() {
        let c = classifier(Box::new(Fixed(None)));
        let v = c.classify("wach kayn chi jdid, safi wakha");
        assert!(v.lexicon_matches >= 2.0);
        assert!(v.accepted);
    }

    #[test]
    fn rule4_script_plus_one_match() {
        let c = classifier(Box::new(Fixed(None)));
        let v = c.classify("والله العظيم ربي يستر علينا");
        assert!(v.accepted);
    }

    #[test]
    fn rule5_nothing_matches() {
        let c = classifier(Box::new(Fixed(None)));
        let v = c.classify("zzz qqq completely unknown gibberish");
        assert!(!v.accepted);
    }

    #[test]
    fn short_text_rejected() {
        let c = classifier(Box::new(Fixed(Some(Identification::new("ar", 1.0)))));
        assert!(!c.classify("ok").accepted);
        assert!(!c.classify("  ").accepted);
    }

    #[test]
    fn broken_backend_equals_lexicon_decision() {
        let broken = classifier(Box::new(Broken));
        let lexicon_only = classifier(Box::new(Fixed(None)));

        for text in [
            "wach kayn chi jdid, safi wakha",
            "والله ما كاين باس",
            "completely unrelated text here",
        ] {
            let a = broken.classify(text);
            let b = lexicon_only.classify(text);
            assert_eq!(a.accepted, b.accepted, "diverged on {:?}", text);
            assert_eq!(a.label, UNKNOWN_LABEL);
            assert_eq!(a.confidence, 0.0);
        }
    }

    #[test]
    fn rejection_is_stable_across_repeats() {
        let c = classifier(Box::new(Fixed(Some(Identification::new("en", 0.9)))));
        let text = "This is an English comment";
        assert!(!c.classify(text).accepted);
        assert!(!c.classify(text).accepted);
        let stats = c.cache_stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn explain_projection() {
        let c = classifier(Box::new(Fixed(None)));
        let details = c.explain("salam khoya labas 3lik");
        assert!(details.accepted);
        assert!(!details.arabic_script);
        assert!(details.lexicon_matches >= 2.0);
    }
}
