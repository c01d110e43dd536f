/*! Run configuration.

Plain structs with defaults matching the historical collection runs.
A JSON file can override any subset of fields; CLI flags override the file.
Validation happens once, before any record is processed: a bad threshold or
an empty label set must never be discovered mid-run.
!*/
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::lexicon;

/// Text normalizer knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    pub strip_html: bool,
    pub strip_urls: bool,
    /// Strip pictographic symbols. Off by default: emojis carry meaning
    /// in Darija social register.
    pub strip_symbols: bool,
    /// Strip everything outside the Arabic/Latin/digit/punctuation whitelist.
    pub strip_junk: bool,
    pub min_chars: usize,
    pub max_chars: usize,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            strip_html: true,
            strip_urls: true,
            strip_symbols: false,
            strip_junk: false,
            min_chars: 5,
            max_chars: 5000,
        }
    }
}

/// Hybrid classifier knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Labels the external classifier may confirm (Arabic + Egyptian Arabic,
    /// the closest labels the lid model knows).
    pub accepted_labels: Vec<String>,
    pub confidence_threshold: f32,
    /// Foreign labels that short-circuit to rejection when confident.
    pub rejected_labels: Vec<String>,
    pub reject_confidence: f32,
    /// Lexicon matches needed for a lexicon-only acceptance.
    pub min_lexicon_matches: u32,
    pub cache_size: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            accepted_labels: vec!["ar".into(), "arz".into()],
            confidence_threshold: 0.4,
            rejected_labels: [
                "en", "fr", "es", "tr", "pl", "de", "it", "pt", "nl", "ru", "id", "ms",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            reject_confidence: 0.3,
            min_lexicon_matches: 2,
            cache_size: 10_000,
        }
    }
}

/// Merge orchestration knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Source names, in declaration order. Each maps to `<name>.jsonl`
    /// under the source directory.
    pub sources: Vec<String>,
    pub batch_size: usize,
    /// Accepted records between two checkpoint writes.
    pub checkpoint_interval: usize,
    /// Bound on the checkpoint's recent-id and digest-sample sets.
    pub checkpoint_history: usize,
    /// Append a generated supplementary batch after the declared sources.
    pub synthetic: bool,
    /// Upper bound on generated candidates.
    pub synthetic_budget: usize,
    /// Stop the synthetic batch once the corpus reaches this size.
    pub target_size: Option<usize>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            sources: ["youtube", "hespress", "tiktok", "twitter", "facebook"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            batch_size: 512,
            checkpoint_interval: 5_000,
            checkpoint_history: 10_000,
            synthetic: false,
            synthetic_budget: 50_000,
            target_size: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cleaning: CleaningConfig,
    pub detection: DetectionConfig,
    pub merge: MergeConfig,
}

impl Config {
    /// Load overrides from a JSON file on top of defaults.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let f = std::fs::File::open(path)?;
        let config = serde_json::from_reader(f)?;
        Ok(config)
    }

    /// Fail fast on configurations that would only blow up mid-run.
    pub fn validate(&self) -> Result<(), Error> {
        fn unit(name: &str, v: f32) -> Result<(), Error> {
            if !(0.0..=1.0).contains(&v) {
                return Err(Error::Config(format!("{} must be within [0, 1], got {}", name, v)));
            }
            Ok(())
        }

        unit("confidence_threshold", self.detection.confidence_threshold)?;
        unit("reject_confidence", self.detection.reject_confidence)?;

        if self.cleaning.min_chars > self.cleaning.max_chars {
            return Err(Error::Config(format!(
                "min_chars ({}) exceeds max_chars ({})",
                self.cleaning.min_chars, self.cleaning.max_chars
            )));
        }
        if self.detection.accepted_labels.is_empty() {
            return Err(Error::Config("accepted_labels is empty".into()));
        }
        if self.detection.min_lexicon_matches == 0 {
            return Err(Error::Config("min_lexicon_matches must be at least 1".into()));
        }
        if self.detection.cache_size == 0 {
            return Err(Error::Config("cache_size must be nonzero".into()));
        }
        if self.merge.batch_size == 0 || self.merge.checkpoint_interval == 0 {
            return Err(Error::Config("batch_size and checkpoint_interval must be nonzero".into()));
        }
        if self.merge.sources.is_empty() && !self.merge.synthetic {
            return Err(Error::Config("no sources declared and synthetic batch disabled".into()));
        }
        if lexicon::is_empty() {
            return Err(Error::Config("lexicon is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn bad_threshold_rejected() {
        let mut c = Config::default();
        c.detection.confidence_threshold = 1.5;
        assert!(c.validate().is_err());
    }

    #[test]
    fn swapped_bounds_rejected() {
        let mut c = Config::default();
        c.cleaning.min_chars = 100;
        c.cleaning.max_chars = 10;
        assert!(c.validate().is_err());
    }

    #[test]
    fn empty_labels_rejected() {
        let mut c = Config::default();
        c.detection.accepted_labels.clear();
        assert!(c.validate().is_err());
    }

    #[test]
    fn overlay_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"detection": {"confidence_threshold": 0.25}}"#).unwrap();

        let c = Config::from_file(&path).unwrap();
        assert_eq!(c.detection.confidence_threshold, 0.25);
        assert_eq!(c.cleaning.min_chars, CleaningConfig::default().min_chars);
        assert!(c.validate().is_ok());
    }
}
