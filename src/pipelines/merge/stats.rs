//! Per-run counters.
//!
//! Rejections, duplicates and malformed lines are counted separately so
//! silent over-filtering stays observable: a run that drops 90% of its
//! input must say where the records went.
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::classifier::CacheStats;
use crate::error::Error;

/// Counters for one source within a single merge run.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SourceStats {
    /// Records read this run (resumed offsets excluded).
    pub raw: u64,
    /// Unparseable lines, skipped.
    pub malformed: u64,
    /// Records that survived normalization.
    pub cleaned: u64,
    /// Records the classifier rejected.
    pub rejected: u64,
    /// Records dropped by the dedup gate.
    pub duplicates: u64,
    /// Records written to the corpus.
    pub accepted: u64,
}

impl SourceStats {
    /// Records dropped during normalization (empty or out of bounds).
    pub fn clean_dropped(&self) -> u64 {
        self.raw - self.malformed - self.cleaned
    }
}

/// Aggregated outcome of one merge run, serialized next to the corpus.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// False when the run was cancelled before exhausting its sources.
    pub completed: bool,
    pub elapsed_secs: f64,
    pub total_raw: u64,
    pub total_malformed: u64,
    pub total_cleaned: u64,
    pub total_rejected: u64,
    pub total_duplicates: u64,
    pub total_accepted: u64,
    /// Rows in the corpus file after the second-pass dedup.
    pub corpus_rows: u64,
    pub second_pass_removed: u64,
    pub per_source: BTreeMap<String, SourceStats>,
    pub cache: CacheStats,
}

impl RunSummary {
    pub fn add_source(&mut self, name: &str, stats: SourceStats) {
        self.total_raw += stats.raw;
        self.total_malformed += stats.malformed;
        self.total_cleaned += stats.cleaned;
        self.total_rejected += stats.rejected;
        self.total_duplicates += stats.duplicates;
        self.total_accepted += stats.accepted;
        self.per_source.insert(name.to_string(), stats);
    }

    pub fn write(&self, path: &Path) -> Result<(), Error> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_accumulate() {
        let mut summary = RunSummary::default();
        summary.add_source(
            "youtube",
            SourceStats {
                raw: 10,
                malformed: 1,
                cleaned: 8,
                rejected: 2,
                duplicates: 1,
                accepted: 5,
            },
        );
        summary.add_source(
            "tiktok",
            SourceStats {
                raw: 4,
                malformed: 0,
                cleaned: 4,
                rejected: 0,
                duplicates: 2,
                accepted: 2,
            },
        );
        assert_eq!(summary.total_raw, 14);
        assert_eq!(summary.total_accepted, 7);
        assert_eq!(summary.per_source.len(), 2);
        assert_eq!(summary.per_source["youtube"].clean_dropped(), 1);
    }

    #[test]
    fn summary_serializes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let mut summary = RunSummary::default();
        summary.completed = true;
        summary.write(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"completed\": true"));
        assert!(raw.contains("per_source"));
    }
}
