//! Resumable merge progress.
//!
//! The checkpoint is small by design: per-source flushed offsets, a
//! bounded window of recently processed record ids, and a bounded sample
//! of recently admitted digests. It is written at batch boundaries only,
//! after the output flush, so its counts never run ahead of durable rows.
//!
//! The digest sample deliberately does not persist the whole dedup index:
//! duplicates older than the window can be re-admitted after a restart
//! and are caught by the final second-pass dedup instead.
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Lines durably consumed per source, in reading order.
    flushed: BTreeMap<String, u64>,
    /// Most recent raw-record identifiers, oldest first.
    processed_ids: VecDeque<u64>,
    /// Most recent admitted content digests, oldest first.
    digest_sample: VecDeque<u64>,
    cumulative_accepted: u64,
    #[serde(skip)]
    processed_index: HashSet<u64>,
}

impl Checkpoint {
    /// Load from `path`; a missing file is a fresh run, not an error.
    pub fn load(path: &Path) -> Result<Option<Self>, Error> {
        if !path.exists() {
            return Ok(None);
        }
        let file = File::open(path)?;
        let mut checkpoint: Checkpoint = serde_json::from_reader(file)?;
        checkpoint.processed_index = checkpoint.processed_ids.iter().copied().collect();
        Ok(Some(checkpoint))
    }

    /// Persist atomically: write a sibling temp file, then rename.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let tmp = path.with_extension("tmp");
        let file = File::create(&tmp)?;
        serde_json::to_writer(file, self)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    pub fn flushed_offset(&self, source: &str) -> u64 {
        self.flushed.get(source).copied().unwrap_or(0)
    }

    pub fn set_flushed_offset(&mut self, source: &str, offset: u64) {
        self.flushed.insert(source.to_string(), offset);
    }

    pub fn mark_processed(&mut self, id: u64, bound: usize) {
        if !self.processed_index.insert(id) {
            return;
        }
        self.processed_ids.push_back(id);
        while self.processed_ids.len() > bound {
            if let Some(old) = self.processed_ids.pop_front() {
                self.processed_index.remove(&old);
            }
        }
    }

    pub fn was_processed(&self, id: u64) -> bool {
        self.processed_index.contains(&id)
    }

    pub fn sample_digest(&mut self, digest: u64, bound: usize) {
        self.digest_sample.push_back(digest);
        while self.digest_sample.len() > bound {
            self.digest_sample.pop_front();
        }
    }

    pub fn digest_sample(&self) -> impl Iterator<Item = u64> + '_ {
        self.digest_sample.iter().copied()
    }

    pub fn cumulative_accepted(&self) -> u64 {
        self.cumulative_accepted
    }

    pub fn set_cumulative_accepted(&mut self, accepted: u64) {
        self.cumulative_accepted = accepted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_fresh_run() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Checkpoint::load(&dir.path().join("none.json")).unwrap().is_none());
    }

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");

        let mut cp = Checkpoint::default();
        cp.set_flushed_offset("youtube", 1200);
        cp.set_flushed_offset("tiktok", 45);
        cp.mark_processed(7, 100);
        cp.mark_processed(8, 100);
        cp.sample_digest(0xdead, 100);
        cp.set_cumulative_accepted(900);
        cp.save(&path).unwrap();

        let loaded = Checkpoint::load(&path).unwrap().unwrap();
        assert_eq!(loaded.flushed_offset("youtube"), 1200);
        assert_eq!(loaded.flushed_offset("tiktok"), 45);
        assert_eq!(loaded.flushed_offset("unknown"), 0);
        assert!(loaded.was_processed(7));
        assert!(!loaded.was_processed(9));
        assert_eq!(loaded.digest_sample().collect::<Vec<_>>(), vec![0xdead]);
        assert_eq!(loaded.cumulative_accepted(), 900);
    }

    #[test]
    fn bounded_history_drops_oldest() {
        let mut cp = Checkpoint::default();
        for id in 0..10u64 {
            cp.mark_processed(id, 4);
            cp.sample_digest(id, 4);
        }
        assert!(!cp.was_processed(0));
        assert!(cp.was_processed(9));
        assert_eq!(cp.digest_sample().count(), 4);
        assert_eq!(cp.digest_sample().next(), Some(6));
    }

    #[test]
    fn save_replaces_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");

        let mut cp = Checkpoint::default();
        cp.set_cumulative_accepted(1);
        cp.save(&path).unwrap();
        cp.set_cumulative_accepted(2);
        cp.save(&path).unwrap();

        let loaded = Checkpoint::load(&path).unwrap().unwrap();
        assert_eq!(loaded.cumulative_accepted(), 2);
        assert!(!path.with_extension("tmp").exists());
    }
}
