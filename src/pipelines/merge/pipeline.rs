//! Merge pipeline.
//!
//! # Processing
//! 1. Sources are visited in declaration order; each record stream is read
//!    in batches from its JSONL file, skipping the checkpoint offset.
//! 1. Normalization and classification fan out over a rayon pool; both are
//!    read-only and safe to parallelize.
//! 1. Results drain serially, in stream order: dedup admission, stats and
//!    corpus writes happen on one thread (first writer wins).
//! 1. The checkpoint persists at batch boundaries, after an output flush.
//! 1. After the declared sources, an optional generated batch tops the
//!    corpus up to its target size, through the same dedup gate.
//! 1. A final exact-text pass removes anything the bounded checkpoint
//!    sample let through across restarts.
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, warn};
use rayon::prelude::*;

use super::stats::{RunSummary, SourceStats};
use super::synthetic::SyntheticSource;
use crate::classifier::HybridClassifier;
use crate::cleaning::Normalizer;
use crate::config::Config;
use crate::dedup::{content_digest, DedupIndex};
use crate::error::Error;
use crate::identifiers::Predict;
use crate::io::corpus::{self, CorpusRecord, CorpusWriter};
use crate::io::Checkpoint;
use crate::pipelines::pipeline::Pipeline;
use crate::sources::{JsonlReader, RawRecord};

const SYNTHETIC_SEED: u64 = 0x6a_6d_33;

/// Outcome of the parallel stage for one raw record.
enum Judged {
    Malformed,
    /// Already processed in a previous run.
    Seen,
    /// Dropped by normalization (empty or out of bounds).
    Unusable { id: u64 },
    Rejected { id: u64 },
    Accepted { id: u64, cleaned: String, url: String },
}

/// Cross-source merge orchestrator.
///
/// All components are constructed here and owned per run: two merges
/// never share an index, a cache or counters.
pub struct Merge {
    src: PathBuf,
    dst: PathBuf,
    checkpoint_path: PathBuf,
    config: Config,
    normalizer: Normalizer,
    classifier: HybridClassifier,
    cancel: Arc<AtomicBool>,
}

impl Merge {
    /// `src` is the directory holding one `<source>.jsonl` per declared
    /// source; `dst` is the merged CSV. The checkpoint lives next to
    /// `dst`.
    pub fn new(src: PathBuf, dst: PathBuf, predictor: Box<dyn Predict>, config: Config) -> Self {
        let checkpoint_path = dst.with_extension("progress.json");
        let normalizer = Normalizer::new(config.cleaning.clone());
        let classifier = HybridClassifier::new(predictor, config.detection.clone());
        Self {
            src,
            dst,
            checkpoint_path,
            config,
            normalizer,
            classifier,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag checked between batches; setting it makes the run finish the
    /// current batch, flush, checkpoint and return a partial summary.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn checkpoint_path(&self) -> &Path {
        &self.checkpoint_path
    }

    pub fn summary_path(&self) -> PathBuf {
        self.dst.with_extension("summary.json")
    }

    /// Normalize + classify a batch on the worker pool. Order-preserving,
    /// so the serial drain sees records in stream order.
    fn judge_batch(
        &self,
        source: &str,
        batch: Vec<Result<RawRecord, Error>>,
        checkpoint: &Checkpoint,
    ) -> Vec<Judged> {
        batch
            .into_par_iter()
            .map(|item| {
                let record = match item {
                    Ok(r) => r,
                    Err(e) => {
                        debug!("{}: skipping malformed line: {:?}", source, e);
                        return Judged::Malformed;
                    }
                };
                let id = record.id(source);
                if checkpoint.was_processed(id) {
                    return Judged::Seen;
                }
                match self.normalizer.normalize(&record.text) {
                    None => Judged::Unusable { id },
                    Some(cleaned) => {
                        if self.classifier.classify(&cleaned).accepted {
                            Judged::Accepted {
                                id,
                                cleaned,
                                url: record.url,
                            }
                        } else {
                            Judged::Rejected { id }
                        }
                    }
                }
            })
            .collect()
    }

    /// Flush output, then persist the checkpoint. Output first: the
    /// checkpoint must never claim rows the file does not hold.
    fn commit(
        &self,
        source: &str,
        offset: u64,
        writer: &mut CorpusWriter,
        checkpoint: &mut Checkpoint,
        cumulative: u64,
    ) -> Result<(), Error> {
        writer.flush()?;
        checkpoint.set_flushed_offset(source, offset);
        checkpoint.set_cumulative_accepted(cumulative);
        checkpoint.save(&self.checkpoint_path)?;
        debug!("{}: checkpoint at line {} ({} accepted)", source, offset, cumulative);
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn process_source(
        &self,
        source: &str,
        reader: &mut JsonlReader,
        index: &mut DedupIndex,
        writer: &mut CorpusWriter,
        checkpoint: &mut Checkpoint,
        cumulative: &mut u64,
        cancelled: &mut bool,
    ) -> Result<SourceStats, Error> {
        let mut stats = SourceStats::default();
        let history = self.config.merge.checkpoint_history;
        let mut since_commit = 0usize;

        loop {
            if self.cancel.load(Ordering::Relaxed) {
                warn!("{}: cancellation requested, stopping at batch boundary", source);
                *cancelled = true;
                break;
            }

            let batch: Vec<Result<RawRecord, Error>> =
                reader.by_ref().take(self.config.merge.batch_size).collect();
            if batch.is_empty() {
                break;
            }
            since_commit += batch.len();

            let judged = self.judge_batch(source, batch, &*checkpoint);

            for outcome in judged {
                stats.raw += 1;
                match outcome {
                    Judged::Malformed => stats.malformed += 1,
                    Judged::Seen => {}
                    Judged::Unusable { id } => checkpoint.mark_processed(id, history),
                    Judged::Rejected { id } => {
                        stats.cleaned += 1;
                        stats.rejected += 1;
                        checkpoint.mark_processed(id, history);
                    }
                    Judged::Accepted { id, cleaned, url } => {
                        stats.cleaned += 1;
                        checkpoint.mark_processed(id, history);
                        let digest = content_digest(&cleaned);
                        if index.admit_digest(digest) {
                            writer.write(&CorpusRecord::new(cleaned, url))?;
                            checkpoint.sample_digest(digest, history);
                            stats.accepted += 1;
                            *cumulative += 1;
                        } else {
                            stats.duplicates += 1;
                        }
                    }
                }
            }

            if since_commit >= self.config.merge.checkpoint_interval {
                since_commit = 0;
                self.commit(source, reader.offset(), writer, checkpoint, *cumulative)?;
            }
        }

        self.commit(source, reader.offset(), writer, checkpoint, *cumulative)?;
        Ok(stats)
    }

    /// Generated supplementary batch; bypasses normalization and
    /// classification (the phrases are built from known material) but
    /// faces the same dedup gate as every scraped record.
    fn append_synthetic(
        &self,
        index: &mut DedupIndex,
        writer: &mut CorpusWriter,
        checkpoint: &mut Checkpoint,
        cumulative: &mut u64,
    ) -> Result<SourceStats, Error> {
        let mut stats = SourceStats::default();
        let mut since_commit = 0usize;

        for record in SyntheticSource::new(self.config.merge.synthetic_budget, SYNTHETIC_SEED) {
            if self.cancel.load(Ordering::Relaxed) {
                break;
            }
            if let Some(target) = self.config.merge.target_size {
                if *cumulative >= target as u64 {
                    break;
                }
            }
            stats.raw += 1;
            stats.cleaned += 1;

            let digest = content_digest(&record.text);
            if index.admit_digest(digest) {
                writer.write(&CorpusRecord::new(record.text, record.url))?;
                checkpoint.sample_digest(digest, self.config.merge.checkpoint_history);
                stats.accepted += 1;
                *cumulative += 1;
            } else {
                stats.duplicates += 1;
            }

            since_commit += 1;
            if since_commit >= self.config.merge.checkpoint_interval {
                since_commit = 0;
                self.commit("generated", stats.raw, writer, checkpoint, *cumulative)?;
            }
        }

        self.commit("generated", stats.raw, writer, checkpoint, *cumulative)?;
        Ok(stats)
    }
}

impl Pipeline<RunSummary> for Merge {
    fn version() -> &'static str {
        "0.3.0"
    }

    fn run(&self) -> Result<RunSummary, Error> {
        self.config.validate()?;
        let start = Instant::now();

        let mut checkpoint = match Checkpoint::load(&self.checkpoint_path)? {
            Some(cp) => {
                info!("resuming from checkpoint {:?}", self.checkpoint_path);
                cp
            }
            None => Checkpoint::default(),
        };

        // warm the dedup index: recent digests from the checkpoint plus
        // everything already written to the output
        let mut index = DedupIndex::new();
        for digest in checkpoint.digest_sample() {
            index.warm(digest);
        }
        let existing = corpus::scan(&self.dst, |record| {
            index.warm(content_digest(&record.text));
        })?;
        if existing > 0 {
            info!("warmed dedup index from {} existing corpus rows", existing);
        }
        let mut cumulative = existing;

        let mut writer = CorpusWriter::append(&self.dst)?;
        let mut summary = RunSummary::default();
        let mut cancelled = false;

        for source in &self.config.merge.sources {
            if cancelled {
                break;
            }
            let path = self.src.join(format!("{}.jsonl", source));
            if !path.exists() {
                info!("{}: no data file at {:?}", source, path);
                continue;
            }
            let offset = checkpoint.flushed_offset(source);
            if offset > 0 {
                info!("{}: resuming at line {}", source, offset);
            }
            let mut reader = JsonlReader::with_offset(&path, offset)?;

            let stats = self.process_source(
                source,
                &mut reader,
                &mut index,
                &mut writer,
                &mut checkpoint,
                &mut cumulative,
                &mut cancelled,
            )?;
            info!(
                "{}: {} raw -> {} accepted ({} duplicates, {} rejected, {} malformed)",
                source, stats.raw, stats.accepted, stats.duplicates, stats.rejected, stats.malformed
            );
            summary.add_source(source, stats);
        }

        if self.config.merge.synthetic && !cancelled {
            let stats =
                self.append_synthetic(&mut index, &mut writer, &mut checkpoint, &mut cumulative)?;
            info!("generated: {} candidates -> {} uniques", stats.raw, stats.accepted);
            summary.add_source("generated", stats);
        }

        writer.flush()?;
        drop(writer);

        // safety net against digests the bounded sample missed across runs
        let second_pass_removed = if cancelled {
            0
        } else {
            corpus::dedup_in_place(&self.dst)?
        };
        let corpus_rows = corpus::scan(&self.dst, |_| {})?;

        checkpoint.set_cumulative_accepted(corpus_rows);
        checkpoint.save(&self.checkpoint_path)?;

        summary.completed = !cancelled;
        summary.corpus_rows = corpus_rows;
        summary.second_pass_removed = second_pass_removed;
        summary.cache = self.classifier.cache_stats();
        summary.elapsed_secs = start.elapsed().as_secs_f64();
        summary.write(&self.summary_path())?;

        info!(
            "merge {}: {} raw -> {} corpus rows in {:.1}s (cache hit rate {:.1}%)",
            if summary.completed { "complete" } else { "cancelled" },
            summary.total_raw,
            summary.corpus_rows,
            summary.elapsed_secs,
            summary.cache.hit_rate() * 100.0
        );
        Ok(summary)
    }
}
