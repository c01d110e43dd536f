/*! Cross-source merge pipeline.

Reads each source's raw record stream, drives normalization,
classification and dedup admission, and emits one consolidated corpus
plus a resumable checkpoint and a per-run summary.
!*/
#[allow(clippy::module_inception)]
mod pipeline;
mod stats;
mod synthetic;

pub use pipeline::Merge;
pub use stats::{RunSummary, SourceStats};
pub use synthetic::SyntheticSource;
