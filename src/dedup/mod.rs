/*! Content-addressed deduplication.

One index is shared across all sources of a merge run: the first source
to admit a text wins, later duplicates are discarded wherever they come
from. Admission takes `&mut self` so concurrent mutation is impossible
by construction; the orchestrator serializes all calls behind its
draining loop.
!*/
use std::collections::HashSet;
use std::hash::Hasher;

use twox_hash::XxHash64;

/// Digest of the case-folded, trimmed text. Two records whose cleaned
/// texts only differ by case or surrounding whitespace collide on
/// purpose.
pub fn content_digest(text: &str) -> u64 {
    let folded = text.trim().to_lowercase();
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(folded.as_bytes());
    hasher.finish()
}

/// Grow-only set of admitted content digests.
#[derive(Debug, Default)]
pub struct DedupIndex {
    seen: HashSet<u64>,
}

impl DedupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a text. `true` means first sight: the caller may keep the
    /// record. `false` means duplicate: the caller must discard it.
    /// Once a digest is admitted, every later call with an equal digest
    /// returns `false` for the lifetime of the run.
    pub fn admit(&mut self, text: &str) -> bool {
        self.admit_digest(content_digest(text))
    }

    /// Admission on a precomputed digest, for callers that also need the
    /// digest value (checkpoint sampling).
    pub fn admit_digest(&mut self, digest: u64) -> bool {
        self.seen.insert(digest)
    }

    /// Pre-load a digest without going through a text, used to warm the
    /// index from a checkpoint sample on resume.
    pub fn warm(&mut self, digest: u64) {
        self.seen.insert(digest);
    }

    pub fn contains(&self, digest: u64) -> bool {
        self.seen.contains(&digest)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
