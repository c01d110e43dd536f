/*!
# IO utilities

Merged corpus reading/writing and the resumable progress checkpoint.
!*/
pub mod checkpoint;
pub mod corpus;

pub use checkpoint::Checkpoint;
pub use corpus::{CorpusRecord, CorpusWriter};
