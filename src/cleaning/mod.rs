/*! Raw text cleaning.

Normalization is the first pipeline stage: everything downstream
(scoring, classification, dedup digests) operates on cleaned text.
!*/
mod normalize;

pub use normalize::Normalizer;
