/*! External language classifier seam.

The pipeline never talks to a concrete classifier directly: everything
goes through [Predict], so tests and alternative backends can swap in.
The shipped backend is [FastText].
!*/
mod fasttext;

pub use self::fasttext::FastText;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A single language identification: cleaned label and confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identification {
    label: String,
    prob: f32,
}

impl Identification {
    pub fn new(label: impl Into<String>, prob: f32) -> Self {
        Self {
            label: label.into(),
            prob,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn prob(&self) -> f32 {
        self.prob
    }
}

/// Language prediction backends.
///
/// Called once per cleaned text, potentially hundreds of thousands of
/// times per run. Implementations must be cheap to call and must never
/// block indefinitely: a network-backed implementation has to enforce
/// its own deadline and return `Err` on expiry. Callers degrade any
/// `Err` or `None` to an unknown identification; they never retry.
pub trait Predict: Send + Sync {
    /// Identify `text`, returning `Ok(None)` when no reliable
    /// identification could be made.
    fn predict(&self, text: &str) -> Result<Option<Identification>, Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identification_accessors() {
        let id = Identification::new("ar", 0.87);
        assert_eq!(id.label(), "ar");
        assert_eq!(id.prob(), 0.87);
    }
}
