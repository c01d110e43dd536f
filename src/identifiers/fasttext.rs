//! Fasttext identifier
use std::path::Path;

use fasttext::{FastText as FastTextLib, Prediction};

use super::{Identification, Predict};
use crate::error::Error;

/// Clean the prediction label field from `__label__xx` into `xx`.
///
/// # Errors
/// Returns an error if the provided prediction is too short to be cleaned.
fn clean_prediction(prediction: &Prediction) -> Result<Prediction, String> {
    if prediction.label.chars().count() < 9 {
        return Err(format!(
            "Label is too short to be cleaned: {}",
            prediction.label
        ));
    }
    Ok(Prediction {
        prob: prediction.prob,
        label: prediction.label.chars().skip(9).collect(),
    })
}

/// Holds a [fasttext::FastText] instance and its parameters:
/// - `k`, number of predicted languages on a text
/// - `threshold`, prediction threshold
pub struct FastText {
    predictor: FastTextLib,
    pub k: i32,
    pub threshold: f32,
}

impl FastText {
    /// Create a new fasttext classifier over a `lid.176`-style model.
    ///
    /// - `k` is set to 1
    /// - `threshold` is set to 0: the hybrid policy wants a label and a
    ///   confidence even when the model is unsure.
    pub fn new_lid(filename: &Path) -> Result<Self, Error> {
        Self::new(filename, 1, 0.0)
    }

    /// Create a new fasttext classifier.
    ///
    /// `filename` has to be a path to a `bin`/`ftz` model file.
    pub fn new(filename: &Path, k: i32, threshold: f32) -> Result<Self, Error> {
        let mut predictor = FastTextLib::new();
        let filename_str = filename.to_str();
        match filename_str {
            None => Err(Error::Classifier(format!(
                "invalid filepath for lid: {:?}",
                filename
            ))),
            Some(filename) => {
                predictor
                    .load_model(filename)
                    .map_err(Error::Classifier)?;
                Ok(Self {
                    predictor,
                    k,
                    threshold,
                })
            }
        }
    }
}

impl Predict for FastText {
    fn predict(&self, text: &str) -> Result<Option<Identification>, Error> {
        // newlines confuse the model, NUL bytes crash the underlying C++
        let sanitized = text.replace(['\n', '\t'], " ").replace(char::from(0), "");

        let predictions = self
            .predictor
            .predict(&sanitized, self.k, self.threshold)
            .map_err(Error::Classifier)?;

        match predictions.into_iter().next() {
            Some(pred) => {
                let pred = clean_prediction(&pred).unwrap_or(pred);
                Ok(Some(Identification::new(pred.label, pred.prob)))
            }
            None => Ok(None),
        }
    }
}
