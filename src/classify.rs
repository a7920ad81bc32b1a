//! Classifier boundary.
//!
//! The crate does not train or ship a model. It defines the exact input a
//! trained classifier consumes and a small helper that runs extraction and
//! prediction for one URL.

use anyhow::{Context, Result};

use crate::extract::FeatureExtractor;
use crate::features::{FeatureVector, Label, MODEL_FEATURE_COUNT};

/// The 16 model features of one URL, in schema order.
///
/// Only constructible from a `FeatureVector`, which has already been checked
/// against the schema.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelInput([f32; MODEL_FEATURE_COUNT]);

impl ModelInput {
    /// Feature values in schema order.
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

impl From<&FeatureVector> for ModelInput {
    fn from(row: &FeatureVector) -> Self {
        let mut values = [0.0; MODEL_FEATURE_COUNT];
        for (slot, value) in values.iter_mut().zip(row.values()) {
            // Values are 0/1 flags or small path depths.
            *slot = *value as f32;
        }
        ModelInput(values)
    }
}

/// Output of a classifier for one URL.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Predicted class
    pub label: Label,
    /// Class probabilities, indexed by `Label::value()`
    pub probabilities: [f32; 2],
}

impl Prediction {
    /// Probability assigned to the predicted class.
    pub fn confidence(&self) -> f32 {
        self.probabilities[usize::from(self.label.value())]
    }
}

/// A trained model consuming `ModelInput`.
pub trait Classifier: Send + Sync {
    /// Predicts the class of one URL.
    ///
    /// # Errors
    ///
    /// Implementation-defined (e.g. model runtime failures).
    fn predict(&self, input: &ModelInput) -> Result<Prediction>;
}

/// Extracts features for `url` and classifies them.
///
/// # Errors
///
/// Returns an error if the extracted row fails schema validation or the
/// classifier fails.
pub async fn classify_url(
    extractor: &FeatureExtractor,
    classifier: &dyn Classifier,
    url: &str,
) -> Result<Prediction> {
    let input = extractor
        .extract_input(url)
        .await
        .with_context(|| format!("Failed to extract features for {url}"))?;
    classifier
        .predict(&input)
        .with_context(|| format!("Classifier failed for {url}"))
}
