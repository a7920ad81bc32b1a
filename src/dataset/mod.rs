//! Labeled dataset construction.
//!
//! `build_dataset` runs the feature assembler over every candidate URL on a
//! bounded worker pool. Each URL yields exactly one row, in input order, with
//! the label of its source. There are no retries.

pub mod csv;
pub mod input;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{info, warn};
use strum::IntoEnumIterator;

use crate::app::log_progress;
use crate::config::LOGGING_INTERVAL;
use crate::error_handling::SchemaError;
use crate::extract::FeatureExtractor;
use crate::features::{FeatureVector, Label};
use crate::initialization::init_semaphore;

/// Rows of a dataset build, plus how many rows failed schema validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabeledDataset {
    rows: Vec<FeatureVector>,
    rejected: usize,
}

impl LabeledDataset {
    /// Wraps already validated rows.
    pub fn new(rows: Vec<FeatureVector>) -> Self {
        Self { rows, rejected: 0 }
    }

    /// Rows in input order.
    pub fn rows(&self) -> &[FeatureVector] {
        &self.rows
    }

    /// Consumes the dataset, returning its rows.
    pub fn into_rows(self) -> Vec<FeatureVector> {
        self.rows
    }

    /// Number of accepted rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if no row was accepted.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows dropped because they did not match the feature schema.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Number of rows per label; every label is present, possibly with 0.
    pub fn label_counts(&self) -> HashMap<Label, usize> {
        let mut counts: HashMap<Label, usize> = Label::iter().map(|label| (label, 0)).collect();
        for row in &self.rows {
            *counts.entry(row.label()).or_insert(0) += 1;
        }
        counts
    }

    /// Rows carrying `label`, in dataset order.
    pub fn by_label(&self, label: Label) -> impl Iterator<Item = &FeatureVector> + '_ {
        self.rows.iter().filter(move |row| row.label() == label)
    }

    /// Appends the rows of `other` after this dataset's rows.
    pub fn merge(&mut self, other: LabeledDataset) {
        self.rows.extend(other.rows);
        self.rejected += other.rejected;
    }
}

/// Extracts one row per `(url, label)` pair with at most `max_concurrency`
/// URLs in flight.
///
/// A worker that panics outside the guarded lookups still yields a row
/// (lexical signals plus fallbacks). Rows failing schema validation are
/// dropped, logged and counted in `LabeledDataset::rejected`.
pub async fn build_dataset(
    extractor: Arc<FeatureExtractor>,
    urls: Vec<(String, Label)>,
    max_concurrency: usize,
) -> LabeledDataset {
    let total = urls.len();
    let semaphore = init_semaphore(max_concurrency.max(1));
    let start_time = Instant::now();
    let mut tasks = FuturesUnordered::new();

    info!(
        "Extracting features for {} URLs (max concurrency {})",
        total, max_concurrency
    );

    for (index, (url, label)) in urls.iter().cloned().enumerate() {
        let permit = Arc::clone(&semaphore).acquire_owned().await.ok();
        if permit.is_none() {
            warn!("Semaphore closed, extracting {url} without a concurrency permit");
        }
        let extractor = Arc::clone(&extractor);
        let handle = tokio::spawn(async move {
            let _permit = permit;
            extractor.extract_all(&url, label).await
        });
        tasks.push(async move { (index, handle.await) });
    }

    let mut slots: Vec<Option<FeatureVector>> = vec![None; total];
    let mut rejected = 0usize;
    let mut completed = 0usize;

    while let Some((index, joined)) = tasks.next().await {
        let (url, label) = &urls[index];
        let outcome: Result<FeatureVector, SchemaError> = match joined {
            Ok(outcome) => outcome,
            Err(join_error) => {
                warn!("Extraction task for {url} failed: {join_error}");
                extractor.fallback_row(url, *label)
            }
        };
        match outcome {
            Ok(row) => slots[index] = Some(row),
            Err(e) => {
                warn!("Rejected row for {url}: {e}");
                rejected += 1;
            }
        }

        completed += 1;
        if completed % LOGGING_INTERVAL == 0 {
            log_progress(start_time, completed, total);
        }
    }
    log_progress(start_time, completed, total);

    let rows: Vec<FeatureVector> = slots.into_iter().flatten().collect();
    LabeledDataset { rows, rejected }
}
