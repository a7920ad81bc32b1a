//! phish_features library: feature extraction for phishing URL classification
//!
//! This library turns candidate URLs into the fixed 16-feature rows a phishing
//! classifier is trained on: lexical signals from the URL text, page content
//! and redirect signals, traffic rank, and domain registration age. It also
//! builds labeled datasets from lists of legitimate and phishing URLs.
//!
//! # Example
//!
//! ```no_run
//! use phish_features::{run_build, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     legitimate: Some(std::path::PathBuf::from("benign.txt")),
//!     phishing: Some(std::path::PathBuf::from("phish.csv")),
//!     sample: Some(5000),
//!     ..Default::default()
//! };
//!
//! let report = run_build(config).await?;
//! println!("Wrote {} legitimate and {} phishing rows",
//!          report.legitimate_rows, report.phishing_rows);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

mod app;
pub mod classify;
pub mod config;
pub mod dataset;
pub mod domain;
mod error_handling;
pub mod extract;
pub mod features;
pub mod fetch;
pub mod initialization;
pub mod whois;

// Re-export public API
pub use classify::{classify_url, Classifier, ModelInput, Prediction};
pub use config::{Config, FeaturePolicy, LogFormat, LogLevel};
pub use dataset::{build_dataset, LabeledDataset};
pub use domain::{parse, registrable_domain, ParsedUrl};
pub use error_handling::{
    ConfigError, InitializationError, LookupKind, ProcessingStats, SchemaError,
};
pub use extract::{FeatureExtractor, LookupTimeouts};
pub use features::{Feature, FeatureVector, Label, SCHEMA_VERSION};
pub use fetch::{PageFetchResult, PageFetcher, TrafficRanker};
pub use run::{run_build, BuildReport};
pub use whois::{RegistrationLookup, RegistrationRecord};

// Internal run module (contains the dataset build entry point)
mod run {
    use anyhow::{Context, Result};
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use std::time::Duration;

    use log::info;

    use crate::config::{Config, MAX_REDIRECT_HOPS};
    use crate::dataset::csv::write_csv_file;
    use crate::dataset::input::{labeled, load_urls, sample_urls};
    use crate::dataset::{build_dataset, LabeledDataset};
    use crate::extract::{FeatureExtractor, LookupTimeouts};
    use crate::features::{FeatureVector, Label};
    use crate::fetch::{HttpPageFetcher, HttpTrafficRanker};
    use crate::initialization::{init_client, init_redirect_client};
    use crate::whois::RdapLookup;

    /// Results of a dataset build.
    #[derive(Debug, Clone)]
    pub struct BuildReport {
        /// Number of candidate URLs processed (after sampling)
        pub total_urls: usize,
        /// Rows written with label 0
        pub legitimate_rows: usize,
        /// Rows written with label 1
        pub phishing_rows: usize,
        /// Rows dropped by schema validation
        pub rejected_rows: usize,
        /// Path of the combined CSV output
        pub output: PathBuf,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Builds a labeled feature dataset with the provided configuration.
    ///
    /// Loads (and optionally samples) each input list, extracts one row per URL
    /// and writes the combined table to `config.output`. With `per_source`, one
    /// table per provided source is written beside it as well.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The configuration is invalid
    /// - An input file cannot be read
    /// - The HTTP clients cannot be initialized
    /// - An output file cannot be written
    ///
    /// Lookup failures are never errors; they produce fallback feature values.
    pub async fn run_build(config: Config) -> Result<BuildReport> {
        config.validate().context("Invalid configuration")?;
        let start_time = std::time::Instant::now();

        let sources: Vec<(&PathBuf, Label)> = [
            (config.legitimate.as_ref(), Label::Legitimate),
            (config.phishing.as_ref(), Label::Phishing),
        ]
        .into_iter()
        .filter_map(|(path, label)| path.map(|p| (p, label)))
        .collect();

        let mut urls = Vec::new();
        for (path, label) in &sources {
            let mut list = load_urls(path)
                .with_context(|| format!("Failed to load {} URLs", label.source_name()))?;
            if let Some(n) = config.sample {
                list = sample_urls(list, n, config.seed);
            }
            info!("Using {} {} URLs", list.len(), label.source_name());
            urls.extend(labeled(list, *label));
        }
        let total_urls = urls.len();

        let extractor = Arc::new(init_extractor(&config)?);
        let dataset = build_dataset(Arc::clone(&extractor), urls, config.max_concurrency).await;
        if !extractor.is_offline() {
            extractor.stats().log_summary();
        }

        write_csv_file(dataset.rows(), &config.output)?;
        info!("Wrote {} rows to {}", dataset.len(), config.output.display());

        if config.per_source {
            for (_, label) in &sources {
                write_source(&dataset, *label, &config.output)?;
            }
        }

        let counts = dataset.label_counts();
        Ok(BuildReport {
            total_urls,
            legitimate_rows: counts.get(&Label::Legitimate).copied().unwrap_or(0),
            phishing_rows: counts.get(&Label::Phishing).copied().unwrap_or(0),
            rejected_rows: dataset.rejected(),
            output: config.output.clone(),
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }

    fn init_extractor(config: &Config) -> Result<FeatureExtractor> {
        if config.offline {
            info!("Offline mode: skipping page, ranking and registration lookups");
            return Ok(FeatureExtractor::offline());
        }

        let client = init_client(config).context("Failed to initialize HTTP client")?;
        let redirect_client =
            init_redirect_client(config).context("Failed to initialize redirect client")?;

        let pages = Arc::new(HttpPageFetcher::new(redirect_client, MAX_REDIRECT_HOPS));
        let ranker = Arc::new(HttpTrafficRanker::new(
            Arc::clone(&client),
            config.rank_endpoint.as_str(),
        ));
        let registry = Arc::new(RdapLookup::new(client, config.rdap_base.as_str()));

        Ok(FeatureExtractor::new(pages, ranker, registry).with_timeouts(LookupTimeouts {
            page_fetch: Duration::from_secs(config.timeout_seconds),
            ..LookupTimeouts::default()
        }))
    }

    fn write_source(dataset: &LabeledDataset, label: Label, output: &Path) -> Result<()> {
        let path = output.with_file_name(format!("{}.csv", label.source_name()));
        let rows: Vec<FeatureVector> = dataset.by_label(label).cloned().collect();
        write_csv_file(&rows, &path)?;
        info!("Wrote {} {} rows to {}", rows.len(), label.source_name(), path.display());
        Ok(())
    }
}
