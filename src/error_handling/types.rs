//! Error type definitions.
//!
//! This module defines the error types surfaced by the pipeline and the lookup
//! kinds tracked by the processing statistics.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::{AsRefStr, EnumIter as EnumIterMacro};
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Invalid run configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Neither a legitimate nor a phishing input was given.
    #[error("At least one of --legitimate or --phishing is required")]
    NoInputs,

    /// Concurrency outside the accepted range.
    #[error("max_concurrency must be between 1 and {max}, got {value}")]
    Concurrency {
        /// Rejected value
        value: usize,
        /// Largest accepted value
        max: usize,
    },

    /// Page fetch timeout of zero seconds.
    #[error("timeout_seconds must be greater than 0")]
    ZeroTimeout,

    /// Sample size of zero.
    #[error("sample must be greater than 0")]
    EmptySample,
}

/// A row that does not line up with the feature schema.
///
/// A misaligned vector silently corrupts predictions, so these are fatal for
/// the row (or table) that produced them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Wrong number of model features.
    #[error("expected {expected} features, got {actual}")]
    Cardinality {
        /// Schema feature count
        expected: usize,
        /// Count found
        actual: usize,
    },

    /// A feature appeared at the wrong position.
    #[error("feature at position {position} should be {expected}, got {found}")]
    Order {
        /// Zero-based position within the model features
        position: usize,
        /// Schema name for that position
        expected: String,
        /// Name found there
        found: String,
    },

    /// Table header differs from the schema.
    #[error("header does not match feature schema v{version}: expected [{expected}], got [{found}]")]
    Header {
        /// Schema version checked against
        version: u32,
        /// Expected header, comma-joined
        expected: String,
        /// Header found, comma-joined
        found: String,
    },

    /// A cell could not be read as the numeric value its column requires.
    #[error("invalid value {value:?} for column {column}")]
    Value {
        /// Column name
        column: String,
        /// Offending text
        value: String,
    },
}

/// External lookups performed per URL.
///
/// Used as keys in `ProcessingStats`. Failures are expected and map to
/// fallback values; the counts drive the batch-level exhaustion warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, AsRefStr)]
pub enum LookupKind {
    /// Page content fetch
    PageFetch,
    /// Traffic ranking service
    TrafficRank,
    /// Domain registration (RDAP) lookup
    Registration,
}
