//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_MAX_CONCURRENCY, DEFAULT_RANK_ENDPOINT, DEFAULT_RDAP_BASE, DEFAULT_USER_AGENT,
    MAX_CONCURRENCY_LIMIT, PAGE_FETCH_TIMEOUT_SECS,
};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Run configuration.
///
/// Parsed from the command line by the binary, or constructed programmatically
/// by library users.
///
/// # Examples
///
/// ```no_run
/// use phish_features::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     legitimate: Some(PathBuf::from("benign.txt")),
///     phishing: Some(PathBuf::from("online-valid.csv")),
///     sample: Some(5000),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "phish_features",
    version,
    about = "Builds labeled phishing/legitimate feature datasets from URL lists"
)]
pub struct Config {
    /// File of legitimate URLs (text, one per line, or CSV with a `url` column)
    #[arg(long)]
    pub legitimate: Option<PathBuf>,

    /// File of phishing URLs (text, one per line, or CSV with a `url` column)
    #[arg(long)]
    pub phishing: Option<PathBuf>,

    /// Randomly sample this many URLs from each source
    #[arg(long)]
    pub sample: Option<usize>,

    /// Seed for sampling
    #[arg(long, default_value_t = 12)]
    pub seed: u64,

    /// Combined output CSV
    #[arg(long, short, default_value = "urldata.csv")]
    pub output: PathBuf,

    /// Also write legitimate.csv and phishing.csv next to the combined output
    #[arg(long)]
    pub per_source: bool,

    /// Maximum URLs extracted concurrently
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// Page fetch timeout in seconds
    #[arg(long, default_value_t = PAGE_FETCH_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// RDAP service used for registration lookups
    #[arg(long, env = "PHISH_RDAP_BASE", default_value = DEFAULT_RDAP_BASE)]
    pub rdap_base: String,

    /// Traffic ranking endpoint
    #[arg(long, env = "PHISH_RANK_ENDPOINT", default_value = DEFAULT_RANK_ENDPOINT)]
    pub rank_endpoint: String,

    /// Skip every network and registration lookup (all such signals take their fallback)
    #[arg(long)]
    pub offline: bool,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,
}

impl Config {
    /// Checks the configuration for values the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` describing the first invalid value found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.legitimate.is_none() && self.phishing.is_none() {
            return Err(ConfigError::NoInputs);
        }
        if self.max_concurrency == 0 || self.max_concurrency > MAX_CONCURRENCY_LIMIT {
            return Err(ConfigError::Concurrency {
                value: self.max_concurrency,
                max: MAX_CONCURRENCY_LIMIT,
            });
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.sample == Some(0) {
            return Err(ConfigError::EmptySample);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            legitimate: None,
            phishing: None,
            sample: None,
            seed: 12,
            output: PathBuf::from("urldata.csv"),
            per_source: false,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            timeout_seconds: PAGE_FETCH_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            rdap_base: DEFAULT_RDAP_BASE.to_string(),
            rank_endpoint: DEFAULT_RANK_ENDPOINT.to_string(),
            offline: false,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
