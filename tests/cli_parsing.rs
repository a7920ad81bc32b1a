//! Tests for command-line parsing into `Config`.

use clap::Parser;
use phish_features::config::{LogFormat, LogLevel};
use phish_features::{Config, ConfigError};
use std::path::PathBuf;

#[test]
fn test_full_argument_set() {
    let config = Config::try_parse_from([
        "phish_features",
        "--legitimate",
        "benign.txt",
        "--phishing",
        "online-valid.csv",
        "--sample",
        "5000",
        "--seed",
        "7",
        "--output",
        "out/urldata.csv",
        "--per-source",
        "--max-concurrency",
        "40",
        "--timeout-seconds",
        "3",
        "--user-agent",
        "test-agent/1.0",
        "--rdap-base",
        "http://localhost:9000",
        "--rank-endpoint",
        "http://localhost:9001/data",
        "--offline",
        "--log-level",
        "debug",
        "--log-format",
        "json",
    ])
    .expect("valid arguments");

    assert_eq!(config.legitimate, Some(PathBuf::from("benign.txt")));
    assert_eq!(config.phishing, Some(PathBuf::from("online-valid.csv")));
    assert_eq!(config.sample, Some(5000));
    assert_eq!(config.seed, 7);
    assert_eq!(config.output, PathBuf::from("out/urldata.csv"));
    assert!(config.per_source);
    assert_eq!(config.max_concurrency, 40);
    assert_eq!(config.timeout_seconds, 3);
    assert_eq!(config.user_agent, "test-agent/1.0");
    assert_eq!(config.rdap_base, "http://localhost:9000");
    assert_eq!(config.rank_endpoint, "http://localhost:9001/data");
    assert!(config.offline);
    assert!(matches!(config.log_level, LogLevel::Debug));
    assert!(matches!(config.log_format, LogFormat::Json));
    assert!(config.validate().is_ok());
}

#[test]
fn test_short_output_flag() {
    let config = Config::try_parse_from(["phish_features", "--legitimate", "a.txt", "-o", "x.csv"])
        .expect("valid arguments");
    assert_eq!(config.output, PathBuf::from("x.csv"));
    assert!(!config.per_source);
    assert!(!config.offline);
}

#[test]
fn test_invalid_values_are_rejected_by_parser() {
    assert!(Config::try_parse_from(["phish_features", "--max-concurrency", "many"]).is_err());
    assert!(Config::try_parse_from(["phish_features", "--log-level", "loud"]).is_err());
    assert!(Config::try_parse_from(["phish_features", "--log-format", "xml"]).is_err());
    assert!(Config::try_parse_from(["phish_features", "--unknown-flag"]).is_err());
}

#[test]
fn test_parsed_config_still_needs_an_input() {
    let config = Config::try_parse_from(["phish_features"]).expect("parses without inputs");
    assert!(matches!(config.validate(), Err(ConfigError::NoInputs)));
}

#[test]
fn test_zero_concurrency_fails_validation() {
    let config =
        Config::try_parse_from(["phish_features", "--phishing", "p.txt", "--max-concurrency", "0"])
            .expect("parses");
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Concurrency { value: 0, .. })
    ));
}
