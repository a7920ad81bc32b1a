//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `phish_features` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use phish_features::initialization::init_logger_with;
use phish_features::{run_build, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // .env may set PHISH_RDAP_BASE / PHISH_RANK_ENDPOINT; look next to the
    // executable when the current directory has none
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_build(config).await {
        Ok(report) => {
            println!(
                "Extracted features for {} URL{} ({} legitimate, {} phishing, {} rejected) in {:.1}s",
                report.total_urls,
                if report.total_urls == 1 { "" } else { "s" },
                report.legitimate_rows,
                report.phishing_rows,
                report.rejected_rows,
                report.elapsed_seconds
            );
            println!("Dataset saved in {}", report.output.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("phish_features error: {:#}", e);
            process::exit(1);
        }
    }
}
