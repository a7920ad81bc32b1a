//! Candidate URL lists.
//!
//! Inputs are either plain text (one URL per line, blank lines and `#`
//! comments skipped) or CSV. A CSV with a `url` or `URLs` header column reads
//! that column; a CSV without one is treated as headerless and its first column
//! is used.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fs;
use std::path::Path;

use crate::features::Label;

/// Loads the candidate URLs listed in `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is malformed CSV.
pub fn load_urls(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file {}", path.display()))?;
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let urls = if is_csv {
        urls_from_csv(&content)
            .with_context(|| format!("Failed to parse CSV input {}", path.display()))?
    } else {
        urls_from_text(&content)
    };
    log::info!("Loaded {} URLs from {}", urls.len(), path.display());
    Ok(urls)
}

fn urls_from_text(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

fn urls_from_csv(content: &str) -> Result<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());
    let mut records = reader.records();

    let Some(first) = records.next() else {
        return Ok(Vec::new());
    };
    let first = first.context("Failed to read first CSV record")?;
    let url_column = first.iter().position(|cell| {
        let cell = cell.trim();
        cell.eq_ignore_ascii_case("url") || cell.eq_ignore_ascii_case("urls")
    });

    let (column, mut urls) = match url_column {
        Some(column) => (column, Vec::new()),
        None => (0, first.get(0).map(str::trim).into_iter().map(str::to_string).collect()),
    };

    for record in records {
        let record = record.context("Failed to read CSV record")?;
        if let Some(url) = record.get(column).map(str::trim) {
            if !url.is_empty() {
                urls.push(url.to_string());
            }
        }
    }
    urls.retain(|url| !url.is_empty());
    Ok(urls)
}

/// Random sample of at most `n` URLs, reproducible for a given `seed`.
///
/// Lists with `n` or fewer entries are returned unchanged.
pub fn sample_urls(mut urls: Vec<String>, n: usize, seed: u64) -> Vec<String> {
    if urls.len() <= n {
        log::debug!("Sample size {} covers all {} URLs", n, urls.len());
        return urls;
    }
    let mut rng = StdRng::seed_from_u64(seed);
    urls.shuffle(&mut rng);
    urls.truncate(n);
    urls
}

/// Pairs every URL with the label of its source.
pub fn labeled(urls: Vec<String>, label: Label) -> Vec<(String, Label)> {
    urls.into_iter().map(|url| (url, label)).collect()
}
