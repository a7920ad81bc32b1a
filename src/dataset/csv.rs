//! CSV import/export of feature tables.
//!
//! The header is always the schema column list. Reading validates the header
//! and every cell, so a table produced by another tool (or an older schema)
//! cannot be fed to a model silently misaligned.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Writer};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::error_handling::SchemaError;
use crate::features::{
    schema_header, FeatureVector, Label, MODEL_FEATURES, MODEL_FEATURE_COUNT, SCHEMA_VERSION,
};

/// Writes `rows` as CSV (header first) to `writer`.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_csv<W: Write>(rows: &[FeatureVector], writer: W) -> Result<()> {
    let mut writer = Writer::from_writer(writer);
    writer
        .write_record(schema_header())
        .context("Failed to write CSV header")?;
    for row in rows {
        writer
            .write_record(row.to_record())
            .with_context(|| format!("Failed to write row for {}", row.domain()))?;
    }
    writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Writes `rows` to a new CSV file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_csv_file(rows: &[FeatureVector], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    write_csv(rows, BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Reads a feature table, validating it against the schema.
///
/// # Errors
///
/// Returns an error wrapping `SchemaError::Header` if the header differs from
/// the schema, or a `SchemaError` for the first malformed row (with its line
/// number as context).
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<FeatureVector>> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);

    let found: Vec<String> = reader
        .headers()
        .context("Failed to read CSV header")?
        .iter()
        .map(str::to_string)
        .collect();
    let expected = schema_header();
    if found != expected {
        return Err(SchemaError::Header {
            version: SCHEMA_VERSION,
            expected: expected.join(","),
            found: found.join(","),
        }
        .into());
    }

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        // Header is line 1.
        let line = index + 2;
        let record = record.with_context(|| format!("Failed to read CSV line {line}"))?;
        let row = parse_record(&record).with_context(|| format!("Invalid row at line {line}"))?;
        rows.push(row);
    }
    Ok(rows)
}

fn parse_record(record: &StringRecord) -> Result<FeatureVector, SchemaError> {
    if record.len() != MODEL_FEATURE_COUNT + 2 {
        return Err(SchemaError::Cardinality {
            expected: MODEL_FEATURE_COUNT,
            actual: record.len().saturating_sub(2),
        });
    }

    let domain = record.get(0).unwrap_or_default();
    let mut values = Vec::with_capacity(MODEL_FEATURE_COUNT);
    for (feature, cell) in MODEL_FEATURES.iter().zip(record.iter().skip(1)) {
        let value = cell.trim().parse::<u32>().map_err(|_| SchemaError::Value {
            column: feature.name().to_string(),
            value: cell.to_string(),
        })?;
        values.push(value);
    }

    let label_cell = record.get(MODEL_FEATURE_COUNT + 1).unwrap_or_default();
    let label = label_cell
        .trim()
        .parse::<u8>()
        .ok()
        .and_then(Label::from_value)
        .ok_or_else(|| SchemaError::Value {
            column: "Label".to_string(),
            value: label_cell.to_string(),
        })?;

    FeatureVector::from_values(domain, &values, label)
}
