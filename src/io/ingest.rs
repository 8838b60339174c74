//! Sweep-file ingest and validation.
//!
//! This module turns a heterogeneous solar-simulator export into a clean
//! `Sweep` that is safe to normalize.
//!
//! Design goals:
//! - **Config-driven format** (delimiter, column positions, header/footer
//!   rows, decimal convention) with no format sniffing
//! - **Row-level errors** that name the offending row
//! - **Separation of concerns**: no normalization or extraction logic here

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::config::AnalysisConfig;
use crate::domain::{Sweep, SweepPoint};
use crate::error::AppError;

/// Read one sweep file from disk according to the configured format.
pub fn read_sweep(path: &Path, config: &AnalysisConfig) -> Result<Sweep, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::malformed(format!("Failed to open sweep file '{}': {e}", path.display()))
    })?;
    read_sweep_from(file, &path.display().to_string(), config)
}

/// Parse a sweep from any reader. Split out from [`read_sweep`] so tests can
/// feed in-memory bytes without touching the filesystem.
pub fn read_sweep_from<R: Read>(
    reader: R,
    label: &str,
    config: &AnalysisConfig,
) -> Result<Sweep, AppError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(config.separator_byte()?)
        .from_reader(reader);

    let mut records: Vec<StringRecord> = Vec::new();
    for (idx, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| {
            AppError::malformed(format!("'{label}' row {}: parse error: {e}", idx + 1))
        })?;
        records.push(record);
    }

    // Instrument exports carry metadata rows above and below the data block;
    // both counts come from the configuration.
    let total = records.len();
    let start = config.header_lines.min(total);
    let end = total.saturating_sub(config.footer_lines).max(start);
    let data = &records[start..end];

    let mut points = Vec::with_capacity(data.len());
    for (offset, record) in data.iter().enumerate() {
        let row = start + offset + 1;
        points.push(parse_point(record, row, label, config)?);
    }

    Sweep::from_points(points)
        .map_err(|e| AppError::malformed(format!("'{label}': {e}")))
}

fn parse_point(
    record: &StringRecord,
    row: usize,
    label: &str,
    config: &AnalysisConfig,
) -> Result<SweepPoint, AppError> {
    let voltage = parse_field(record, config.voltage_column, row, label, config)?;
    let current = parse_field(record, config.current_column, row, label, config)?;
    Ok(SweepPoint::new(voltage, current))
}

fn parse_field(
    record: &StringRecord,
    column: usize,
    row: usize,
    label: &str,
    config: &AnalysisConfig,
) -> Result<f64, AppError> {
    let raw = record
        .get(column - 1)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            AppError::malformed(format!(
                "'{label}' row {row}: missing value in column {column}."
            ))
        })?;

    // Decimal-comma exports are converted field by field; the separator and
    // decimal convention never use the same character (validated in config).
    let owned;
    let text = if config.decimal_separator == ',' {
        owned = raw.replace(',', ".");
        owned.as_str()
    } else {
        raw
    };

    let value: f64 = text.parse().map_err(|_| {
        AppError::malformed(format!(
            "'{label}' row {row}: invalid numeric value '{raw}' in column {column}."
        ))
    })?;
    if !value.is_finite() {
        return Err(AppError::malformed(format!(
            "'{label}' row {row}: non-finite value '{raw}' in column {column}."
        )));
    }
    Ok(value)
}
