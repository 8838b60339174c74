//! Report artifact writers.
//!
//! Each analysed file gets a text report (always) and a JSON report (only
//! with `--json`). Both are meant to be easy to consume downstream: the text
//! file pastes into spreadsheets, the JSON carries the unrounded floats.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::domain::{CellParameters, NormalizedSweep};
use crate::error::AppError;
use crate::report::FormattedParameters;

/// Write the plain-text report produced by `report::format_report`.
pub fn write_report_text(path: &Path, text: &str) -> Result<(), AppError> {
    fs::write(path, text).map_err(|e| {
        AppError::output(format!("Failed to write report '{}': {e}", path.display()))
    })
}

/// Machine-readable per-file report.
///
/// `dark` mirrors the presentation-layer placeholder decision so consumers
/// do not have to re-derive it from the formatted strings.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub source: &'a str,
    pub sweep: &'a NormalizedSweep,
    pub parameters: &'a CellParameters,
    pub formatted: &'a FormattedParameters,
    pub dark: bool,
}

/// Write the JSON report.
pub fn write_report_json(path: &Path, report: &JsonReport<'_>) -> Result<(), AppError> {
    let file = fs::File::create(path).map_err(|e| {
        AppError::output(format!("Failed to create JSON report '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(file, report).map_err(|e| {
        AppError::output(format!("Failed to write JSON report '{}': {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SweepPoint;
    use crate::report::format_parameters;

    #[test]
    fn json_report_carries_floats_and_dark_flag() {
        let sweep = NormalizedSweep::new(vec![
            SweepPoint::new(0.0, 4.8),
            SweepPoint::new(150.0, 0.0),
        ]);
        let parameters = CellParameters { voc: 150.0, jsc: 4.8, ff: 27.7778, pce: 0.2 };
        let formatted = format_parameters(&parameters);
        let report = JsonReport {
            source: "a1.txt",
            sweep: &sweep,
            parameters: &parameters,
            formatted: &formatted,
            dark: formatted.is_dark(),
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["source"], "a1.txt");
        assert_eq!(value["dark"], false);
        assert_eq!(value["parameters"]["voc"], 150.0);
        assert_eq!(value["formatted"]["jsc"], "4.80");
        assert_eq!(value["sweep"]["points"][1]["voltage"], 150.0);
    }
}
