//! Instrument file-format configuration.
//!
//! Solar simulators export I-V sweeps in wildly different text layouts, so
//! everything about the ingest format lives in a TOML file next to the data
//! (default `jv.toml`, overridable with `--config`):
//!
//! ```toml
//! format = ".txt"
//! voltage_column = 1
//! current_column = 2
//! separator = "\t"
//! header_lines = 2
//! footer_lines = 0
//! decimal_separator = "."
//! quadrant = 4
//! current_is_density = false
//! cell_area = 0.09
//! current_exponent = 3
//! area_exponent = 0
//! voltage_exponent = 3
//! ```
//!
//! Everything except the quadrant is validated at load time with a clear
//! message. The quadrant is deliberately passed through raw: the normalizer
//! owns that check, so an invalid value fails the same way no matter where
//! the sweep came from.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::domain::UnitConversion;
use crate::error::AppError;

/// Parsed and (mostly) validated analysis configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Filename extension of the instrument exports (e.g. ".txt").
    /// Absent or empty means every regular file in the directory.
    #[serde(default)]
    pub format: Option<String>,

    /// 1-based column position of the voltage values.
    #[serde(default = "default_voltage_column")]
    pub voltage_column: usize,

    /// 1-based column position of the current values.
    #[serde(default = "default_current_column")]
    pub current_column: usize,

    /// Field separator, a single ASCII character ("\t" for tab).
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Rows to skip at the top of every file.
    #[serde(default)]
    pub header_lines: usize,

    /// Rows to drop at the bottom of every file.
    #[serde(default)]
    pub footer_lines: usize,

    /// Decimal convention of the numeric fields: '.' or ','.
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,

    /// Recording quadrant as written by the instrument. Validated by the
    /// normalizer, not here.
    #[serde(default = "default_quadrant")]
    pub quadrant: i64,

    /// True when the instrument already reports a current density; false
    /// when it reports a raw current that must be divided by `cell_area`.
    #[serde(default = "default_current_is_density")]
    pub current_is_density: bool,

    /// Device area (cm²) for the current-to-density conversion.
    #[serde(default = "default_cell_area")]
    pub cell_area: f64,

    /// Power-of-ten correction for the current unit.
    #[serde(default)]
    pub current_exponent: i32,

    /// Power-of-ten correction for the area unit.
    #[serde(default)]
    pub area_exponent: i32,

    /// Power-of-ten correction for the voltage unit.
    #[serde(default)]
    pub voltage_exponent: i32,
}

fn default_voltage_column() -> usize {
    1
}

fn default_current_column() -> usize {
    2
}

fn default_separator() -> String {
    "\t".to_string()
}

fn default_decimal_separator() -> char {
    '.'
}

fn default_quadrant() -> i64 {
    1
}

fn default_current_is_density() -> bool {
    true
}

fn default_cell_area() -> f64 {
    1.0
}

impl AnalysisConfig {
    /// Load and validate a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = fs::read_to_string(path).map_err(|e| {
            AppError::config(format!(
                "Failed to read configuration file '{}': {e}",
                path.display()
            ))
        })?;
        let config: AnalysisConfig = toml::from_str(&text).map_err(|e| {
            AppError::config(format!(
                "Invalid configuration file '{}': {e}",
                path.display()
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate everything the core treats as pre-validated input.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.voltage_column == 0 || self.current_column == 0 {
            return Err(AppError::config(
                "Column positions are 1-based; 0 is not a valid column.",
            ));
        }
        if self.voltage_column == self.current_column {
            return Err(AppError::config(
                "`voltage_column` and `current_column` must differ.",
            ));
        }
        let separator = self.separator_byte()?;
        if self.decimal_separator != '.' && self.decimal_separator != ',' {
            return Err(AppError::config(format!(
                "Invalid `decimal_separator` '{}': expected '.' or ','.",
                self.decimal_separator
            )));
        }
        if separator == self.decimal_separator as u8 {
            return Err(AppError::config(
                "`separator` and `decimal_separator` cannot use the same character.",
            ));
        }
        if !self.current_is_density && !(self.cell_area.is_finite() && self.cell_area > 0.0) {
            return Err(AppError::config(format!(
                "`cell_area` must be finite and > 0 to convert a raw current to a density (got {}).",
                self.cell_area
            )));
        }
        Ok(())
    }

    /// The separator as the single byte the CSV reader wants.
    ///
    /// Accepts the literal two-character spelling `\t` as well, since TOML
    /// literal strings ('...') do not process escapes.
    pub fn separator_byte(&self) -> Result<u8, AppError> {
        if self.separator == "\t" || self.separator == "\\t" {
            return Ok(b'\t');
        }
        let mut bytes = self.separator.bytes();
        match (bytes.next(), bytes.next()) {
            (Some(b), None) if b.is_ascii() => Ok(b),
            _ => Err(AppError::config(format!(
                "Invalid `separator` {:?}: expected a single ASCII character or \"\\t\".",
                self.separator
            ))),
        }
    }

    /// The unit-conversion values consumed by the normalizer.
    pub fn unit_conversion(&self) -> UnitConversion {
        UnitConversion {
            cell_area: self.cell_area,
            current_exponent: self.current_exponent,
            area_exponent: self.area_exponent,
            voltage_exponent: self.voltage_exponent,
        }
    }
}
