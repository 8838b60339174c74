//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during normalization and extraction
//! - exported to JSON alongside the text report
//! - constructed directly in tests without any filesystem involvement

use serde::Serialize;

use crate::error::AppError;

/// A single measured sample of an I-V sweep.
///
/// Units depend on context: ingest units as configured before normalization,
/// mV / mA cm⁻² afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    pub voltage: f64,
    pub current: f64,
}

impl SweepPoint {
    pub fn new(voltage: f64, current: f64) -> Self {
        Self { voltage, current }
    }
}

/// A raw sweep exactly as read from the instrument file, in file order.
///
/// The stored order encodes the scan direction (forward: voltage increasing,
/// reverse: voltage decreasing) and is never reordered. Construction goes
/// through [`Sweep::from_points`] so every sweep in the program is known to
/// have at least two finite samples.
#[derive(Debug, Clone)]
pub struct Sweep {
    points: Vec<SweepPoint>,
}

impl Sweep {
    /// Validate and wrap raw samples.
    ///
    /// Rejects sweeps with fewer than 2 samples and any non-finite value;
    /// both are malformed input, not recoverable measurement conditions.
    pub fn from_points(points: Vec<SweepPoint>) -> Result<Self, AppError> {
        if points.len() < 2 {
            return Err(AppError::malformed(format!(
                "Sweep has {} data row(s); at least 2 are required.",
                points.len()
            )));
        }
        for (idx, p) in points.iter().enumerate() {
            if !(p.voltage.is_finite() && p.current.is_finite()) {
                return Err(AppError::malformed(format!(
                    "Sweep sample {} is not finite (V={}, C={}).",
                    idx + 1,
                    p.voltage,
                    p.current
                )));
            }
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[SweepPoint] {
        &self.points
    }

    /// Consume the sweep, handing the samples to the normalizer.
    pub fn into_points(self) -> Vec<SweepPoint> {
        self.points
    }
}

/// Sign convention under which the sweep was recorded, relative to the
/// canonical quadrant 1 (V >= 0, C >= 0 near the operating point).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    One,
    Two,
    Three,
    Four,
}

impl Quadrant {
    /// Validate the raw configured quadrant number.
    ///
    /// Anything outside 1..=4 is a configuration fault and must never
    /// silently fall back to quadrant 1.
    pub fn from_config(raw: i64) -> Result<Self, AppError> {
        match raw {
            1 => Ok(Quadrant::One),
            2 => Ok(Quadrant::Two),
            3 => Ok(Quadrant::Three),
            4 => Ok(Quadrant::Four),
            other => Err(AppError::config(format!(
                "Invalid quadrant {other} in the configuration: expected 1, 2, 3 or 4."
            ))),
        }
    }
}

/// Multiplicative ingest-unit correction applied during normalization.
///
/// `cell_area` is the device area used to turn a raw current into a current
/// density; the exponents are powers of ten correcting the instrument's
/// units of measure to mV / mA cm⁻².
#[derive(Debug, Clone, Copy)]
pub struct UnitConversion {
    pub cell_area: f64,
    pub current_exponent: i32,
    pub area_exponent: i32,
    pub voltage_exponent: i32,
}

impl UnitConversion {
    /// A conversion that leaves values untouched.
    pub fn identity() -> Self {
        Self {
            cell_area: 1.0,
            current_exponent: 0,
            area_exponent: 0,
            voltage_exponent: 0,
        }
    }
}

/// Scan direction, inferred from the first two samples only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDirection {
    Forward,
    Reverse,
}

/// A sweep guaranteed to be in quadrant 1, voltage in mV, current in
/// mA cm⁻².
///
/// Only the normalizer constructs these; downstream code (extraction,
/// reporting, plotting) can rely on the units without rechecking.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedSweep {
    points: Vec<SweepPoint>,
}

impl NormalizedSweep {
    pub(crate) fn new(points: Vec<SweepPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[SweepPoint] {
        &self.points
    }

    /// Infer the scan direction from the first two samples.
    ///
    /// Voltage increasing means forward, anything else reverse. This is a
    /// deliberate heuristic: it uses only the first pair and is trusted for
    /// the whole sweep. Non-monotonic sweeps are out of scope.
    pub fn scan_direction(&self) -> ScanDirection {
        if self.points[0].voltage < self.points[1].voltage {
            ScanDirection::Forward
        } else {
            ScanDirection::Reverse
        }
    }
}

/// The four standard photovoltaic figures of merit, unrounded.
///
/// Tied 1:1 to the `NormalizedSweep` they were extracted from. `ff` is
/// non-finite when `jsc` or `voc` is zero (dark or degenerate sweep); that
/// is data, not an error, and the presentation layer decides how to show it.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CellParameters {
    /// Open-circuit voltage (mV).
    pub voc: f64,
    /// Short-circuit current density (mA cm⁻²).
    pub jsc: f64,
    /// Fill factor (%).
    pub ff: f64,
    /// Power conversion efficiency (%), assuming 1000 W m⁻² irradiance.
    pub pce: f64,
}

impl CellParameters {
    /// True when FF is undefined because Jsc or Voc is zero.
    pub fn is_degenerate(&self) -> bool {
        self.jsc == 0.0 || self.voc == 0.0
    }
}
