//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw and normalized sweeps (`Sweep`, `NormalizedSweep`)
//! - recording conventions (`Quadrant`, `UnitConversion`, `ScanDirection`)
//! - extracted figures of merit (`CellParameters`)

pub mod types;

pub use types::*;
