//! Quadrant and unit normalization of raw sweeps.
//!
//! Solar simulators record I-V curves under varying sign conventions and
//! units of measure. This module maps a raw sweep into the canonical form
//! the extractor works on: quadrant 1, voltage in mV, current in mA cm⁻².
//!
//! The operation order is fixed and significant:
//!
//! 1. quadrant fix (sign flips)
//! 2. raw current -> current density (divide by cell area)
//! 3. power-of-ten unit scaling
//!
//! Reordering changes results whenever a quadrant flip interacts with the
//! area normalization.

use crate::domain::{NormalizedSweep, Quadrant, Sweep, UnitConversion};
use crate::error::AppError;

/// Normalize a raw sweep into quadrant-1, mV / mA cm⁻² form.
///
/// `quadrant` is the raw configured number; it is validated here (not at
/// config-load time) and anything outside 1..=4 fails with a fatal
/// configuration error. When `current_is_density` is true the instrument
/// already reports a current density and the area division is skipped.
///
/// The sweep is consumed: the caller cannot accidentally keep using the
/// pre-normalization samples.
pub fn normalize(
    sweep: Sweep,
    quadrant: i64,
    conversion: &UnitConversion,
    current_is_density: bool,
) -> Result<NormalizedSweep, AppError> {
    let quadrant = Quadrant::from_config(quadrant)?;
    let mut points = sweep.into_points();

    match quadrant {
        Quadrant::One => {}
        Quadrant::Two => {
            for p in &mut points {
                p.voltage = -p.voltage;
            }
        }
        Quadrant::Three => {
            for p in &mut points {
                p.voltage = -p.voltage;
                p.current = -p.current;
            }
        }
        Quadrant::Four => {
            for p in &mut points {
                p.current = -p.current;
            }
        }
    }

    if !current_is_density {
        for p in &mut points {
            p.current /= conversion.cell_area;
        }
    }

    // Zero exponents skip the multiplication entirely, so an identity
    // conversion cannot introduce floating-point drift.
    if conversion.current_exponent != 0 || conversion.area_exponent != 0 {
        let scale = 10f64.powi(conversion.current_exponent) * 10f64.powi(-conversion.area_exponent);
        for p in &mut points {
            p.current *= scale;
        }
    }
    if conversion.voltage_exponent != 0 {
        let scale = 10f64.powi(conversion.voltage_exponent);
        for p in &mut points {
            p.voltage *= scale;
        }
    }

    Ok(NormalizedSweep::new(points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SweepPoint;

    fn sweep(pairs: &[(f64, f64)]) -> Sweep {
        Sweep::from_points(pairs.iter().map(|&(v, c)| SweepPoint::new(v, c)).collect()).unwrap()
    }

    fn pairs(normalized: &NormalizedSweep) -> Vec<(f64, f64)> {
        normalized.points().iter().map(|p| (p.voltage, p.current)).collect()
    }

    #[test]
    fn identity_when_quadrant_one_density_and_zero_exponents() {
        let raw = [(-50.0, 5.0), (0.0, 4.8), (100.0, 2.0)];
        let out = normalize(sweep(&raw), 1, &UnitConversion::identity(), true).unwrap();
        assert_eq!(pairs(&out), raw.to_vec());
    }

    #[test]
    fn quadrant_two_negates_voltage() {
        let out = normalize(sweep(&[(-10.0, 1.0), (-20.0, 2.0)]), 2, &UnitConversion::identity(), true)
            .unwrap();
        assert_eq!(pairs(&out), vec![(10.0, 1.0), (20.0, 2.0)]);
    }

    #[test]
    fn quadrant_three_negates_both_axes() {
        let raw = [(-10.0, -1.0), (-20.0, -2.0)];
        let out = normalize(sweep(&raw), 3, &UnitConversion::identity(), true).unwrap();
        assert_eq!(pairs(&out), vec![(10.0, 1.0), (20.0, 2.0)]);

        // Involution: negating both axes again returns the original sweep.
        let back: Vec<(f64, f64)> = pairs(&out).iter().map(|&(v, c)| (-v, -c)).collect();
        assert_eq!(back, raw.to_vec());
    }

    #[test]
    fn quadrant_four_negates_current() {
        let out = normalize(sweep(&[(10.0, -1.0), (20.0, -2.0)]), 4, &UnitConversion::identity(), true)
            .unwrap();
        assert_eq!(pairs(&out), vec![(10.0, 1.0), (20.0, 2.0)]);
    }

    #[test]
    fn invalid_quadrant_is_a_fatal_config_error() {
        let err = normalize(sweep(&[(0.0, 1.0), (1.0, 0.0)]), 5, &UnitConversion::identity(), true)
            .unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn raw_current_is_divided_by_cell_area() {
        let conversion = UnitConversion { cell_area: 0.25, ..UnitConversion::identity() };
        let out = normalize(sweep(&[(0.0, 1.0), (100.0, 0.5)]), 1, &conversion, false).unwrap();
        assert_eq!(pairs(&out), vec![(0.0, 4.0), (100.0, 2.0)]);
    }

    #[test]
    fn unit_exponents_scale_each_axis() {
        // Volts -> mV and A cm⁻² -> mA cm⁻².
        let conversion = UnitConversion {
            cell_area: 1.0,
            current_exponent: 3,
            area_exponent: 0,
            voltage_exponent: 3,
        };
        let out = normalize(sweep(&[(0.5, 0.002), (0.6, 0.001)]), 1, &conversion, true).unwrap();
        let got = pairs(&out);
        assert!((got[0].0 - 500.0).abs() < 1e-9);
        assert!((got[0].1 - 2.0).abs() < 1e-9);
        assert!((got[1].0 - 600.0).abs() < 1e-9);
        assert!((got[1].1 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn area_exponent_scales_inversely() {
        // Current per mm² -> per cm²: area exponent -2 multiplies by 10².
        let conversion = UnitConversion { area_exponent: -2, ..UnitConversion::identity() };
        let out = normalize(sweep(&[(0.0, 0.05), (100.0, 0.01)]), 1, &conversion, true).unwrap();
        let got = pairs(&out);
        assert!((got[0].1 - 5.0).abs() < 1e-12);
        assert!((got[1].1 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn quadrant_fix_runs_before_area_division() {
        // A quadrant-4 sweep with a raw current: the flip happens first,
        // then the division, so the result is positive.
        let conversion = UnitConversion { cell_area: 2.0, ..UnitConversion::identity() };
        let out = normalize(sweep(&[(0.0, -4.0), (100.0, -2.0)]), 4, &conversion, false).unwrap();
        assert_eq!(pairs(&out), vec![(0.0, 2.0), (100.0, 1.0)]);
    }
}
