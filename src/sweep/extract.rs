//! Figure-of-merit extraction from a normalized sweep.
//!
//! Jsc and Voc come from linear interpolation over the sampled curve; the
//! maximum power point is a direct maximum over the discrete samples, with
//! no optimization between them. The scan direction decides which way the
//! sample arrays have to be read so the interpolation x-axis is increasing.

use crate::domain::{CellParameters, NormalizedSweep, ScanDirection, SweepPoint};
use crate::math::lerp_at;

/// Irradiance assumed for the efficiency figure, in W m⁻².
///
/// Reading the actual irradiance from the measurement file is a non-goal;
/// full-sun conditions are assumed.
const IRRADIANCE_W_M2: f64 = 1000.0;

/// Extract Voc, Jsc, FF and PCE from a normalized sweep.
///
/// Never fails and never panics: a dark or degenerate sweep (Jsc or Voc
/// zero) yields a non-finite FF, which the presentation layer turns into
/// the placeholder table.
pub fn extract(sweep: &NormalizedSweep) -> CellParameters {
    let points = sweep.points();
    let direction = sweep.scan_direction();

    // Jsc: prefer a directly measured V=0 sample (first match wins) over
    // interpolating; the interpolation would return the same value but a
    // lookup is cheaper and keeps the measured bits untouched.
    let jsc = match points.iter().position(|p| p.voltage == 0.0) {
        Some(idx) => points[idx].current,
        None => {
            let (xs, ys) = axis_arrays(points, direction == ScanDirection::Reverse, |p| {
                (p.voltage, p.current)
            });
            lerp_at(0.0, &xs, &ys)
        }
    };

    // Voc: interpolate voltage as a function of current at C=0. A forward
    // scan runs current from Jsc down through zero, so the current axis
    // decreases and both arrays are reversed first; a reverse scan already
    // has it increasing.
    let (xs, ys) = axis_arrays(points, direction == ScanDirection::Forward, |p| {
        (p.current, p.voltage)
    });
    let voc = lerp_at(0.0, &xs, &ys);

    let wmax = points
        .iter()
        .map(|p| p.voltage * p.current)
        .fold(f64::NEG_INFINITY, f64::max);

    let ff = 100.0 * wmax / (jsc * voc);
    let pce = wmax / IRRADIANCE_W_M2;

    CellParameters { voc, jsc, ff, pce }
}

/// Project the sweep onto an (x, y) axis pair, optionally reading it back
/// to front so x ends up increasing. The stored sweep order is untouched.
fn axis_arrays(
    points: &[SweepPoint],
    reversed: bool,
    project: impl Fn(&SweepPoint) -> (f64, f64),
) -> (Vec<f64>, Vec<f64>) {
    if reversed {
        points.iter().rev().map(project).unzip()
    } else {
        points.iter().map(project).unzip()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(pairs: &[(f64, f64)]) -> NormalizedSweep {
        NormalizedSweep::new(pairs.iter().map(|&(v, c)| SweepPoint::new(v, c)).collect())
    }

    const FORWARD_SWEEP: [(f64, f64); 6] = [
        (-50.0, 5.0),
        (0.0, 4.8),
        (50.0, 4.0),
        (100.0, 2.0),
        (150.0, 0.0),
        (200.0, -3.0),
    ];

    #[test]
    fn forward_sweep_worked_example() {
        let params = extract(&normalized(&FORWARD_SWEEP));

        // V=0 is a measured sample, so Jsc is taken directly.
        assert_eq!(params.jsc, 4.8);
        // C=0 is a measured sample, so Voc comes back exactly.
        assert_eq!(params.voc, 150.0);
        // Wmax over the discrete products is 200 (at 50 mV and again at 100 mV).
        assert!((params.ff - 100.0 * 200.0 / (4.8 * 150.0)).abs() < 1e-12);
        assert!((params.pce - 0.2).abs() < 1e-12);
    }

    #[test]
    fn reverse_sweep_matches_forward() {
        let mut reversed = FORWARD_SWEEP;
        reversed.reverse();

        let fwd = extract(&normalized(&FORWARD_SWEEP));
        let rev = extract(&normalized(&reversed));

        assert_eq!(fwd.jsc, rev.jsc);
        assert_eq!(fwd.voc, rev.voc);
        assert_eq!(fwd.ff, rev.ff);
        assert_eq!(fwd.pce, rev.pce);
    }

    #[test]
    fn jsc_interpolated_when_no_zero_voltage_sample() {
        let params = extract(&normalized(&[(-10.0, 5.0), (10.0, 3.0), (20.0, 1.0)]));
        assert!((params.jsc - 4.0).abs() < 1e-12);
    }

    #[test]
    fn jsc_first_zero_voltage_sample_wins() {
        let params = extract(&normalized(&[(-10.0, 5.0), (0.0, 4.5), (0.0, 4.4), (10.0, 3.0)]));
        assert_eq!(params.jsc, 4.5);
    }

    #[test]
    fn voc_interpolated_between_samples() {
        let params = extract(&normalized(&[(0.0, 4.0), (100.0, 2.0), (150.0, -2.0)]));
        // Zero crossing halfway between 100 and 150 mV.
        assert!((params.voc - 125.0).abs() < 1e-12);
    }

    #[test]
    fn dark_sweep_yields_non_finite_ff_without_panicking() {
        let params = extract(&normalized(&[(-50.0, 0.0), (0.0, 0.0), (50.0, 0.0), (100.0, 0.0)]));
        assert_eq!(params.jsc, 0.0);
        assert_eq!(params.pce, 0.0);
        assert!(params.is_degenerate());
        assert!(!params.ff.is_finite());
    }

    #[test]
    fn always_negative_current_does_not_panic() {
        let params = extract(&normalized(&[(0.0, -1.0), (50.0, -2.0), (100.0, -3.0)]));
        assert!(params.jsc <= 0.0);
        assert!(params.pce.is_finite());
    }

    #[test]
    fn ff_and_pce_finite_and_positive_for_illuminated_sweep() {
        let params = extract(&normalized(&[(-20.0, 21.0), (0.0, 20.0), (400.0, 10.0), (500.0, -5.0)]));
        assert!(params.jsc > 0.0);
        assert!(params.voc > 0.0);
        assert!(params.ff.is_finite() && params.ff > 0.0);
        assert!(params.pce.is_finite() && params.pce > 0.0);
    }
}
