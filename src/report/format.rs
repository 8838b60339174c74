//! Fixed-point presentation of cell parameters and report text assembly.
//!
//! Pure formatting: no numeric recomputation happens here. The unrounded
//! floats stay available on `CellParameters` for programmatic consumers.

use serde::Serialize;

use crate::domain::{CellParameters, NormalizedSweep};

/// Shown in place of all four metrics for dark scans.
pub const PLACEHOLDER: &str = "----";

/// The four metrics as presentation strings.
///
/// Rounding convention: Voc to 0 decimals, Jsc to 2, FF to 0, PCE to 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedParameters {
    pub voc: String,
    pub jsc: String,
    pub ff: String,
    pub pce: String,
}

impl FormattedParameters {
    /// Dark-scan test, keyed off the *rounded display string* of PCE.
    ///
    /// A PCE of 0.0049 also displays as "0.00" and counts as dark; a
    /// slightly negative PCE displays as "-0.00" and does not. This is the
    /// intended trigger, not a numeric threshold.
    pub fn is_dark(&self) -> bool {
        self.pce == "0.00"
    }

    /// The values for the 4-field metrics table: the formatted figures, or
    /// the placeholder row for dark scans.
    pub fn table_values(&self) -> [&str; 4] {
        if self.is_dark() {
            [PLACEHOLDER; 4]
        } else {
            [&self.voc, &self.jsc, &self.ff, &self.pce]
        }
    }
}

/// Round the four metrics into presentation strings.
pub fn format_parameters(params: &CellParameters) -> FormattedParameters {
    FormattedParameters {
        voc: format!("{:.0}", params.voc),
        jsc: format!("{:.2}", params.jsc),
        ff: format!("{:.0}", params.ff),
        pce: format!("{:.2}", params.pce),
    }
}

/// Build the text report for one analysed file.
///
/// Layout: a `Main cell parameters:` block followed by the normalized data
/// points as a tab-separated table ready to be plotted elsewhere.
pub fn format_report(sweep: &NormalizedSweep, formatted: &FormattedParameters) -> String {
    let [voc, jsc, ff, pce] = formatted.table_values();

    let mut out = String::new();
    out.push_str("Main cell parameters:\n");
    out.push_str(&format!("Voc (mV): {voc}\n"));
    out.push_str(&format!("Jsc (mA cm-2): {jsc}\n"));
    out.push_str(&format!("FF (%): {ff}\n"));
    out.push_str(&format!("PCE (%): {pce}\n"));
    out.push('\n');
    out.push_str("List of JV data points:\n");
    out.push_str("V (mV)\tJ (mA cm-2)\n");
    for p in sweep.points() {
        out.push_str(&format!("{}\t{}\n", p.voltage, p.current));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SweepPoint;

    #[test]
    fn rounding_per_field() {
        let params = CellParameters { voc: 150.0, jsc: 4.8, ff: 27.7778, pce: 0.2 };
        let f = format_parameters(&params);
        assert_eq!(f.voc, "150");
        assert_eq!(f.jsc, "4.80");
        assert_eq!(f.ff, "28");
        assert_eq!(f.pce, "0.20");
        assert!(!f.is_dark());
        assert_eq!(f.table_values(), ["150", "4.80", "28", "0.20"]);
    }

    #[test]
    fn dark_scan_triggers_on_rounded_string() {
        // Exactly zero power.
        let zero = format_parameters(&CellParameters { voc: 0.0, jsc: 0.0, ff: f64::NAN, pce: 0.0 });
        assert!(zero.is_dark());
        assert_eq!(zero.table_values(), [PLACEHOLDER; 4]);

        // Rounds to "0.00" without being zero: still dark.
        let tiny = format_parameters(&CellParameters { voc: 12.0, jsc: 0.4, ff: 10.0, pce: 0.0049 });
        assert_eq!(tiny.pce, "0.00");
        assert!(tiny.is_dark());

        // Slightly negative power formats as "-0.00": not dark.
        let neg = format_parameters(&CellParameters { voc: 12.0, jsc: 0.4, ff: -8.0, pce: -0.004 });
        assert_eq!(neg.pce, "-0.00");
        assert!(!neg.is_dark());
    }

    #[test]
    fn report_layout() {
        let sweep = NormalizedSweep::new(vec![
            SweepPoint::new(0.0, 4.8),
            SweepPoint::new(150.0, 0.0),
        ]);
        let params = CellParameters { voc: 150.0, jsc: 4.8, ff: 27.7778, pce: 0.2 };
        let text = format_report(&sweep, &format_parameters(&params));

        let expected = "Main cell parameters:\n\
                        Voc (mV): 150\n\
                        Jsc (mA cm-2): 4.80\n\
                        FF (%): 28\n\
                        PCE (%): 0.20\n\
                        \n\
                        List of JV data points:\n\
                        V (mV)\tJ (mA cm-2)\n\
                        0\t4.8\n\
                        150\t0\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn dark_report_shows_placeholder_block() {
        let sweep = NormalizedSweep::new(vec![
            SweepPoint::new(0.0, 0.0),
            SweepPoint::new(150.0, 0.0),
        ]);
        let params = CellParameters { voc: 0.0, jsc: 0.0, ff: f64::NAN, pce: 0.0 };
        let text = format_report(&sweep, &format_parameters(&params));
        assert!(text.contains("Voc (mV): ----\n"));
        assert!(text.contains("PCE (%): ----\n"));
        assert!(!text.contains("NaN"));
    }
}
