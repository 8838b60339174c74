//! SVG plot rendering for analysed sweeps.
//!
//! One chart per input file: the normalized J-V curve against axes crossing
//! at the origin, captioned with the file name, with the 4-field metrics
//! table (or the dark-scan placeholder row) in a strip underneath.
//!
//! SVG keeps the artifact self-contained: no raster fonts, no native
//! dependencies, and the output diffs cleanly in version control.

use std::path::Path;

use plotters::prelude::*;

use crate::domain::NormalizedSweep;
use crate::error::AppError;
use crate::report::FormattedParameters;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 500;
/// Vertical split between the chart and the metrics strip.
const CHART_HEIGHT: i32 = 400;

/// Render the per-file chart artifact.
pub fn write_plot_svg(
    path: &Path,
    title: &str,
    sweep: &NormalizedSweep,
    formatted: &FormattedParameters,
) -> Result<(), AppError> {
    let (v_lo, v_hi) = padded_range(sweep.points().iter().map(|p| p.voltage));
    let (c_lo, c_hi) = padded_range(sweep.points().iter().map(|p| p.current));

    let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| render_error(path, e))?;

    let (chart_strip, table_strip) = root.split_vertically(CHART_HEIGHT);

    let mut chart = ChartBuilder::on(&chart_strip)
        .caption(title, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(56)
        .build_cartesian_2d(v_lo..v_hi, c_lo..c_hi)
        .map_err(|e| render_error(path, e))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Voltage (mV)")
        .y_desc("Current density (mA cm-2)")
        .draw()
        .map_err(|e| render_error(path, e))?;

    // Axis lines through the origin; the padded ranges always contain it.
    chart
        .draw_series(LineSeries::new([(v_lo, 0.0), (v_hi, 0.0)], &BLACK))
        .map_err(|e| render_error(path, e))?;
    chart
        .draw_series(LineSeries::new([(0.0, c_lo), (0.0, c_hi)], &BLACK))
        .map_err(|e| render_error(path, e))?;

    chart
        .draw_series(LineSeries::new(
            sweep.points().iter().map(|p| (p.voltage, p.current)),
            &BLUE,
        ))
        .map_err(|e| render_error(path, e))?;

    const HEADERS: [&str; 4] = ["Voc (mV)", "Jsc (mA cm-2)", "FF (%)", "PCE (%)"];
    let values = formatted.table_values();
    let column_width = WIDTH as i32 / 4;
    for (i, (header, value)) in HEADERS.iter().zip(values.iter()).enumerate() {
        let x = column_width / 4 + i as i32 * column_width;
        table_strip
            .draw(&Text::new(
                header.to_string(),
                (x, 20),
                ("sans-serif", 16).into_font().color(&BLACK),
            ))
            .map_err(|e| render_error(path, e))?;
        table_strip
            .draw(&Text::new(
                value.to_string(),
                (x, 50),
                ("sans-serif", 18).into_font().color(&BLACK),
            ))
            .map_err(|e| render_error(path, e))?;
    }

    root.present().map_err(|e| render_error(path, e))
}

fn render_error(path: &Path, e: impl std::fmt::Display) -> AppError {
    AppError::output(format!("Failed to render plot '{}': {e}", path.display()))
}

/// Axis range for a set of samples: always contains the origin, padded by
/// 5% so the curve does not touch the frame. Collapsed ranges fall back to
/// a unit span.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (mut lo, mut hi) = (0.0_f64, 0.0_f64);
    for v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    let span = hi - lo;
    if span <= 0.0 {
        return (lo - 1.0, hi + 1.0);
    }
    let pad = span * 0.05;
    (lo - pad, hi + pad)
}
