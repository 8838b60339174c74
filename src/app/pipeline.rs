//! Shared per-file pipeline logic.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> normalize -> extract -> format -> write artifacts
//!
//! The orchestration in `app` only decides *which* files run and how the
//! batch reacts to failures.

use std::path::Path;

use crate::config::AnalysisConfig;
use crate::domain::CellParameters;
use crate::error::AppError;
use crate::io::JsonReport;
use crate::report::FormattedParameters;

/// Which artifacts to write per analysed file. The text report is always
/// written.
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub plot: bool,
    pub json: bool,
}

/// Computed results for one input file, for the terminal summary.
#[derive(Debug, Clone)]
pub struct FileOutput {
    pub file_name: String,
    pub parameters: CellParameters,
    pub formatted: FormattedParameters,
    pub dark: bool,
}

/// Analyse one sweep file and write its artifacts into `output_dir`.
pub fn process_file(
    path: &Path,
    output_dir: &Path,
    config: &AnalysisConfig,
    options: OutputOptions,
) -> Result<FileOutput, AppError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let sweep = crate::io::read_sweep(path, config)?;
    let normalized = crate::sweep::normalize(
        sweep,
        config.quadrant,
        &config.unit_conversion(),
        config.current_is_density,
    )?;
    let parameters = crate::sweep::extract(&normalized);
    let formatted = crate::report::format_parameters(&parameters);
    let dark = formatted.is_dark();

    let stem = output_stem(&file_name, config.format.as_deref());

    let text = crate::report::format_report(&normalized, &formatted);
    crate::io::write_report_text(&output_dir.join(format!("{stem}.txt")), &text)?;

    if options.plot {
        crate::plot::write_plot_svg(
            &output_dir.join(format!("{stem}.svg")),
            &stem,
            &normalized,
            &formatted,
        )?;
    }

    if options.json {
        let report = JsonReport {
            source: &file_name,
            sweep: &normalized,
            parameters: &parameters,
            formatted: &formatted,
            dark,
        };
        crate::io::write_report_json(&output_dir.join(format!("{stem}.json")), &report)?;
    }

    Ok(FileOutput {
        file_name,
        parameters,
        formatted,
        dark,
    })
}

/// Strip the configured extension from the input file name so outputs pair
/// up with inputs (`a1.liv` -> `a1.txt`, `a1.svg`).
fn output_stem(file_name: &str, format: Option<&str>) -> String {
    match format {
        Some(ext) if !ext.is_empty() && file_name.len() > ext.len() && file_name.ends_with(ext) => {
            file_name[..file_name.len() - ext.len()].to_string()
        }
        _ => file_name.to_string(),
    }
}
