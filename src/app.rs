//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the instrument-format configuration
//! - enumerates the sweep files in the input directory
//! - fans the per-file pipeline out over a worker pool
//! - prints the terminal summary and decides the batch error policy

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use rayon::prelude::*;

use crate::cli::Cli;
use crate::config::AnalysisConfig;
use crate::error::AppError;

pub mod pipeline;

use pipeline::{FileOutput, OutputOptions};

/// Entry point for the `jv` binary.
pub fn run() -> Result<(), AppError> {
    run_with(Cli::parse())
}

fn run_with(cli: Cli) -> Result<(), AppError> {
    let config = AnalysisConfig::load(&cli.config)?;

    let files = collect_input_files(&cli.path, config.format.as_deref())?;
    if files.is_empty() {
        println!("No matching files in '{}'.", cli.path.display());
        return Ok(());
    }

    let output_dir = cli.path.join(&cli.output);
    fs::create_dir_all(&output_dir).map_err(|e| {
        AppError::output(format!(
            "Failed to create output directory '{}': {e}",
            output_dir.display()
        ))
    })?;

    println!(
        "Analysing {} file(s) from '{}'.",
        files.len(),
        cli.path.display()
    );

    let options = OutputOptions {
        plot: !cli.no_plot,
        json: cli.json,
    };

    // Every file is an independent unit of work with no shared mutable
    // state, so the batch parallelizes trivially. Results are collected and
    // reported in input order to keep the summary deterministic.
    let results: Vec<(PathBuf, Result<FileOutput, AppError>)> = if cli.jobs > 0 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(cli.jobs)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build worker pool: {e}")))?;
        pool.install(|| process_all(&files, &output_dir, &config, options))
    } else {
        process_all(&files, &output_dir, &config, options)
    };

    let mut processed = 0usize;
    let mut skipped = 0usize;
    for (path, result) in &results {
        match result {
            Ok(output) => {
                processed += 1;
                print_file_summary(output);
            }
            // A configuration fault affects every file the same way; stop
            // instead of repeating the diagnostic per file.
            Err(e) if e.is_fatal() => return Err(e.clone()),
            Err(e) => {
                skipped += 1;
                eprintln!("Skipping '{}': {e}", path.display());
            }
        }
    }

    println!(
        "Processed {processed} file(s), skipped {skipped}; output in '{}'.",
        output_dir.display()
    );
    Ok(())
}

fn process_all(
    files: &[PathBuf],
    output_dir: &Path,
    config: &AnalysisConfig,
    options: OutputOptions,
) -> Vec<(PathBuf, Result<FileOutput, AppError>)> {
    files
        .par_iter()
        .map(|path| {
            (
                path.clone(),
                pipeline::process_file(path, output_dir, config, options),
            )
        })
        .collect()
}

fn print_file_summary(output: &FileOutput) {
    if output.dark {
        println!("{}: dark scan, parameters withheld", output.file_name);
    } else {
        let f = &output.formatted;
        println!(
            "{}: Voc = {} mV | Jsc = {} mA cm-2 | FF = {} % | PCE = {} %",
            output.file_name, f.voc, f.jsc, f.ff, f.pce
        );
    }
}

/// Enumerate the analysable files in `dir`, honoring the configured
/// extension filter. Subdirectories (including a previous run's output
/// folder) are skipped. The list is sorted for deterministic reporting.
fn collect_input_files(dir: &Path, format: Option<&str>) -> Result<Vec<PathBuf>, AppError> {
    if !dir.is_dir() {
        return Err(AppError::config(format!(
            "'{}' is not a directory. Make sure you have not provided a file name \
             and that the directory exists.",
            dir.display()
        )));
    }

    let entries = fs::read_dir(dir).map_err(|e| {
        AppError::config(format!("Failed to read directory '{}': {e}", dir.display()))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            AppError::config(format!("Failed to read directory '{}': {e}", dir.display()))
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name();
        if matches_format(&name.to_string_lossy(), format) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Extension filter: an absent or empty `format` accepts every file (some
/// instruments write extensionless exports).
fn matches_format(file_name: &str, format: Option<&str>) -> bool {
    match format {
        Some(ext) if !ext.is_empty() => file_name.ends_with(ext),
        _ => true,
    }
}
