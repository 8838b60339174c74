//! Command-line parsing for the J-V sweep analyser.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! analysis code: everything here is declarative clap derive, and the real
//! work happens in `app`.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI.
///
/// Processes solar-simulator output files from a directory: for each sweep
/// file it derives Voc, Jsc, FF and PCE, renders an SVG of the J-V curve
/// and writes a tab-separated list of normalized data points. All artifacts
/// land in a subfolder inside the input directory.
#[derive(Debug, Parser)]
#[command(
    name = "jv",
    version,
    about = "J-V sweep analyser for solar-simulator output files",
    after_help = "Remember to describe your instrument's file format in the \
                  configuration file (see --config)."
)]
pub struct Cli {
    /// Directory containing the J-V sweep files to analyse.
    #[arg(value_name = "DIR")]
    pub path: PathBuf,

    /// TOML configuration describing the instrument file format.
    #[arg(short, long, value_name = "FILE", default_value = "jv.toml")]
    pub config: PathBuf,

    /// Name of the output subdirectory created inside DIR.
    #[arg(long, value_name = "NAME", default_value = "processed")]
    pub output: String,

    /// Skip the SVG plot artifact.
    #[arg(long)]
    pub no_plot: bool,

    /// Also write a machine-readable JSON report per file.
    #[arg(long)]
    pub json: bool,

    /// Worker threads for file processing (0 = one per core).
    #[arg(long, default_value_t = 0)]
    pub jobs: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_invocation() {
        let cli = Cli::parse_from(["jv", "measurements"]);
        assert_eq!(cli.path, PathBuf::from("measurements"));
        assert_eq!(cli.config, PathBuf::from("jv.toml"));
        assert_eq!(cli.output, "processed");
        assert!(!cli.no_plot);
        assert!(!cli.json);
        assert_eq!(cli.jobs, 0);
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::parse_from([
            "jv",
            "data",
            "--config",
            "formats/wavelabs.toml",
            "--output",
            "out",
            "--no-plot",
            "--json",
            "--jobs",
            "4",
        ]);
        assert_eq!(cli.config, PathBuf::from("formats/wavelabs.toml"));
        assert_eq!(cli.output, "out");
        assert!(cli.no_plot);
        assert!(cli.json);
        assert_eq!(cli.jobs, 4);
    }
}
