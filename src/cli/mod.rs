//! Command-line parsing for the price sensitivity meter.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! analysis code. Flags map onto `AnalysisConfig` in `app`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{DEFAULT_PRICE_STEP, NanPolicy};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "psm", version, about = "Van Westendorp Price Sensitivity Meter")]
pub struct Cli {
    /// Log debug details to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a survey CSV and print the four price points.
    Analyze(AnalyzeArgs),
    /// Plot the rate curves from a saved results JSON.
    Plot(PlotArgs),
    /// Write a synthetic survey CSV.
    Sample(SampleArgs),
}

/// Options for analyzing a survey.
#[derive(Debug, Parser, Clone)]
pub struct AnalyzeArgs {
    /// Survey CSV with one row per respondent.
    #[arg(long, value_name = "FILE", env = "PSM_CSVFILE")]
    pub csvfile: PathBuf,

    /// Spacing between candidate prices on the grid.
    #[arg(long, default_value_t = DEFAULT_PRICE_STEP)]
    pub step: f64,

    /// What to do with price fields that are not numbers.
    #[arg(long, value_enum, default_value_t = NanPolicy::Skip)]
    pub nan_policy: NanPolicy,

    /// Header of the "too cheap" column (default: 安すぎる).
    #[arg(long)]
    pub col_too_cheap: Option<String>,

    /// Header of the "too expensive" column (default: 高すぎる).
    #[arg(long)]
    pub col_too_expensive: Option<String>,

    /// Header of the "cheap" column (default: 安い).
    #[arg(long)]
    pub col_cheap: Option<String>,

    /// Header of the "expensive" column (default: 高い).
    #[arg(long)]
    pub col_expensive: Option<String>,

    /// Currency label printed after each price.
    #[arg(long, default_value = "円", env = "PSM_CURRENCY")]
    pub currency: String,

    /// Print the full rate table.
    #[arg(long)]
    pub rates: bool,

    /// Render an ASCII plot of the rate curves.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 15)]
    pub height: usize,

    /// Export the rate table to CSV.
    #[arg(long = "export-rates", value_name = "CSV")]
    pub export_rates: Option<PathBuf>,

    /// Export the full results (buckets + price points) to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

/// Options for plotting saved results.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Results JSON produced by `psm analyze --export-json`.
    #[arg(long, value_name = "JSON")]
    pub results: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 15)]
    pub height: usize,
}

/// Options for generating a synthetic survey.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Output CSV path.
    #[arg(long, value_name = "CSV")]
    pub out: PathBuf,

    /// Number of respondents.
    #[arg(short = 'n', long, default_value_t = 200)]
    pub count: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Median reference price.
    #[arg(long, default_value_t = 1_000.0)]
    pub center: f64,

    /// Standard deviation of the log reference price.
    #[arg(long, default_value_t = 0.25)]
    pub spread: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_defaults() {
        let cli = Cli::try_parse_from(["psm", "analyze", "--csvfile", "survey.csv"]).unwrap();
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.csvfile, PathBuf::from("survey.csv"));
        assert_eq!(args.step, 50.0);
        assert_eq!(args.nan_policy, NanPolicy::Skip);
        assert!(!args.plot && !args.rates);
        assert!(!cli.verbose);
    }

    #[test]
    fn analyze_flags() {
        let cli = Cli::try_parse_from([
            "psm", "-v", "analyze", "--csvfile", "s.csv", "--step", "100", "--nan-policy", "reject",
            "--col-cheap", "cheap_q", "--export-json", "out.json",
        ])
        .unwrap();
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert!(cli.verbose);
        assert_eq!(args.step, 100.0);
        assert_eq!(args.nan_policy, NanPolicy::Reject);
        assert_eq!(args.col_cheap.as_deref(), Some("cheap_q"));
        assert_eq!(args.export_json, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn sample_requires_output() {
        assert!(Cli::try_parse_from(["psm", "sample"]).is_err());
        let cli = Cli::try_parse_from(["psm", "sample", "--out", "s.csv", "-n", "10"]).unwrap();
        let Command::Sample(args) = cli.command else {
            panic!("expected sample");
        };
        assert_eq!(args.count, 10);
        assert_eq!(args.seed, 42);
    }
}
