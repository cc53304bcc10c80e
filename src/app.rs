//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - installs the log subscriber
//! - runs the analysis pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{AnalyzeArgs, Command, PlotArgs, SampleArgs};
use crate::data::{SampleConfig, generate_sample, write_sample_csv};
use crate::domain::{AnalysisConfig, ColumnNames};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `psm` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    init_logging(cli.verbose);

    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::Plot(args) => handle_plot(args),
        Command::Sample(args) => handle_sample(args),
    }
}

/// Logs go to stderr so stdout stays a clean report.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = analysis_config_from_args(&args);
    let run = pipeline::run_analysis(&config)?;

    println!("{}", crate::report::format_run_summary(&run, &config));

    if config.show_rates {
        println!("{}", crate::report::format_rate_table(&run.buckets));
    }

    print!("{}", crate::report::format_price_points(&run.analysis, &config.currency));

    if config.plot {
        let plot = crate::plot::render_ascii_plot(&run.buckets, &run.analysis, config.plot_width, config.plot_height);
        println!();
        print!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &config.export_rates {
        crate::io::export::write_rates_csv(path, &run.buckets)?;
        info!(path = %path.display(), "wrote rate table");
    }
    if let Some(path) = &config.export_json {
        crate::io::results::write_results_json(path, &run, Some(&config.csv_path))?;
        info!(path = %path.display(), "wrote results");
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let results = crate::io::results::read_results_json(&args.results)?;
    let plot = crate::plot::render_ascii_plot_from_results(&results, args.width, args.height);
    print!("{plot}");
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = SampleConfig {
        count: args.count,
        seed: args.seed,
        center: args.center,
        spread: args.spread,
    };
    let respondents = generate_sample(&config)?;
    write_sample_csv(&args.out, &respondents, &ColumnNames::default())?;
    println!("Wrote {} respondents to {}", respondents.len(), args.out.display());
    Ok(())
}

pub fn analysis_config_from_args(args: &AnalyzeArgs) -> AnalysisConfig {
    let defaults = ColumnNames::default();
    AnalysisConfig {
        csv_path: args.csvfile.clone(),
        step: args.step,
        nan_policy: args.nan_policy,
        columns: ColumnNames {
            too_cheap: args.col_too_cheap.clone().unwrap_or(defaults.too_cheap),
            too_expensive: args.col_too_expensive.clone().unwrap_or(defaults.too_expensive),
            cheap: args.col_cheap.clone().unwrap_or(defaults.cheap),
            expensive: args.col_expensive.clone().unwrap_or(defaults.expensive),
        },
        currency: args.currency.clone(),
        show_rates: args.rates,
        plot: args.plot,
        plot_width: args.width,
        plot_height: args.height,
        export_rates: args.export_rates.clone(),
        export_json: args.export_json.clone(),
    }
}

/// Rewrite argv so `psm --csvfile x.csv` means `psm analyze --csvfile x.csv`.
///
/// Only the first token after the global `-v/--verbose` flags is inspected, so
/// flag values that happen to be subcommand names are left alone.
///
/// Rules:
/// - `psm [-v] <subcommand> ...`        -> unchanged
/// - `psm --help/--version/-h/-V/help` -> unchanged (top-level help/version)
/// - `psm [-v]`                         -> unchanged
/// - any other flag in that position    -> `analyze` inserted before it
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let pos = argv
        .iter()
        .skip(1)
        .position(|a| !matches!(a.as_str(), "-v" | "--verbose"))
        .map(|i| i + 1);
    let Some(pos) = pos else {
        return argv;
    };

    let first = argv[pos].as_str();
    let is_help_version_or_subcommand = matches!(
        first,
        "-h" | "--help" | "-V" | "--version" | "help" | "analyze" | "plot" | "sample"
    );
    if is_help_version_or_subcommand {
        return argv;
    }

    if first.starts_with('-') {
        argv.insert(pos, "analyze".to_string());
    }
    argv
}
