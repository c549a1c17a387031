use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use dwi_gradcheck::data::matcher::{DEFAULT_B_TOLERANCE, DEFAULT_DOT_THRESHOLD};
use dwi_gradcheck::report::{OutputFormat, write_report};
use dwi_gradcheck::{GradientReport, MatchTolerance, load_file};

/// Check that both halves of a DWI gradient table use the same scheme
#[derive(Parser, Debug)]
#[command(name = "dwi-gradcheck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Gradient table (MRtrix text, .csv or .json)
    #[arg(default_value = "grad")]
    path: PathBuf,

    /// Minimum |dot product| for two directions to match
    #[arg(long, default_value_t = DEFAULT_DOT_THRESHOLD)]
    dot_threshold: f64,

    /// Maximum b-value difference for two volumes to match
    #[arg(long, default_value_t = DEFAULT_B_TOLERANCE)]
    b_tolerance: f64,

    /// Rescale directions to unit length before comparing
    #[arg(long)]
    normalize: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Exit with status 1 if any pair does not match
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_target(false)
        .init();
}

/// Load, compare and print. Mismatched pairs only fail the run under `--strict`.
fn run(cli: &Cli) -> Result<ExitCode> {
    let tolerance = MatchTolerance {
        dot_threshold: cli.dot_threshold,
        b_tolerance: cli.b_tolerance,
        normalize: cli.normalize,
    };

    let table = load_file(&cli.path)?;
    info!("{}: {} records", cli.path.display(), table.len());

    let report = GradientReport::build(&table, tolerance)
        .with_context(|| format!("pairing halves of {}", cli.path.display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &report, cli.format)?;
    out.flush().context("flushing stdout")?;

    if report.all_match() {
        return Ok(ExitCode::SUCCESS);
    }
    warn!("gradient tables of the two halves differ");
    if cli.strict {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    run(&cli)
}
