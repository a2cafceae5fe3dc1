// predcheck - validate and repair a prediction CSV against its test file

mod exit_codes;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use predcheck_cli::pipeline::{self, RunPaths};
use predcheck_engine::{Diagnostics, SanityConfig, SanityError, UnitParser};

use exit_codes::{sanity_exit_code, EXIT_CONFIG, EXIT_SUCCESS};

#[derive(Parser)]
#[command(name = "predcheck")]
#[command(about = "Run sanity check on a prediction CSV file, blanking predictions that fail to parse")]
#[command(long_version = long_version())]
#[command(version)]
#[command(after_help = "\
Every output row is checked for a `<number> <unit>` prediction (e.g. `12 kilogram`, `12kg`).
Rows that fail are written back with an empty prediction; no row is dropped.

Examples:
  predcheck --test-filename sample_test.csv --output-filename sample_test_out.csv
  predcheck --test-filename test.csv --output-filename out.csv --new-filename fixed.csv
  predcheck --test-filename test.csv --output-filename out.csv --report run.json -q")]
struct Cli {
    /// The test CSV file name
    #[arg(long, value_name = "PATH")]
    test_filename: PathBuf,

    /// The output CSV file name to check
    #[arg(long, value_name = "PATH")]
    output_filename: PathBuf,

    /// Where to save the repaired output (default: `default_output` from config, "bapu.csv")
    #[arg(long, value_name = "PATH")]
    new_filename: Option<PathBuf>,

    /// TOML config file (default: <config dir>/predcheck/config.toml when present)
    #[arg(long, value_name = "PATH", env = "PREDCHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Write a JSON run report to this path
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Field delimiter (overrides config)
    #[arg(long)]
    delimiter: Option<char>,

    /// Suppress per-row diagnostics (errors still print)
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("PREDCHECK_COMMIT"), ")",
        "\nengine:  predcheck-engine ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("PREDCHECK_TARGET"),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cmd_check(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message }) => {
            eprintln!("error: {}", message);
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
}

impl CliError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG, message: msg.into() }
    }
}

impl From<SanityError> for CliError {
    fn from(err: SanityError) -> Self {
        Self { code: sanity_exit_code(&err), message: err.to_string() }
    }
}

/// Diagnostic lines go to stdout unless `--quiet`.
struct StdoutDiagnostics {
    quiet: bool,
}

impl Diagnostics for StdoutDiagnostics {
    fn emit(&mut self, line: String) {
        if !self.quiet {
            println!("{line}");
        }
    }
}

// ============================================================================
// check
// ============================================================================

fn cmd_check(cli: Cli) -> Result<(), CliError> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(delimiter) = cli.delimiter {
        config.delimiter = delimiter;
        config.validate()?;
    }

    let parser = UnitParser::from_config(&config.units)?;

    let paths = RunPaths {
        test: cli.test_filename,
        output: cli.output_filename,
        repaired: cli
            .new_filename
            .unwrap_or_else(|| PathBuf::from(&config.default_output)),
        report: cli.report,
    };

    let mut diag = StdoutDiagnostics { quiet: cli.quiet };
    pipeline::run(&config, &parser, &paths, &mut diag)?;

    Ok(())
}

/// Explicit `--config` must exist; the per-user default is optional.
fn load_config(explicit: Option<&Path>) -> Result<SanityConfig, CliError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path().filter(|p| p.is_file()) {
            Some(path) => path,
            None => return Ok(SanityConfig::default()),
        },
    };

    let text = std::fs::read_to_string(&path)
        .map_err(|e| CliError::config(format!("cannot read config {}: {e}", path.display())))?;
    SanityConfig::from_toml(&text)
        .map_err(|e| CliError::config(format!("{}: {e}", path.display())))
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("predcheck").join("config.toml"))
}
