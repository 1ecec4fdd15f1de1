//! bofcase - BOF benchmark case replay
//!
//! Greets an entity, prints the result of an addition, then reads past
//! the end of a fixed three-element sequence. The read is range-checked
//! and the run terminates abnormally with the attempted index and the
//! sequence length.
//!
//! Exit codes:
//!   0   - Case completed (in-range probe), dry run, or --init-config
//!   1   - Runtime error (config, I/O, report writing)
//!   2   - Bounds violation with --fault-mode error
//!   101 - Bounds violation with --fault-mode panic (the default)

mod arith;
mod cli;
mod config;
mod driver;
mod entity;
mod error;
mod models;
mod report;
mod sequence;

use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::Config;
use driver::{Driver, RunOutcome};
use error::CaseError;
use models::{CaseReport, ReportMetadata};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("bofcase v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run_case(&args) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            let bounds = e.downcast_ref::<CaseError>().and_then(CaseError::bounds);
            if let Some((index, len)) = bounds {
                error!(index, len, "Bounds violation");
                eprintln!("Error: {}", e);
                std::process::exit(2);
            }

            error!("Case failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .bofcase.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(config::CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            config::CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::CONFIG_FILE_NAME))?;

    println!(
        "Created {} with the default case settings.",
        config::CONFIG_FILE_NAME
    );
    Ok(())
}

/// Initialize logging on stderr so stdout carries only the case output.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the case. Returns the exit code for a run that did not fault.
fn run_case(args: &Args) -> Result<i32> {
    let start_time = Instant::now();

    let mut config = load_config(args)?;
    config.merge_with_args(args);

    let driver = Driver::from_config(&config).context("Invalid case configuration")?;

    if args.dry_run {
        return Ok(handle_dry_run(&driver));
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let Some(ref path) = args.report else {
        // Out of range: panics, or returns the violation to main.
        let outcome = driver.run(&mut out)?;
        debug!("Case output: {:?}", outcome.lines);
        return Ok(0);
    };

    // The report must be on disk before the probe can fault.
    let outcome = driver.prelude(&mut out)?;
    let duration = start_time.elapsed().as_secs_f64();
    write_report(&driver, outcome, duration, args.format, path)?;
    info!("Report saved to: {}", path.display());

    let value = driver.probe(&mut out)?;
    debug!("Position {} holds {}", driver.probe_index(), value);

    Ok(0)
}

/// Handle --dry-run: print the planned steps and exit.
fn handle_dry_run(driver: &Driver) -> i32 {
    let (lhs, rhs) = driver.operands();
    let seq = driver.sequence();
    let index = driver.probe_index();

    println!("Dry run: the case would");
    println!("  1. greet {}", driver.person().name());
    println!("  2. print Add({}, {})", lhs, rhs);
    println!("  3. build the sequence {:?}", seq.as_slice());
    if let Some(value) = seq.get(index) {
        println!("  4. read position {} (in bounds, holds {})", index, value);
    } else {
        println!(
            "  4. read position {} (out of bounds for length {}, fault mode: {})",
            index,
            seq.len(),
            driver.mode()
        );
    }

    0
}

/// Render the report for the run so far and write it to `path`.
fn write_report(
    driver: &Driver,
    outcome: RunOutcome,
    duration: f64,
    format: OutputFormat,
    path: &Path,
) -> Result<()> {
    let report = CaseReport::new(
        ReportMetadata::for_case(driver.mode(), duration),
        driver.person().name().to_string(),
        driver.operands(),
        driver.sequence().as_slice().to_vec(),
        outcome,
    );

    let output = match format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report),
    };

    std::fs::write(path, &output)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", config::CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
