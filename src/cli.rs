//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::config::FaultMode;
use clap::Parser;
use std::path::PathBuf;

/// bofcase - replay the BOF benchmark case
///
/// Greets an entity, prints the result of an addition, then reads past the
/// end of a three-element array. A default run always terminates abnormally.
///
/// Examples:
///   bofcase
///   bofcase --fault-mode error
///   bofcase --index 2
///   bofcase --report case.json --format json
///   bofcase --dry-run
///   bofcase --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Name used in the greeting (default: Alice)
    #[arg(short, long, value_name = "NAME", env = "BOFCASE_NAME")]
    pub name: Option<String>,

    /// Position read from the sequence at the end of the case (default: 5)
    #[arg(short, long, value_name = "INDEX")]
    pub index: Option<usize>,

    /// How the bounds violation terminates the run
    #[arg(long, value_name = "MODE")]
    pub fault_mode: Option<FaultMode>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .bofcase.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write a case report to this file before the fault
    #[arg(short, long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Report format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the planned steps without running the case
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .bofcase.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref name) = self.name {
            if name.trim().is_empty() {
                return Err("Name must not be empty".to_string());
            }
        }

        if let Some(ref config_path) = self.config {
            if !config_path.is_file() {
                return Err(format!(
                    "Config file does not exist: {}",
                    config_path.display()
                ));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }
}
