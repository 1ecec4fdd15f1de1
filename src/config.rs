//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.bofcase.toml` files. Every value defaults to the canonical case,
//! so an empty file (or no file at all) replays it unchanged.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".bofcase.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Entity settings.
    #[serde(default)]
    pub entity: EntityConfig,

    /// Operands for the addition step.
    #[serde(default)]
    pub arith: ArithConfig,

    /// Sequence contents and the position to read.
    #[serde(default)]
    pub sequence: SequenceConfig,

    /// How the bounds violation surfaces.
    #[serde(default)]
    pub fault: FaultConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityConfig {
    /// Name used in the greeting.
    #[serde(default = "default_name")]
    pub name: String,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
        }
    }
}

fn default_name() -> String {
    "Alice".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArithConfig {
    #[serde(default = "default_lhs")]
    pub lhs: i64,

    #[serde(default = "default_rhs")]
    pub rhs: i64,
}

impl Default for ArithConfig {
    fn default() -> Self {
        Self {
            lhs: default_lhs(),
            rhs: default_rhs(),
        }
    }
}

fn default_lhs() -> i64 {
    10
}

fn default_rhs() -> i64 {
    20
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceConfig {
    /// Sequence values; must hold exactly three entries.
    #[serde(default = "default_values")]
    pub values: Vec<i64>,

    /// Position read at the end of the case.
    #[serde(default = "default_probe_index")]
    pub probe_index: usize,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            values: default_values(),
            probe_index: default_probe_index(),
        }
    }
}

fn default_values() -> Vec<i64> {
    vec![1, 2, 3]
}

fn default_probe_index() -> usize {
    5
}

/// How an out-of-range read terminates the run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum FaultMode {
    /// Index the sequence directly and let the panic unwind out of main
    #[default]
    Panic,
    /// Propagate a typed error up to main and exit with status 2
    Error,
}

impl std::fmt::Display for FaultMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FaultMode::Panic => write!(f, "panic"),
            FaultMode::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaultConfig {
    #[serde(default)]
    pub mode: FaultMode,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.bofcase.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments only override values they explicitly provide.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref name) = args.name {
            self.entity.name = name.clone();
        }
        if let Some(index) = args.index {
            self.sequence.probe_index = index;
        }
        if let Some(mode) = args.fault_mode {
            self.fault.mode = mode;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
