//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use thiserror::Error;

use crate::config::constants::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use fps_check::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     input: PathBuf::from("first_party_sets.JSON"),
///     previous: Some(PathBuf::from("previous_sets.JSON")),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Proposed registry document
    pub input: PathBuf,

    /// Previous registry snapshot; when set, only the diff is checked
    pub previous: Option<PathBuf>,

    /// JSON Schema file (bundled schema when `None`)
    pub schema: Option<PathBuf>,

    /// Newline-separated ICANN ccTLD list (bundled list when `None`)
    pub icann_tlds: Option<PathBuf>,

    /// Restrict checks to these primaries
    pub primaries: Option<Vec<String>>,

    /// Run only the rules that need no network access
    pub skip_network: bool,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("first_party_sets.JSON"),
            previous: None,
            schema: None,
            icann_tlds: None,
            primaries: None,
            skip_network: false,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

/// A configuration field that failed validation.
#[derive(Debug, Error)]
#[error("Invalid configuration for '{field}': {message}")]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: String,
    /// What is wrong and the expected range
    pub message: String,
}

impl Config {
    /// Validates field values before any file or network work starts.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigValidationError` naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.input.as_os_str().is_empty() {
            return Err(ConfigValidationError {
                field: "input".to_string(),
                message: "input path must not be empty".to_string(),
            });
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigValidationError {
                field: "timeout_seconds".to_string(),
                message: "timeout_seconds must be greater than 0".to_string(),
            });
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigValidationError {
                field: "user_agent".to_string(),
                message: "user_agent must not be blank".to_string(),
            });
        }
        if let Some(primaries) = &self.primaries {
            if primaries.is_empty() {
                return Err(ConfigValidationError {
                    field: "primaries".to_string(),
                    message: "primaries filter must list at least one site".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Check every set in the proposed list
/// fps_check first_party_sets.JSON
///
/// # Check only what changed since the previous snapshot
/// fps_check first_party_sets.JSON --previous main/first_party_sets.JSON
///
/// # Offline run of the structural rules for two primaries
/// fps_check first_party_sets.JSON --skip-network --primaries https://a.com,https://b.com
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "fps_check",
    about = "Validates proposed changes to a first-party sets registry."
)]
pub struct Opt {
    /// Proposed registry document
    #[arg(value_parser)]
    pub input: PathBuf,

    /// Previous registry snapshot to diff against
    #[arg(long, value_parser)]
    pub previous: Option<PathBuf>,

    /// JSON Schema file (defaults to the bundled schema)
    #[arg(long, value_parser)]
    pub schema: Option<PathBuf>,

    /// ICANN ccTLD list, one label per line (defaults to the bundled list)
    #[arg(long, value_parser)]
    pub icann_tlds: Option<PathBuf>,

    /// Comma-separated primaries to restrict checks to
    #[arg(long, value_delimiter = ',')]
    pub primaries: Option<Vec<String>>,

    /// Skip rules that fetch from the listed sites
    #[arg(long)]
    pub skip_network: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            input: opt.input,
            previous: opt.previous,
            schema: opt.schema,
            icann_tlds: opt.icann_tlds,
            primaries: opt.primaries,
            skip_network: opt.skip_network,
            timeout_seconds: opt.timeout_seconds,
            user_agent: opt.user_agent,
            log_level: opt.log_level,
            log_format: opt.log_format,
        }
    }
}
