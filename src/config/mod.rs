#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::{Result, UtilsError};
use crate::utils::validation::{check_non_empty_string, validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

// Variables read by `LoggingConfig::with_env_overrides`.
pub const ENV_LOG_LEVEL: &str = "MSB_LOG_LEVEL";
pub const ENV_LOG_FILE: &str = "MSB_LOG_FILE";
pub const ENV_LOG_CLEAR: &str = "MSB_LOG_CLEAR";
pub const ENV_LOG_FORMAT: &str = "MSB_LOG_FORMAT";
pub const ENV_FILTER: &str = "RUST_LOG";

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = UtilsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" | "critical" | "fatal" => Ok(LogLevel::Error),
            "off" | "none" => Ok(LogLevel::Off),
            _ => Err(UtilsError::InvalidLogLevel {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = UtilsError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_string()
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Off => LevelFilter::OFF,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Json,
}

impl FromStr for LogFormat {
    type Err = UtilsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "full" | "pretty" => Ok(LogFormat::Full),
            "json" => Ok(LogFormat::Json),
            _ => Err(UtilsError::InvalidConfigValueError {
                field: "format".to_string(),
                value: s.to_string(),
                reason: "Valid formats: compact, full, json".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Extra `EnvFilter` directives layered over `level`, e.g. `msb_arch=debug`.
    pub filter: Option<String>,
    pub log_file: Option<PathBuf>,
    /// Truncate the log file instead of appending to it.
    pub clear: bool,
    pub console: bool,
    pub format: LogFormat,
    pub timestamp_format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            filter: None,
            log_file: None,
            clear: false,
            console: true,
            format: LogFormat::Compact,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn with_clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Applies `MSB_LOG_*` variables and `RUST_LOG` on top of this config.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(level) = env::var(ENV_LOG_LEVEL) {
            self.level = level.parse()?;
        }
        if let Ok(path) = env::var(ENV_LOG_FILE) {
            if !path.trim().is_empty() {
                self.log_file = Some(PathBuf::from(path));
            }
        }
        if let Ok(clear) = env::var(ENV_LOG_CLEAR) {
            self.clear = parse_flag(ENV_LOG_CLEAR, &clear)?;
        }
        if let Ok(format) = env::var(ENV_LOG_FORMAT) {
            self.format = format.parse()?;
        }
        if let Ok(directives) = env::var(ENV_FILTER) {
            if !directives.trim().is_empty() {
                self.filter = Some(directives);
            }
        }
        Ok(self)
    }

    /// Builds the level filter: targeted directives from `filter` with
    /// `level` for everything else.
    ///
    /// Bare level directives in `filter` (e.g. `debug`) are dropped so
    /// `level` stays the single untargeted directive.
    pub fn env_filter(&self) -> Result<EnvFilter> {
        let directives = self.filter.as_deref().unwrap_or("");
        let targeted = directives
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty() && part.parse::<LevelFilter>().is_err())
            .collect::<Vec<_>>()
            .join(",");

        let filter = EnvFilter::builder()
            .parse(&targeted)
            .map_err(|e| UtilsError::InvalidConfigValueError {
                field: "filter".to_string(),
                value: directives.to_string(),
                reason: e.to_string(),
            })?;
        Ok(filter.add_directive(LevelFilter::from(self.level).into()))
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<()> {
        check_non_empty_string("timestamp_format", &self.timestamp_format)?;

        if let Some(path) = &self.log_file {
            validate_path("log_file", &path.to_string_lossy())?;
        }

        self.env_filter()?;
        Ok(())
    }
}

fn parse_flag(field: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(UtilsError::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason: "Expected a boolean (true/false, 1/0, yes/no)".to_string(),
        }),
    }
}
