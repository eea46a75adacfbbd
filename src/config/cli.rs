use crate::config::{LogFormat, LogLevel, LoggingConfig};
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "msb-arch")]
#[command(about = "Logging setup and string validation utilities")]
pub struct CliConfig {
    /// TOML file with a [logging] table
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Log level (trace, debug, info, warning, error, off)")]
    pub level: Option<LogLevel>,

    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Truncate the log file on open")]
    pub clear: bool,

    #[arg(long, global = true, value_enum)]
    pub format: Option<LogFormat>,

    #[arg(long, global = true, help = "Disable console output")]
    pub no_console: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Check that a value is a non-empty string
    Check { name: String, value: String },

    /// Emit a message through the configured logger
    Log {
        message: String,

        #[arg(long, default_value = "info")]
        at: LogLevel,
    },

    /// Truncate the configured log file
    Clear,
}

impl CliConfig {
    /// Resolves the logging config: file, then environment, then flags.
    pub fn logging_config(&self) -> Result<LoggingConfig> {
        let mut config = match &self.config {
            Some(path) => LoggingConfig::from_file(path)?,
            None => LoggingConfig::default(),
        }
        .with_env_overrides()?;

        if let Some(level) = self.level {
            config.level = level;
        }
        if let Some(path) = &self.log_file {
            config.log_file = Some(path.clone());
        }
        if self.clear {
            config.clear = true;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.no_console {
            config.console = false;
        }

        Ok(config)
    }
}
