use anyhow::Context;
use clap::Parser;
use msb_arch::config::cli::{CliConfig, Command};
use msb_arch::utils::validation::validate_required_field;
use msb_arch::{check_non_empty_string, setup_logging, update_logging_clear, LogLevel};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = cli
        .logging_config()
        .context("failed to resolve logging configuration")?;
    let logger = setup_logging(config).context("failed to set up logging")?;

    tracing::debug!(command = ?cli.command, level = %logger.level(), "CLI started");

    match cli.command {
        Command::Check { name, value } => match check_non_empty_string(&name, &value) {
            Ok(()) => {
                tracing::info!("✅ '{}' is a non-empty string", name);
                println!("✅ {}: ok", name);
            }
            Err(e) => {
                tracing::error!("❌ Validation failed: {}", e);
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        },
        Command::Log { message, at } => emit(at, &message),
        Command::Clear => {
            let config = logger.config();
            let path = validate_required_field("log_file", &config.log_file)?;
            update_logging_clear(true)?;
            println!("🧹 Cleared {}", path.display());
        }
    }

    Ok(())
}

fn emit(level: LogLevel, message: &str) {
    match level {
        LogLevel::Trace => tracing::trace!("{}", message),
        LogLevel::Debug => tracing::debug!("{}", message),
        LogLevel::Info => tracing::info!("{}", message),
        LogLevel::Warn => tracing::warn!("{}", message),
        LogLevel::Error => tracing::error!("{}", message),
        LogLevel::Off => {}
    }
}
