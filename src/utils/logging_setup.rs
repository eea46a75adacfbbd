use crate::config::LoggingConfig;
use crate::utils::error::{Result, UtilsError};
use crate::utils::log_file::LogFile;
use crate::utils::validation::Validate;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::Subscriber;
use tracing_subscriber::fmt::{self, time::ChronoLocal, MakeWriter};
use tracing_subscriber::layer::{Layer, Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{reload, EnvFilter, Registry};

pub use crate::config::{LogFormat, LogLevel};

type FilteredRegistry = Layered<reload::Layer<EnvFilter, Registry>, Registry>;
type BoxedLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync + 'static>;

static LOGGER: OnceLock<Logger> = OnceLock::new();
static INSTALL: Mutex<()> = Mutex::new(());

/// Handle to an assembled logging pipeline.
///
/// Level, filter directives, log file and the clear flag can change at
/// runtime. Console output and formatting are fixed once the subscriber
/// is built.
pub struct Logger {
    filter: reload::Handle<EnvFilter, Registry>,
    log_file: LogFile,
    config: Mutex<LoggingConfig>,
}

impl Logger {
    /// Builds the pipeline without installing it.
    pub fn build(config: LoggingConfig) -> Result<(Self, impl Subscriber + Send + Sync + 'static)> {
        config.validate()?;

        let (filter, handle) = reload::Layer::new(config.env_filter()?);
        let log_file = match &config.log_file {
            Some(path) => LogFile::open(path, config.clear)?,
            None => LogFile::default(),
        };

        let mut layers: Vec<BoxedLayer> = Vec::new();
        if config.console {
            layers.push(fmt_layer(
                config.format,
                &config.timestamp_format,
                std::io::stderr,
                true,
            ));
        }
        // Always present so a file attached later by reconfigure gets output.
        layers.push(fmt_layer(
            config.format,
            &config.timestamp_format,
            log_file.clone(),
            false,
        ));

        let subscriber = tracing_subscriber::registry().with(filter).with(layers);

        let logger = Self {
            filter: handle,
            log_file,
            config: Mutex::new(config),
        };
        Ok((logger, subscriber))
    }

    pub fn level(&self) -> LogLevel {
        self.lock_config().level
    }

    pub fn clear(&self) -> bool {
        self.lock_config().clear
    }

    pub fn config(&self) -> LoggingConfig {
        self.lock_config().clone()
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.log_file.path()
    }

    pub fn set_level(&self, level: LogLevel) -> Result<()> {
        let mut current = self.lock_config();
        if current.level == level {
            return Ok(());
        }

        let next = current.clone().with_level(level);
        self.filter.reload(next.env_filter()?)?;
        current.level = level;
        drop(current);

        tracing::debug!(level = %level, "log level updated");
        Ok(())
    }

    /// Replaces the extra filter directives; `None` leaves only the level.
    pub fn set_filter(&self, filter: Option<String>) -> Result<()> {
        let mut current = self.lock_config();
        let next = LoggingConfig {
            filter,
            ..current.clone()
        };
        self.filter.reload(next.env_filter()?)?;
        current.filter = next.filter;
        Ok(())
    }

    /// Sets the clear flag. Turning it on truncates the active log file.
    pub fn set_clear(&self, clear: bool) -> Result<()> {
        let mut current = self.lock_config();
        if clear {
            self.log_file.truncate()?;
        }
        current.clear = clear;
        Ok(())
    }

    /// Applies a new configuration to the running pipeline.
    pub fn reconfigure(&self, config: LoggingConfig) -> Result<()> {
        config.validate()?;
        let filter = config.env_filter()?;

        let mut current = self.lock_config();
        let fixed_changed = config.console != current.console
            || config.format != current.format
            || config.timestamp_format != current.timestamp_format;
        if fixed_changed {
            // Emitted under the old filter so a stricter new level keeps it.
            tracing::warn!("console and format settings cannot change after setup; keeping the installed ones");
        }

        self.filter.reload(filter)?;
        if let Err(e) = self.log_file.switch(config.log_file.as_deref(), config.clear) {
            // Restore the previous filter so handle and config still agree.
            self.filter.reload(current.env_filter()?)?;
            return Err(e);
        }

        current.level = config.level;
        current.filter = config.filter;
        current.log_file = config.log_file;
        current.clear = config.clear;
        let level = current.level;
        drop(current);

        tracing::debug!(level = %level, "logging reconfigured");
        Ok(())
    }

    fn lock_config(&self) -> MutexGuard<'_, LoggingConfig> {
        self.config.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("config", &*self.lock_config())
            .finish_non_exhaustive()
    }
}

fn fmt_layer<W>(format: LogFormat, timestamp_format: &str, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_timer(ChronoLocal::new(timestamp_format.to_string()));

    match format {
        LogFormat::Compact => layer
            .compact()
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .boxed(),
        LogFormat::Full => layer.with_target(true).boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

/// Sets up process-wide logging.
///
/// The first successful call installs the global subscriber. Later calls
/// reconfigure the installed logger in place.
pub fn setup_logging(config: LoggingConfig) -> Result<&'static Logger> {
    let _guard = INSTALL.lock().unwrap_or_else(PoisonError::into_inner);

    if let Some(logger) = LOGGER.get() {
        logger.reconfigure(config)?;
        return Ok(logger);
    }

    let (logger, subscriber) = Logger::build(config)?;
    subscriber
        .try_init()
        .map_err(|e| UtilsError::SubscriberInit {
            message: e.to_string(),
        })?;

    let logger = LOGGER.get_or_init(|| logger);
    tracing::debug!(level = %logger.level(), "logging initialized");
    Ok(logger)
}

/// The logger installed by [`setup_logging`].
pub fn logger() -> Result<&'static Logger> {
    LOGGER.get().ok_or(UtilsError::NotInitialized)
}

pub fn update_logging_level(level: LogLevel) -> Result<()> {
    logger()?.set_level(level)
}

pub fn update_logging_clear(clear: bool) -> Result<()> {
    logger()?.set_clear(clear)
}
