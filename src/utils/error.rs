use thiserror::Error;

#[derive(Error, Debug)]
pub enum UtilsError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Unknown log level: '{value}'")]
    InvalidLogLevel { value: String },

    #[error("Failed to install logging subscriber: {message}")]
    SubscriberInit { message: String },

    #[error("Failed to reload log filter: {0}")]
    ReloadError(#[from] tracing_subscriber::reload::Error),

    #[error("Logging has not been set up; call setup_logging first")]
    NotInitialized,
}

pub type Result<T> = std::result::Result<T, UtilsError>;
