pub mod config;
pub mod utils;

pub use config::{toml_config::TomlConfig, LogFormat, LogLevel, LoggingConfig};
pub use utils::error::{Result, UtilsError};
pub use utils::logging_setup::Logger;
pub use utils::{
    check_non_empty_string, logger, setup_logging, update_logging_clear, update_logging_level,
};
