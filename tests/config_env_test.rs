use msb_arch::config::{ENV_FILTER, ENV_LOG_CLEAR, ENV_LOG_FILE, ENV_LOG_FORMAT, ENV_LOG_LEVEL};
use msb_arch::{LogFormat, LogLevel, LoggingConfig, UtilsError};
use std::path::PathBuf;

// Environment is process-wide, so every case lives in one test.
#[test]
fn test_env_overrides() {
    for var in [ENV_LOG_LEVEL, ENV_LOG_FILE, ENV_LOG_CLEAR, ENV_LOG_FORMAT, ENV_FILTER] {
        std::env::remove_var(var);
    }

    let untouched = LoggingConfig::default().with_env_overrides().unwrap();
    assert_eq!(untouched, LoggingConfig::default());

    std::env::set_var(ENV_LOG_LEVEL, "WARNING");
    std::env::set_var(ENV_LOG_FILE, "/tmp/msb-env.log");
    std::env::set_var(ENV_LOG_CLEAR, "yes");
    std::env::set_var(ENV_LOG_FORMAT, "json");
    std::env::set_var(ENV_FILTER, "msb_arch=trace");

    let config = LoggingConfig::default().with_env_overrides().unwrap();
    assert_eq!(config.level, LogLevel::Warn);
    assert_eq!(config.log_file, Some(PathBuf::from("/tmp/msb-env.log")));
    assert!(config.clear);
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.filter.as_deref(), Some("msb_arch=trace"));

    std::env::set_var(ENV_LOG_LEVEL, "loud");
    assert!(matches!(
        LoggingConfig::default().with_env_overrides(),
        Err(UtilsError::InvalidLogLevel { .. })
    ));
    std::env::set_var(ENV_LOG_LEVEL, "info");

    std::env::set_var(ENV_LOG_CLEAR, "sometimes");
    assert!(LoggingConfig::default().with_env_overrides().is_err());

    for var in [ENV_LOG_LEVEL, ENV_LOG_FILE, ENV_LOG_CLEAR, ENV_LOG_FORMAT, ENV_FILTER] {
        std::env::remove_var(var);
    }
}
