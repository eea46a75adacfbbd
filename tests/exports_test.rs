//! The crate root and `utils` expose the same logging and validation surface.

use msb_arch::config::LoggingConfig;
use msb_arch::utils::error::Result;
use msb_arch::utils::logging_setup::Logger;

#[test]
fn test_utils_surface_resolves() {
    use msb_arch::utils::{
        check_non_empty_string, logger, setup_logging, update_logging_clear, update_logging_level,
    };

    let _: fn(LoggingConfig) -> Result<&'static Logger> = setup_logging;
    let _: fn() -> Result<&'static Logger> = logger;
    let _: fn(msb_arch::LogLevel) -> Result<()> = update_logging_level;
    let _: fn(bool) -> Result<()> = update_logging_clear;
    assert!(check_non_empty_string("name", "value").is_ok());
}

#[test]
fn test_root_and_utils_export_the_same_items() {
    use msb_arch::utils;
    use std::any::type_name_of_val;

    assert_eq!(
        type_name_of_val(&msb_arch::setup_logging),
        type_name_of_val(&utils::setup_logging)
    );
    assert_eq!(
        type_name_of_val(&msb_arch::logger),
        type_name_of_val(&utils::logger)
    );
    assert_eq!(
        type_name_of_val(&msb_arch::update_logging_level),
        type_name_of_val(&utils::update_logging_level)
    );
    assert_eq!(
        type_name_of_val(&msb_arch::update_logging_clear),
        type_name_of_val(&utils::update_logging_clear)
    );
    assert_eq!(
        type_name_of_val(&msb_arch::check_non_empty_string::<&str>),
        type_name_of_val(&utils::check_non_empty_string::<&str>)
    );
    assert!(type_name_of_val(&utils::setup_logging).ends_with("setup_logging"));
}

#[test]
fn test_wildcard_import_exposes_utilities() {
    mod wildcard {
        pub use msb_arch::utils::*;
    }

    assert!(wildcard::check_non_empty_string("name", "").is_err());
    assert!(wildcard::logging_setup::LogLevel::Info == msb_arch::LogLevel::Info);
}
