pub mod error;
pub mod log_file;
pub mod logging_setup;
pub mod validation;

pub use logging_setup::{logger, setup_logging, update_logging_clear, update_logging_level};
pub use validation::check_non_empty_string;
