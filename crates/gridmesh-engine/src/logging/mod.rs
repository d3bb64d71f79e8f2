//! Logger setup.
//!
//! Everything in the workspace logs through the `log` facade; this module
//! installs the `env_logger` backend once at startup.

mod init;

pub use init::{LoggingConfig, init_logging};
