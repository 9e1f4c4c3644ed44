//! Logging utilities.
//!
//! Centralizes logger initialization. Library code only uses the `log` facade;
//! `env_logger` is installed here for binaries.

mod init;

pub use init::{LoggingConfig, init_logging};
