//! Logging setup.
//!
//! Status lines (subsystem up, window created, shutdown) and shader/driver
//! diagnostics all go through the `log` facade; `env_logger` writes them to
//! stderr.

mod init;

pub use init::{LoggingConfig, init_logging};
