//! Application wiring.
//!
//! Brings the components up in dependency order (window/context, optional
//! shader pipeline, render loop), tears them down in reverse and maps the
//! outcome to a process exit code.

mod app;

pub use app::{
    AppConfig, EXIT_FAILURE, EXIT_SUCCESS, exit_code, failure_kind, run, run_with,
};
