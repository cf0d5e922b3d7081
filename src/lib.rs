// src/lib.rs

//! Non-blocking wrappers around short-lived checker processes.
//!
//! A driver spawns one wrapper per file (or per batch of files), polls every
//! wrapper with `poll_finished` / `poll_output` until all report finished, and
//! then reads each wrapper's parsed result:
//!
//! - [`exec`]: process lifecycle shared by all wrappers.
//! - [`lint`]: syntax-check and batch skip-decision wrappers.
//! - [`config`]: TOML configuration for the checker invocation.
//! - [`logging`]: `tracing` subscriber setup for drivers.

pub mod config;
pub mod errors;
pub mod exec;
pub mod lint;
pub mod logging;
pub mod types;

pub use errors::{ParlintError, Result};
pub use exec::{CommandLine, ExternalCommand, ExternalProcess};
pub use lint::{
    BatchStreamProcess, RecordDecoder, SyntaxCheckOptions, SyntaxCheckProcess, SyntaxError,
};
