// src/exec/mod.rs

//! Process execution layer.
//!
//! This module owns everything that touches the OS process API, using
//! `tokio::process::Command`:
//!
//! - [`command_line`] builds the program + argv, rendered shell-escaped for logs.
//! - [`external`] holds the running → finished state machine of one child.
//! - [`backend`] provides the `ExternalCommand` trait that every wrapper
//!   implements so drivers can poll them uniformly.

pub mod backend;
pub mod command_line;
pub mod external;

pub use backend::{ExternalCommand, PollFuture};
pub use command_line::{CommandLine, shell_escape};
pub use external::ExternalProcess;
