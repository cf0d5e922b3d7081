// src/lint/mod.rs

//! Checker-specific process wrappers.
//!
//! Each wrapper composes an [`ExternalProcess`](crate::exec::ExternalProcess)
//! with its own command-line builder and output decoder:
//!
//! - [`syntax_check`] runs the checker on one file and reads a pass/fail
//!   verdict from its two-line output.
//! - [`batch_stream`] runs the skip-decision helper over many files and
//!   decodes its record stream while it is still running.
//! - [`record_decoder`] is the pure, chunk-boundary-safe record decoder.
//! - [`syntax_error`] turns a diagnostic line into structured details.

pub mod batch_stream;
pub mod record_decoder;
pub mod syntax_check;
pub mod syntax_error;

pub use batch_stream::BatchStreamProcess;
pub use record_decoder::{RecordDecoder, SKIP_FLAG};
pub use syntax_check::{
    NO_SYNTAX_ERRORS, SyntaxCheckOptions, SyntaxCheckProcess, output_has_syntax_error,
    syntax_error_line,
};
pub use syntax_error::SyntaxError;
