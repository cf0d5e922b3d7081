// src/exec/backend.rs

//! Shared capability of every process wrapper.
//!
//! A driver polls a mixed set of wrappers through `ExternalCommand` instead
//! of knowing each concrete type:
//!
//! - [`ExternalProcess`] is the plain lifecycle with the base failure rule.
//! - `SyntaxCheckProcess` and `BatchStreamProcess` (in [`crate::lint`])
//!   compose an `ExternalProcess` with their own command-line builder and
//!   output decoder.
//!
//! The async methods return boxed futures so the trait stays object-safe.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

use super::external::ExternalProcess;

pub type PollFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

pub trait ExternalCommand: Send {
    /// The underlying process lifecycle.
    fn process(&self) -> &ExternalProcess;

    /// Perform one incremental output step.
    ///
    /// The default does nothing: output is only captured at finalize.
    fn poll_output(&mut self) -> PollFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }

    /// Non-blocking completion check, including any variant-specific work
    /// done on the running → finished transition.
    fn poll_finished(&mut self) -> PollFuture<'_, bool>;

    /// Whether the finished process counts as a failure.
    fn is_fail(&self) -> Result<bool> {
        self.process().is_fail()
    }
}

impl ExternalCommand for ExternalProcess {
    fn process(&self) -> &ExternalProcess {
        self
    }

    fn poll_finished(&mut self) -> PollFuture<'_, bool> {
        Box::pin(self.is_finished())
    }
}
