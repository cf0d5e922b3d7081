// src/types.rs

/// Exit status of a finished child process.
pub type ExitCode = i32;

/// Exit status reported when neither an exit code nor a signal is available.
pub const UNKNOWN_EXIT_CODE: ExitCode = -1;

/// Exit status that the base failure rule treats as "failed".
pub const FAILURE_EXIT_CODE: ExitCode = 1;

/// Default number of bytes requested by a single incremental stdout read.
pub const DEFAULT_READ_QUANTUM: usize = 8192;

/// Largest accepted read quantum; each read allocates a buffer of this size.
pub const MAX_READ_QUANTUM: usize = 1024 * 1024;
