// src/exec/command_line.rs

//! Program + argument list for a child process.
//!
//! Arguments are handed to the OS as a vector, never through a shell, so a
//! crafted file name cannot inject extra commands. The `Display` impl renders
//! the equivalent shell-escaped single line for logs and error messages.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use tokio::process::Command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: PathBuf,
    args: Vec<OsString>,
}

impl CommandLine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }

    /// Build the tokio `Command` (exec semantics, no shell).
    pub(crate) fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&shell_escape(self.program.as_os_str()))?;
        for arg in &self.args {
            write!(f, " {}", shell_escape(arg))?;
        }
        Ok(())
    }
}

/// Quote a single argument for a POSIX shell.
///
/// Words made only of "safe" characters are left untouched; everything else
/// is wrapped in single quotes, with embedded quotes written as `'\''`.
pub fn shell_escape(arg: &OsStr) -> String {
    let arg = arg.to_string_lossy();

    let is_safe = |c: char| c.is_ascii_alphanumeric() || "-_=./:,+@%".contains(c);
    if !arg.is_empty() && arg.chars().all(is_safe) {
        return arg.into_owned();
    }

    format!("'{}'", arg.replace('\'', r"'\''"))
}
