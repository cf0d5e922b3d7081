// src/lint/syntax_check.rs

//! One syntax-checker run on a single file.
//!
//! The checker is invoked in lint-only mode without a config file:
//!
//! ```text
//! <executable> -d asp_tags=Off -d short_open_tag=Off -d error_reporting=E_ALL -n -l <file>
//! ```
//!
//! Its stdout follows a two-line convention: the success phrase
//! [`NO_SYNTAX_ERRORS`] appears anywhere on success; on failure the
//! diagnostic sits on the second line (the first one is blank or noise).

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::LintConfig;
use crate::errors::{ParlintError, Result};
use crate::exec::{CommandLine, ExternalCommand, ExternalProcess, PollFuture};
use crate::lint::SyntaxError;
use crate::types::FAILURE_EXIT_CODE;

/// Phrase printed by the checker when a file parses cleanly.
pub const NO_SYNTAX_ERRORS: &str = "No syntax errors detected";

/// Interpreter toggles passed with `-d`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyntaxCheckOptions {
    pub asp_tags: bool,
    pub short_open_tag: bool,
}

pub struct SyntaxCheckProcess {
    process: ExternalProcess,
    file: PathBuf,
}

impl SyntaxCheckProcess {
    /// Validate the arguments and spawn the checker on `file`.
    ///
    /// An empty executable or file path is rejected before anything is spawned.
    pub fn spawn(
        executable: impl AsRef<Path>,
        file: impl AsRef<Path>,
        options: SyntaxCheckOptions,
    ) -> Result<Self> {
        let command_line = Self::command_line(executable.as_ref(), file.as_ref(), options)?;
        let process = ExternalProcess::spawn(command_line)?;

        Ok(Self {
            process,
            file: file.as_ref().to_path_buf(),
        })
    }

    pub fn from_config(config: &LintConfig, file: impl AsRef<Path>) -> Result<Self> {
        Self::spawn(&config.checker.executable, file, config.checker.options())
    }

    /// Build the checker invocation without spawning it.
    pub fn command_line(
        executable: &Path,
        file: &Path,
        options: SyntaxCheckOptions,
    ) -> Result<CommandLine> {
        if executable.as_os_str().is_empty() {
            return Err(ParlintError::ArgumentError(
                "syntax checker executable must be set".to_string(),
            ));
        }
        if file.as_os_str().is_empty() {
            return Err(ParlintError::ArgumentError(
                "file to check must be set".to_string(),
            ));
        }

        Ok(CommandLine::new(executable)
            .arg("-d")
            .arg(format!("asp_tags={}", on_off(options.asp_tags)))
            .arg("-d")
            .arg(format!("short_open_tag={}", on_off(options.short_open_tag)))
            .arg("-d")
            .arg("error_reporting=E_ALL")
            .arg("-n")
            .arg("-l")
            .arg(file))
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn process(&self) -> &ExternalProcess {
        &self.process
    }

    pub async fn is_finished(&mut self) -> Result<bool> {
        self.process.is_finished().await
    }

    /// `true` unless the checker printed its success phrase.
    pub fn has_syntax_error(&self) -> Result<bool> {
        Ok(output_has_syntax_error(self.process.output()?))
    }

    /// The diagnostic line, when the file has a syntax error.
    pub fn syntax_error(&self) -> Result<Option<String>> {
        let output = self.process.output()?;
        if !output_has_syntax_error(output) {
            return Ok(None);
        }
        Ok(syntax_error_line(output))
    }

    pub fn syntax_error_details(&self) -> Result<Option<SyntaxError>> {
        let error = self
            .syntax_error()?
            .map(|message| SyntaxError::new(&self.file, message));
        if let Some(ref error) = error {
            debug!(file = ?self.file, line = ?error.line(), "syntax error reported");
        }
        Ok(error)
    }

    /// On Windows only an exit status of exactly 1 counts as failure;
    /// elsewhere the base rule applies.
    pub fn is_fail(&self) -> Result<bool> {
        if cfg!(windows) {
            Ok(self.process.status_code()? == FAILURE_EXIT_CODE)
        } else {
            self.process.is_fail()
        }
    }
}

impl ExternalCommand for SyntaxCheckProcess {
    fn process(&self) -> &ExternalProcess {
        &self.process
    }

    fn poll_finished(&mut self) -> PollFuture<'_, bool> {
        Box::pin(self.is_finished())
    }

    fn is_fail(&self) -> Result<bool> {
        SyntaxCheckProcess::is_fail(self)
    }
}

/// Whether checker output lacks the success phrase.
pub fn output_has_syntax_error(output: &str) -> bool {
    !output.contains(NO_SYNTAX_ERRORS)
}

/// Second line of the checker output, where the diagnostic is printed.
pub fn syntax_error_line(output: &str) -> Option<String> {
    output
        .split('\n')
        .nth(1)
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "On" } else { "Off" }
}
