// src/lint/batch_stream.rs

//! Long-running batch helper that decides, per file, whether linting can be
//! skipped.
//!
//! The checker executable runs the helper script with every target file as
//! an argument:
//!
//! ```text
//! <executable> <helper_script> <file>...
//! ```
//!
//! The helper prints one `path;flag` record per file as soon as it is
//! decided, in no particular order. Records are consumed incrementally via
//! [`BatchStreamProcess::get_chunk`] and, once the process exits, from the
//! output drained at finalize.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::LintConfig;
use crate::errors::{ParlintError, Result};
use crate::exec::{CommandLine, ExternalCommand, ExternalProcess, PollFuture};
use crate::lint::RecordDecoder;
use crate::types::{DEFAULT_READ_QUANTUM, MAX_READ_QUANTUM};

pub struct BatchStreamProcess {
    process: ExternalProcess,
    decoder: RecordDecoder,
    drained: bool,
    read_quantum: usize,
}

impl BatchStreamProcess {
    /// Validate the arguments and spawn the helper over `files`.
    ///
    /// Empty executable or helper paths, or an empty file list, are rejected
    /// before anything is spawned.
    pub fn spawn<I, P>(
        executable: impl AsRef<Path>,
        helper_script: impl AsRef<Path>,
        files: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let files: Vec<PathBuf> = files
            .into_iter()
            .map(|f| f.as_ref().to_path_buf())
            .collect();
        let command_line =
            Self::command_line(executable.as_ref(), helper_script.as_ref(), &files)?;

        debug!(files = files.len(), "starting batch helper");
        let process = ExternalProcess::spawn(command_line)?;

        Ok(Self {
            process,
            decoder: RecordDecoder::new(),
            drained: false,
            read_quantum: DEFAULT_READ_QUANTUM,
        })
    }

    pub fn from_config<I, P>(config: &LintConfig, files: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Ok(Self::spawn(&config.checker.executable, &config.batch.helper_script, files)?
            .with_read_quantum(config.batch.read_quantum))
    }

    /// Bytes requested per [`get_chunk`](Self::get_chunk) call, clamped to
    /// `1..=MAX_READ_QUANTUM`.
    pub fn with_read_quantum(mut self, read_quantum: usize) -> Self {
        self.read_quantum = read_quantum.clamp(1, MAX_READ_QUANTUM);
        self
    }

    /// Build the helper invocation without spawning it.
    pub fn command_line(
        executable: &Path,
        helper_script: &Path,
        files: &[PathBuf],
    ) -> Result<CommandLine> {
        if executable.as_os_str().is_empty() {
            return Err(ParlintError::ArgumentError(
                "syntax checker executable must be set".to_string(),
            ));
        }
        if helper_script.as_os_str().is_empty() {
            return Err(ParlintError::ArgumentError(
                "batch helper script must be set".to_string(),
            ));
        }
        if files.is_empty() {
            return Err(ParlintError::ArgumentError(
                "at least one file to check must be given".to_string(),
            ));
        }
        if files.iter().any(|f| f.as_os_str().is_empty()) {
            return Err(ParlintError::ArgumentError(
                "file paths to check must not be empty".to_string(),
            ));
        }

        Ok(CommandLine::new(executable).arg(helper_script).args(files))
    }

    pub fn process(&self) -> &ExternalProcess {
        &self.process
    }

    /// Read one chunk of stdout, if available, and decode completed records.
    ///
    /// Does nothing once the process has finished.
    pub async fn get_chunk(&mut self) -> Result<()> {
        if let Some(chunk) = self.process.read_chunk(self.read_quantum).await? {
            self.decoder = std::mem::take(&mut self.decoder).feed(&chunk);
        }
        Ok(())
    }

    /// Non-blocking completion check.
    ///
    /// The first time the process is seen finished, the output drained at
    /// finalize is decoded as well, exactly once.
    pub async fn is_finished(&mut self) -> Result<bool> {
        let finished = self.process.is_finished().await?;

        if finished && !self.drained {
            self.drained = true;
            // Raw bytes: the carry may end inside a multi-byte character.
            let output = self.process.output_bytes()?;
            self.decoder = std::mem::take(&mut self.decoder)
                .feed(output)
                .finish();
            debug!(
                records = self.decoder.records().len(),
                "batch helper output fully decoded"
            );
        }

        Ok(finished)
    }

    /// Decoded skip flag for `file`, or `None` if no record named it (yet).
    pub fn is_skipped(&self, file: &str) -> Option<bool> {
        self.decoder.is_skipped(file)
    }

    pub fn decoder(&self) -> &RecordDecoder {
        &self.decoder
    }

    /// Files the helper has marked as skippable so far.
    pub fn skipped_files(&self) -> impl Iterator<Item = &str> {
        self.decoder
            .records()
            .iter()
            .filter(|(_, skipped)| **skipped)
            .map(|(file, _)| file.as_str())
    }
}

impl ExternalCommand for BatchStreamProcess {
    fn process(&self) -> &ExternalProcess {
        &self.process
    }

    fn poll_output(&mut self) -> PollFuture<'_, ()> {
        Box::pin(self.get_chunk())
    }

    fn poll_finished(&mut self) -> PollFuture<'_, bool> {
        Box::pin(self.is_finished())
    }
}
