// src/exec/external.rs

//! Lifecycle of a single child process.
//!
//! An [`ExternalProcess`] is either *running* (it owns the child handle and
//! both output pipes) or *finished* (it owns the captured output and the exit
//! status). The only transition is running → finished, performed by the first
//! [`ExternalProcess::is_finished`] call that observes the child has exited.
//! That call drains both pipes, drops the handle and records the status; the
//! state enum guarantees it can happen at most once.

use std::future::poll_fn;
use std::pin::Pin;
use std::process::{ExitStatus, Stdio};
use std::task::Poll;

use tokio::io::{AsyncRead, AsyncReadExt, ReadBuf};
use tokio::process::{Child, ChildStderr, ChildStdout};
use tracing::{debug, info};

use crate::errors::{ParlintError, Result};
use crate::exec::CommandLine;
use crate::types::{ExitCode, FAILURE_EXIT_CODE, UNKNOWN_EXIT_CODE};

pub struct ExternalProcess {
    command_line: CommandLine,
    state: ProcessState,
}

enum ProcessState {
    Running(RunningProcess),
    Finished(FinishedProcess),
}

struct RunningProcess {
    child: Child,
    stdout: ChildStdout,
    stderr: ChildStderr,
}

#[derive(Debug, Clone)]
struct FinishedProcess {
    raw_output: Vec<u8>,
    output: String,
    error_output: String,
    status_code: ExitCode,
}

impl ExternalProcess {
    /// Spawn `command_line` with stdin, stdout and stderr piped.
    ///
    /// Stdin is closed right away; nothing is ever written to the child.
    /// Must be called from within a Tokio runtime.
    pub fn spawn(command_line: CommandLine) -> Result<Self> {
        let mut cmd = command_line.to_command();
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|source| ParlintError::SpawnError {
            command: command_line.to_string(),
            source,
        })?;

        drop(child.stdin.take());
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| missing_pipe(&command_line, "stdout"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| missing_pipe(&command_line, "stderr"))?;

        info!(pid = ?child.id(), command = %command_line, "spawned process");

        Ok(Self {
            command_line,
            state: ProcessState::Running(RunningProcess {
                child,
                stdout,
                stderr,
            }),
        })
    }

    pub fn command_line(&self) -> &CommandLine {
        &self.command_line
    }

    /// OS process id, while the process is still owned.
    pub fn pid(&self) -> Option<u32> {
        match &self.state {
            ProcessState::Running(running) => running.child.id(),
            ProcessState::Finished(_) => None,
        }
    }

    /// Non-blocking completion check.
    ///
    /// Returns `false` while the child is running. The first call that sees
    /// the child exited drains and closes both pipes, releases the handle and
    /// records the exit status; later calls return `true` without touching
    /// the OS.
    pub async fn is_finished(&mut self) -> Result<bool> {
        let running = match &mut self.state {
            ProcessState::Finished(_) => return Ok(true),
            ProcessState::Running(running) => running,
        };

        let Some(status) = running.child.try_wait()? else {
            return Ok(false);
        };

        let finished = running.finalize(status).await?;

        info!(
            command = %self.command_line,
            exit_code = finished.status_code,
            stdout_bytes = finished.output.len(),
            stderr_bytes = finished.error_output.len(),
            "process exited"
        );

        // Dropping the running state closes both pipes and the child handle.
        self.state = ProcessState::Finished(finished);
        Ok(true)
    }

    /// One bounded, non-blocking read from stdout.
    ///
    /// Returns `None` once the process has finished (the finalize drain has
    /// already consumed everything). Otherwise returns the bytes that were
    /// immediately available, at most `quantum` of them, possibly none.
    ///
    /// Bytes returned here are not repeated in [`output`](Self::output).
    pub async fn read_chunk(&mut self, quantum: usize) -> Result<Option<Vec<u8>>> {
        let ProcessState::Running(running) = &mut self.state else {
            return Ok(None);
        };

        let mut buf = vec![0u8; quantum];
        let mut read_buf = ReadBuf::new(&mut buf);
        let stdout = &mut running.stdout;

        let polled = poll_fn(|cx| {
            Poll::Ready(match Pin::new(&mut *stdout).poll_read(cx, &mut read_buf) {
                Poll::Ready(result) => Some(result),
                Poll::Pending => None,
            })
        })
        .await;

        let read = match polled {
            Some(result) => {
                result?;
                read_buf.filled().len()
            }
            None => 0,
        };
        buf.truncate(read);

        if read > 0 {
            debug!(command = %self.command_line, bytes = read, "read stdout chunk");
        }
        Ok(Some(buf))
    }

    /// Captured standard output.
    pub fn output(&self) -> Result<&str> {
        Ok(&self.finished("output")?.output)
    }

    /// Captured standard output, byte for byte.
    pub(crate) fn output_bytes(&self) -> Result<&[u8]> {
        Ok(&self.finished("output")?.raw_output)
    }

    /// Captured standard error.
    pub fn error_output(&self) -> Result<&str> {
        Ok(&self.finished("error output")?.error_output)
    }

    pub fn status_code(&self) -> Result<ExitCode> {
        Ok(self.finished("status code")?.status_code)
    }

    /// Base failure rule: the exit status equals 1.
    pub fn is_fail(&self) -> Result<bool> {
        Ok(self.status_code()? == FAILURE_EXIT_CODE)
    }

    fn finished(&self, what: &str) -> Result<&FinishedProcess> {
        match &self.state {
            ProcessState::Finished(finished) => Ok(finished),
            ProcessState::Running(_) => Err(ParlintError::InvalidState(format!(
                "cannot read {what} of `{}`: process has not finished (poll is_finished first)",
                self.command_line
            ))),
        }
    }
}

impl RunningProcess {
    /// Drain whatever is left in both pipes. The child has already exited,
    /// so both reads end at EOF.
    async fn finalize(&mut self, status: ExitStatus) -> Result<FinishedProcess> {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        tokio::try_join!(
            self.stdout.read_to_end(&mut stdout),
            self.stderr.read_to_end(&mut stderr),
        )?;

        Ok(FinishedProcess {
            output: String::from_utf8_lossy(&stdout).into_owned(),
            raw_output: stdout,
            error_output: String::from_utf8_lossy(&stderr).into_owned(),
            status_code: exit_code(status),
        })
    }
}

/// Exit code of the child; on unix a signal death maps to `128 + signal`.
fn exit_code(status: ExitStatus) -> ExitCode {
    status
        .code()
        .or_else(|| signal_exit_code(status))
        .unwrap_or(UNKNOWN_EXIT_CODE)
}

#[cfg(unix)]
fn signal_exit_code(status: ExitStatus) -> Option<ExitCode> {
    use std::os::unix::process::ExitStatusExt;
    status.signal().map(|signal| 128 + signal)
}

#[cfg(not(unix))]
fn signal_exit_code(_status: ExitStatus) -> Option<ExitCode> {
    None
}

fn missing_pipe(command_line: &CommandLine, pipe: &str) -> ParlintError {
    ParlintError::SpawnError {
        command: command_line.to_string(),
        source: std::io::Error::other(format!("{pipe} pipe was not captured")),
    }
}
