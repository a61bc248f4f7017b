//! Toolchain invocation.
//!
//! Each snippet is piped into a fresh toolchain process on stdin. The pipe
//! is closed once the snippet is written so the child sees end-of-input, and
//! the caller blocks until the process exits. There is no timeout.

use crate::classifier::ExecutionMode;
use crate::config::ToolchainConfig;
use std::ffi::OsStr;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Error launching or talking to a toolchain process.
#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    /// The executable could not be started.
    #[error("Failed to spawn '{}': {source}", .tool.display())]
    Spawn { tool: PathBuf, source: io::Error },
    /// The snippet could not be written to the child's stdin.
    #[error("Failed to write to stdin of '{}': {source}", .tool.display())]
    Stdin { tool: PathBuf, source: io::Error },
    /// Waiting for the child failed.
    #[error("Failed to wait for '{}': {source}", .tool.display())]
    Wait { tool: PathBuf, source: io::Error },
}

/// How a toolchain process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStatus {
    /// Exit code, or `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl ToolStatus {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for ToolStatus {
    fn from(status: ExitStatus) -> Self {
        Self { code: status.code() }
    }
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => write!(f, "terminated by signal"),
        }
    }
}

/// Something that can check a snippet in a given mode.
pub trait SnippetRunner {
    fn run_snippet(&self, mode: ExecutionMode, code: &str) -> Result<ToolStatus, ExecutorError>;
}

impl<T: SnippetRunner + ?Sized> SnippetRunner for &T {
    fn run_snippet(&self, mode: ExecutionMode, code: &str) -> Result<ToolStatus, ExecutorError> {
        (**self).run_snippet(mode, code)
    }
}

/// Launch `executable` with `args`, feed it `stdin_text`, and wait.
///
/// Stdout and stderr are inherited so toolchain diagnostics reach the user.
pub fn run<I, S>(executable: &Path, args: I, stdin_text: &str) -> Result<ToolStatus, ExecutorError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut child = Command::new(executable)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|source| ExecutorError::Spawn {
            tool: executable.to_path_buf(),
            source,
        })?;

    // Dropping the handle at the end of this block closes the pipe
    if let Some(mut stdin) = child.stdin.take() {
        match stdin.write_all(stdin_text.as_bytes()) {
            Ok(()) => {}
            // The child stopped reading early; its exit status tells the story
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                log::debug!("{} closed stdin early", executable.display());
            }
            Err(source) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ExecutorError::Stdin {
                    tool: executable.to_path_buf(),
                    source,
                });
            }
        }
    }

    let status = child.wait().map_err(|source| ExecutorError::Wait {
        tool: executable.to_path_buf(),
        source,
    })?;

    Ok(status.into())
}

/// Runs snippets through the configured Neon toolchain.
#[derive(Debug, Clone, Default)]
pub struct ToolchainInvoker {
    config: ToolchainConfig,
}

impl ToolchainInvoker {
    pub fn new(config: ToolchainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ToolchainConfig {
        &self.config
    }

    /// The executable responsible for `mode`.
    pub fn executable_for(&self, mode: ExecutionMode) -> &Path {
        match mode {
            ExecutionMode::CompileOnly => &self.config.compile_only,
            ExecutionMode::CompileAndRun => &self.config.compile_and_run,
        }
    }
}

impl SnippetRunner for ToolchainInvoker {
    fn run_snippet(&self, mode: ExecutionMode, code: &str) -> Result<ToolStatus, ExecutorError> {
        let executable = self.executable_for(mode);
        log::debug!("Running {} ({mode})", executable.display());
        run(executable, [self.config.stdin_arg.as_str()], code)
    }
}
