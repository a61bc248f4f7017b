//! Compile a single Neon source file, then run the result.
//!
//! The build step runs the toolchain on the builder script; the run step
//! executes the produced artifact (the source path without its extension)
//! with the caller's arguments. Either step failing stops the pipeline.

use crate::config::BuildRunConfig;
use crate::executor::ToolStatus;
use crate::exit_codes;
use std::ffi::OsStr;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// The two stages of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Build,
    Run,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Build => write!(f, "build"),
            Self::Run => write!(f, "run"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BuildRunError {
    #[error("The {step} step failed with {status}")]
    StepFailed { step: Step, status: ToolStatus },

    #[error("Failed to launch the {step} step ('{}'): {source}", .program.display())]
    Spawn {
        step: Step,
        program: PathBuf,
        source: io::Error,
    },

    #[error("Cannot resolve the artifact for {}: {source}", .path.display())]
    Artifact { path: PathBuf, source: io::Error },
}

impl BuildRunError {
    /// Process exit code the wrapper should end with.
    ///
    /// A failing step hands its own code through; a step killed by a signal
    /// maps to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::StepFailed { status, .. } => status.code.unwrap_or(1),
            Self::Spawn { .. } | Self::Artifact { .. } => exit_codes::TOOL_ERROR,
        }
    }
}

/// Absolute path of the executable built from `source`.
pub fn artifact_path(source: &Path) -> io::Result<PathBuf> {
    std::path::absolute(source.with_extension(""))
}

/// Builds and runs Neon programs.
#[derive(Debug, Clone, Default)]
pub struct BuildAndRun {
    config: BuildRunConfig,
}

impl BuildAndRun {
    pub fn new(config: BuildRunConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuildRunConfig {
        &self.config
    }

    /// Build `source` with the builder script.
    pub fn build(&self, source: &Path) -> Result<(), BuildRunError> {
        let program = &self.config.neon;
        log::debug!("Building {} with {}", source.display(), program.display());
        let mut cmd = Command::new(program);
        cmd.arg(&self.config.builder_script).arg(source);
        run_step(Step::Build, program, cmd)
    }

    /// Run the artifact built from `source`, forwarding `args` verbatim.
    pub fn run<I, S>(&self, source: &Path, args: I) -> Result<(), BuildRunError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let artifact = artifact_path(source).map_err(|e| BuildRunError::Artifact {
            path: source.to_path_buf(),
            source: e,
        })?;
        log::debug!("Running {}", artifact.display());
        let mut cmd = Command::new(&artifact);
        cmd.args(args);
        run_step(Step::Run, &artifact, cmd)
    }

    /// Build, then run.
    pub fn build_and_run<I, S>(&self, source: &Path, args: I) -> Result<(), BuildRunError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.build(source)?;
        self.run(source, args)
    }
}

fn run_step(step: Step, program: &Path, mut cmd: Command) -> Result<(), BuildRunError> {
    let status = cmd.status().map_err(|source| BuildRunError::Spawn {
        step,
        program: program.to_path_buf(),
        source,
    })?;
    let status = ToolStatus::from(status);
    if status.success() {
        Ok(())
    } else {
        Err(BuildRunError::StepFailed { step, status })
    }
}
