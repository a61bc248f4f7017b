//! Decides how a snippet is checked.
//!
//! Samples that read interactive input cannot run unattended, so they are
//! only compiled. Everything else is compiled and executed.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static INPUT_WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\binput\b").unwrap());

/// How a snippet is handed to the toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionMode {
    /// Type-check and compile only; the program is never started.
    CompileOnly,
    /// Compile and execute the program.
    CompileAndRun,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CompileOnly => write!(f, "compile-only"),
            Self::CompileAndRun => write!(f, "compile-and-run"),
        }
    }
}

/// Classify snippet text.
///
/// The standalone word `input` selects [`ExecutionMode::CompileOnly`]; the
/// same letters inside a longer identifier do not.
pub fn classify(code: &str) -> ExecutionMode {
    if INPUT_WORD_REGEX.is_match(code) {
        ExecutionMode::CompileOnly
    } else {
        ExecutionMode::CompileAndRun
    }
}
