//! Documentation sample verification for the Neon toolchain.
//!
//! Markdown files are scanned for indented code samples; each sample is fed
//! to the Neon compiler or interpreter on stdin and must exit successfully.
//! The [`build_run`] module backs the `neon-run` helper binary.

pub mod build_run;
pub mod classifier;
pub mod config;
pub mod driver;
pub mod executor;
pub mod exit_codes;
pub mod extractor;
pub mod source;

pub use classifier::{ExecutionMode, classify};
pub use config::{BuildRunConfig, ConfigError, ToolchainConfig};
pub use driver::{Outcome, VerifyError, VerifySummary, Verifier, run};
pub use executor::{ExecutorError, SnippetRunner, ToolStatus, ToolchainInvoker};
pub use extractor::{Snippet, extract};
pub use source::{DocumentFile, Enumeration, Selector, SourceError, enumerate};
