//! Verification driver.
//!
//! Files are checked one after another and snippets within a file in order.
//! The first snippet whose toolchain run fails ends the whole pass; nothing
//! after it is executed.

use crate::classifier::{ExecutionMode, classify};
use crate::config::ToolchainConfig;
use crate::executor::{ExecutorError, SnippetRunner, ToolStatus, ToolchainInvoker};
use crate::extractor::extract;
use crate::source::{self, DocumentFile, Enumeration, Selector, SourceError};

/// Errors that end a verification pass.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// A snippet's toolchain run exited unsuccessfully.
    #[error("Snippet #{} in {file} (line {line}) failed in {mode} mode: {status}", .index + 1)]
    SnippetFailed {
        file: String,
        index: usize,
        line: usize,
        mode: ExecutionMode,
        status: ToolStatus,
    },

    /// The toolchain could not be run at all.
    #[error("Failed to check {file}: {source}")]
    Toolchain {
        file: String,
        #[source]
        source: ExecutorError,
    },

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Counts gathered over a successful pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerifySummary {
    pub files: usize,
    pub snippets: usize,
    pub compile_only: usize,
}

/// How a complete run ended, short of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Verified(VerifySummary),
    /// The requested source could not be consulted; nothing was checked.
    SourceUnavailable { reason: String },
}

/// Checks documents with a [`SnippetRunner`].
pub struct Verifier<R> {
    runner: R,
}

impl<R: SnippetRunner> Verifier<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Check every snippet in one document, stopping at the first failure.
    pub fn check_document(&self, doc: &DocumentFile, summary: &mut VerifySummary) -> Result<(), VerifyError> {
        for snippet in extract(&doc.text) {
            let mode = classify(&snippet.code);
            log::debug!("{}: snippet #{} at line {} ({mode})", doc.name, snippet.index + 1, snippet.line);

            let status = self
                .runner
                .run_snippet(mode, &snippet.code)
                .map_err(|source| VerifyError::Toolchain {
                    file: doc.name.clone(),
                    source,
                })?;

            summary.snippets += 1;
            if mode == ExecutionMode::CompileOnly {
                summary.compile_only += 1;
            }

            if !status.success() {
                return Err(VerifyError::SnippetFailed {
                    file: doc.name.clone(),
                    index: snippet.index,
                    line: snippet.line,
                    mode,
                    status,
                });
            }
        }
        Ok(())
    }

    /// Check a stream of documents in order.
    pub fn verify<I>(&self, documents: I) -> Result<VerifySummary, VerifyError>
    where
        I: IntoIterator<Item = Result<DocumentFile, SourceError>>,
    {
        let mut summary = VerifySummary::default();
        for doc in documents {
            let doc = doc?;
            println!("Checking {}...", doc.name);
            self.check_document(&doc, &mut summary)?;
            summary.files += 1;
        }
        log::debug!(
            "Checked {} snippets ({} compile-only) in {} files",
            summary.snippets,
            summary.compile_only,
            summary.files
        );
        Ok(summary)
    }
}

/// Enumerate `selector` and verify everything found with the Neon toolchain.
pub fn run(selector: &Selector, config: ToolchainConfig) -> Result<Outcome, VerifyError> {
    run_with(selector, ToolchainInvoker::new(config))
}

/// Like [`run`], with a caller-supplied runner.
pub fn run_with<R: SnippetRunner>(selector: &Selector, runner: R) -> Result<Outcome, VerifyError> {
    match source::enumerate(selector)? {
        Enumeration::Unavailable { reason } => {
            log::info!("Nothing to check: {reason}");
            Ok(Outcome::SourceUnavailable { reason })
        }
        Enumeration::Documents(documents) => Verifier::new(runner).verify(documents).map(Outcome::Verified),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records every call and fails the call with the given number.
    #[derive(Default)]
    struct RecordingRunner {
        calls: RefCell<Vec<(ExecutionMode, String)>>,
        fail_on: Option<usize>,
    }

    impl SnippetRunner for RecordingRunner {
        fn run_snippet(&self, mode: ExecutionMode, code: &str) -> Result<ToolStatus, ExecutorError> {
            let mut calls = self.calls.borrow_mut();
            calls.push((mode, code.to_string()));
            let code = if self.fail_on == Some(calls.len()) { 1 } else { 0 };
            Ok(ToolStatus { code: Some(code) })
        }
    }

    fn doc(name: &str, text: &str) -> Result<DocumentFile, SourceError> {
        Ok(DocumentFile {
            name: name.to_string(),
            text: text.to_string(),
        })
    }

    #[test]
    fn test_single_block_runs_once() {
        let verifier = Verifier::new(RecordingRunner::default());
        let summary = verifier
            .verify([doc("a.md", "Intro\n\n    print(1)\n    print(2)\n\nEnd\n")])
            .unwrap();

        let calls = verifier.runner().calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], (ExecutionMode::CompileAndRun, "print(1)\nprint(2)\n".to_string()));
        assert_eq!(
            summary,
            VerifySummary {
                files: 1,
                snippets: 1,
                compile_only: 0
            }
        );
    }

    #[test]
    fn test_modes_are_routed() {
        let verifier = Verifier::new(RecordingRunner::default());
        let text = "A\n\n    LET n := input(\"? \")\n\nB\n\n    VAR myinputvalue := 1\n";
        let summary = verifier.verify([doc("modes.md", text)]).unwrap();

        let modes: Vec<ExecutionMode> = verifier.runner().calls.borrow().iter().map(|(m, _)| *m).collect();
        assert_eq!(modes, vec![ExecutionMode::CompileOnly, ExecutionMode::CompileAndRun]);
        assert_eq!(summary.compile_only, 1);
    }

    #[test]
    fn test_prose_only_runs_nothing() {
        let verifier = Verifier::new(RecordingRunner::default());
        let summary = verifier.verify([doc("prose.md", "# Title\n\nJust words.\n")]).unwrap();
        assert!(verifier.runner().calls.borrow().is_empty());
        assert_eq!(summary.files, 1);
    }

    #[test]
    fn test_failure_stops_everything_after_it() {
        let verifier = Verifier::new(RecordingRunner {
            fail_on: Some(2),
            ..Default::default()
        });
        let result = verifier.verify([
            doc("one.md", "A\n\n    first()\n\nB\n\n    second()\n\nC\n\n    third()\n"),
            doc("two.md", "A\n\n    fourth()\n"),
        ]);

        let err = result.unwrap_err();
        match &err {
            VerifyError::SnippetFailed { file, index, line, .. } => {
                assert_eq!(file, "one.md");
                assert_eq!(*index, 1);
                assert_eq!(*line, 7);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(verifier.runner().calls.borrow().len(), 2);
        assert!(err.to_string().contains("Snippet #2 in one.md (line 7)"));
    }

    #[test]
    fn test_source_error_aborts() {
        let verifier = Verifier::new(RecordingRunner::default());
        let result = verifier.verify([
            Err(SourceError::MissingRoot {
                path: "gone".into(),
            }),
            doc("later.md", "\n    never()\n"),
        ]);
        assert!(matches!(result, Err(VerifyError::Source(_))));
        assert!(verifier.runner().calls.borrow().is_empty());
    }

    #[test]
    fn test_unavailable_git_reference_runs_nothing() {
        let runner = RecordingRunner::default();
        let selector = Selector::GitRef("refs/heads/no-such-branch-for-doccheck-tests".to_string());
        let outcome = run_with(&selector, &runner).unwrap();
        assert!(matches!(outcome, Outcome::SourceUnavailable { .. }));
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_spawn_failure_is_a_toolchain_error() {
        struct Missing;
        impl SnippetRunner for Missing {
            fn run_snippet(&self, _: ExecutionMode, _: &str) -> Result<ToolStatus, ExecutorError> {
                Err(ExecutorError::Spawn {
                    tool: "bin/neon".into(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                })
            }
        }

        let result = Verifier::new(Missing).verify([doc("x.md", "\n    print(1)\n")]);
        assert!(matches!(result, Err(VerifyError::Toolchain { ref file, .. }) if file == "x.md"));
    }
}
