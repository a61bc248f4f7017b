//! Documentation file enumeration.
//!
//! Documents come either from a git reference (`origin/gh-pages:`) or from a
//! recursive walk of a local directory. Both produce the same lazy stream of
//! [`DocumentFile`]s, restricted to Markdown files.

mod git;
mod walk;

use std::io;
use std::path::PathBuf;

/// File name suffix of documentation sources.
pub const DOC_EXTENSION: &str = ".md";

/// One documentation file, read fully into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFile {
    /// Filesystem path or repository-relative name.
    pub name: String,
    pub text: String,
}

/// Errors raised while enumerating or reading documents.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Path not found: {}", .path.display())]
    MissingRoot { path: PathBuf },

    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to fetch {reference}:{name} from git: {message}")]
    GitShow {
        reference: String,
        name: String,
        message: String,
    },
}

/// Lazy, one-shot stream of documents.
pub type Documents = Box<dyn Iterator<Item = Result<DocumentFile, SourceError>>>;

/// Where documents are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Recursive walk starting at a local path.
    Path(PathBuf),
    /// Every file in a git tree-ish such as `origin/gh-pages`.
    GitRef(String),
}

impl Selector {
    /// Interpret the command-line selector.
    ///
    /// A trailing `:` selects a git reference, anything else is a path, and
    /// no selector at all means the current directory.
    pub fn parse(arg: Option<&str>) -> Self {
        match arg {
            None => Self::Path(PathBuf::from(".")),
            Some(s) => match s.strip_suffix(':') {
                Some(reference) => Self::GitRef(reference.to_string()),
                None => Self::Path(PathBuf::from(s)),
            },
        }
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::parse(None)
    }
}

/// Result of asking a source for its documents.
pub enum Enumeration {
    Documents(Documents),
    /// The source cannot be consulted here (no git, unknown reference).
    /// Treated as "nothing to check" rather than as a failure.
    Unavailable { reason: String },
}

impl std::fmt::Debug for Enumeration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Documents(_) => f.write_str("Documents(..)"),
            Self::Unavailable { reason } => f.debug_struct("Unavailable").field("reason", reason).finish(),
        }
    }
}

/// Open the source named by `selector`.
pub fn enumerate(selector: &Selector) -> Result<Enumeration, SourceError> {
    match selector {
        Selector::GitRef(reference) => Ok(git::enumerate(reference)),
        Selector::Path(root) => walk::enumerate(root).map(Enumeration::Documents),
    }
}

pub(crate) fn is_documentation(name: &str) -> bool {
    name.ends_with(DOC_EXTENSION)
}
