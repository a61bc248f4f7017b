//! Documents from a git tree-ish, read with the `git` command line tool

use super::{DocumentFile, Enumeration, SourceError, is_documentation};
use std::process::Command;

/// List the Markdown files in `reference` and fetch each one on demand.
///
/// A missing `git` binary or an unknown reference yields
/// [`Enumeration::Unavailable`].
pub(super) fn enumerate(reference: &str) -> Enumeration {
    let names = match list_tree(reference) {
        Ok(names) => names,
        Err(reason) => return Enumeration::Unavailable { reason },
    };

    let reference = reference.to_string();
    let documents = names
        .into_iter()
        .filter(|name| is_documentation(name))
        .map(move |name| -> Result<DocumentFile, SourceError> {
            let text = show(&reference, &name)?;
            Ok(DocumentFile { name, text })
        });

    Enumeration::Documents(Box::new(documents))
}

fn list_tree(reference: &str) -> Result<Vec<String>, String> {
    let output = Command::new("git")
        .args(["ls-tree", "-r", "-z", "--name-only", reference])
        .output()
        .map_err(|e| format!("git is not available: {e}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("cannot list '{reference}': {}", stderr.trim()));
    }

    Ok(parse_ls_tree(&String::from_utf8_lossy(&output.stdout)))
}

/// Split NUL-terminated `git ls-tree -z` output into names.
fn parse_ls_tree(stdout: &str) -> Vec<String> {
    stdout
        .split('\0')
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn show(reference: &str, name: &str) -> Result<String, SourceError> {
    let git_show_error = |message: String| SourceError::GitShow {
        reference: reference.to_string(),
        name: name.to_string(),
        message,
    };

    let output = Command::new("git")
        .arg("show")
        .arg(format!("{reference}:{name}"))
        .output()
        .map_err(|e| git_show_error(e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(git_show_error(stderr.trim().to_string()));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
