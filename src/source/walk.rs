//! Local directory walk

use super::{Documents, DocumentFile, SourceError, is_documentation};
use ignore::WalkBuilder;
use std::fs;
use std::path::Path;

/// Walk `root` recursively and lazily read every Markdown file under it.
///
/// Nothing is filtered besides the extension: hidden entries and files
/// listed in `.gitignore` are visited too. Entries are sorted by file name
/// so the order is stable between runs. Entries the walk cannot list are
/// logged and skipped; a Markdown file that cannot be read is an error.
pub(super) fn enumerate(root: &Path) -> Result<Documents, SourceError> {
    if !root.exists() {
        return Err(SourceError::MissingRoot {
            path: root.to_path_buf(),
        });
    }

    let mut walk_builder = WalkBuilder::new(root);
    walk_builder.standard_filters(false);
    walk_builder.follow_links(false);
    walk_builder.sort_by_file_name(|a, b| a.cmp(b));

    let documents = walk_builder.build().filter_map(|result| match result {
        Ok(entry) => {
            let path = entry.path();
            // Symlinked files count, symlinked directories are not descended
            if !path.is_file() || !is_documentation(&entry.file_name().to_string_lossy()) {
                return None;
            }
            Some(read_document(path))
        }
        // Directories that cannot be listed are skipped, not fatal
        Err(e) => {
            log::warn!("Skipping walk entry: {e}");
            None
        }
    });

    Ok(Box::new(documents))
}

fn read_document(path: &Path) -> Result<DocumentFile, SourceError> {
    log::trace!("Reading {}", path.display());
    let bytes = fs::read(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(DocumentFile {
        name: path.to_string_lossy().to_string(),
        text: String::from_utf8_lossy(&bytes).into_owned(),
    })
}
