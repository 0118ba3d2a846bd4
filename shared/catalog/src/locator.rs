//! Structure Record Locator
//!
//! A structure file for identifier `X` is named `X.<ext>` and lives either
//! directly under the catalog root or in exactly one of its immediate
//! sub-directories. Absence is not an error: it means the identifier has
//! no defined structure and resolves as a leaf.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Probes for the structure file of `identifier`: the root first, then
/// each immediate sub-directory in sorted order. Never searches deeper
/// than one level.
pub fn find_structure_file(root: &Path, identifier: &str, extension: &str) -> Option<PathBuf> {
    let file_name = format!("{}.{}", identifier.trim(), extension);

    let direct = root.join(&file_name);
    if direct.is_file() {
        return Some(direct);
    }

    let entries = fs::read_dir(root).ok()?;
    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();

    for dir in dirs {
        let candidate = dir.join(&file_name);
        if candidate.is_file() {
            debug!(path = %candidate.display(), "Located structure file in sub-directory");
            return Some(candidate);
        }
    }

    None
}
