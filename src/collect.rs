//! Working-tree walk that prunes ignored directories before descending.

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::contract::Repository;
use crate::ignore_policy::IgnorePolicy;

/// Walk `root` and return every non-ignored file, sorted by path.
///
/// Ignored directories are filtered before the walker descends, so nothing below
/// them is ever visited. Symlinked directories are not followed; symlinks to files
/// are kept. Unreadable entries are logged and skipped.
pub fn collect_files<R: Repository>(root: &Path, policy: &IgnorePolicy<'_, R>) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !policy.is_ignored(entry.path()));

    let mut files = Vec::new();
    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Failed to read directory entry, skipping");
                continue;
            }
        };
        if entry.depth() > 0 && entry.path().is_file() {
            files.push(entry.into_path());
        }
    }

    // Path ordering is per component, which is the order the tree renders leaves in.
    files.sort();
    info!(root = %root.display(), count = files.len(), "Collected files");
    files
}
