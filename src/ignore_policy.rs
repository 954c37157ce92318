//! Per-path ignore decision: static patterns, then the VCS.

use std::path::Path;

use tracing::{debug, warn};

use crate::contract::Repository;
use crate::patterns::PatternSet;

/// Decides per path whether it is excluded from the pack.
///
/// Static patterns are consulted first; only paths they leave alone (and that
/// exist on disk) are handed to the VCS. A failing VCS query never ignores a path.
pub struct IgnorePolicy<'a, R: Repository> {
    root: &'a Path,
    patterns: &'a PatternSet,
    repo: &'a R,
    use_vcs_ignore: bool,
}

impl<'a, R: Repository> IgnorePolicy<'a, R> {
    pub fn new(
        root: &'a Path,
        patterns: &'a PatternSet,
        repo: &'a R,
        use_vcs_ignore: bool,
    ) -> Self {
        Self {
            root,
            patterns,
            repo,
            use_vcs_ignore,
        }
    }

    pub fn is_ignored(&self, path: &Path) -> bool {
        let rel_path = path.strip_prefix(self.root).unwrap_or(path);
        let is_dir = path.is_dir();

        if let Some(source) = self.patterns.matching_source(rel_path, is_dir) {
            debug!(path = %rel_path.display(), ?source, "Ignored by pattern");
            return true;
        }

        if !self.use_vcs_ignore || !path.exists() {
            return false;
        }

        match self.repo.check_ignore(rel_path) {
            Ok(ignored) => {
                if ignored {
                    debug!(path = %rel_path.display(), "Ignored by VCS");
                }
                ignored
            }
            Err(e) => {
                warn!(
                    path = %rel_path.display(),
                    error = %e,
                    "VCS ignore check failed, keeping path"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{MockRepository, VcsError};

    #[test]
    fn test_missing_path_is_not_sent_to_vcs() {
        let dir = tempfile::tempdir().unwrap();
        let patterns = PatternSet::from_sources(Vec::new(), Vec::new());
        let mut repo = MockRepository::new();
        repo.expect_check_ignore().never();

        let policy = IgnorePolicy::new(dir.path(), &patterns, &repo, true);
        assert!(!policy.is_ignored(&dir.path().join("ghost.rs")));
        // static patterns still apply to paths that do not exist
        assert!(policy.is_ignored(&dir.path().join("yarn.lock")));
    }

    #[test]
    fn test_vcs_error_fails_open() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.rs"), "").unwrap();
        let patterns = PatternSet::from_sources(Vec::new(), Vec::new());
        let mut repo = MockRepository::new();
        repo.expect_check_ignore()
            .times(1)
            .returning(|p: &Path| Err(VcsError::NonUtf8Path(p.to_path_buf())));

        let policy = IgnorePolicy::new(dir.path(), &patterns, &repo, true);
        assert!(!policy.is_ignored(&dir.path().join("a.rs")));
    }
}
