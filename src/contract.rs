//! # contract: the packer's view of the repository it reads
//!
//! The packing pipeline needs exactly two things from the version-control side:
//! the absolute path of the working tree, and a yes/no answer to "would the VCS
//! ignore this relative path?". Both live on the [`Repository`] trait so the
//! production git client and test mocks are interchangeable.
//!
//! ## Failure contract
//! - `check_ignore` may fail for any reason (missing binary, not a repository,
//!   non-UTF-8 path). Callers treat every failure as "not ignored".
//! - The trait is read-only; a single handle is queried sequentially during one pack.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall`, so tests can script per-path answers
//!   and failures without a real repository on disk.

use std::fmt;
use std::path::{Path, PathBuf};

use mockall::automock;

/// Handle on a version-controlled working tree.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait Repository {
    /// Absolute path of the working-tree root.
    fn working_dir(&self) -> PathBuf;

    /// Ask the VCS whether `rel_path` (relative to the working-tree root) is ignored.
    fn check_ignore(&self, rel_path: &Path) -> Result<bool, VcsError>;
}

/// Failure of a single VCS ignore query.
#[derive(Debug)]
pub enum VcsError {
    Io(std::io::Error),
    NonUtf8Path(PathBuf),
    Command { code: Option<i32>, stderr: String },
}

impl fmt::Display for VcsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VcsError::Io(e) => write!(f, "failed to run git: {e}"),
            VcsError::NonUtf8Path(p) => write!(f, "path is not valid UTF-8: {}", p.display()),
            VcsError::Command { code, stderr } => match code {
                Some(code) => write!(f, "git exited with code {code}: {}", stderr.trim()),
                None => write!(f, "git terminated by signal: {}", stderr.trim()),
            },
        }
    }
}

impl std::error::Error for VcsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VcsError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VcsError {
    fn from(e: std::io::Error) -> Self {
        VcsError::Io(e)
    }
}
