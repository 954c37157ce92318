use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, error, info};

use crate::contract::{Repository, VcsError};

/// Error locating a working tree.
#[derive(Debug)]
pub enum RepoError {
    NotFound(PathBuf),
    Io(std::io::Error),
}

impl fmt::Display for RepoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoError::NotFound(p) => {
                write!(f, "No Git repository found at or above {}", p.display())
            }
            RepoError::Io(e) => write!(f, "failed to resolve repository path: {e}"),
        }
    }
}

impl std::error::Error for RepoError {}

impl From<std::io::Error> for RepoError {
    fn from(e: std::io::Error) -> Self {
        RepoError::Io(e)
    }
}

/// A git working tree, queried through the `git` executable.
#[derive(Debug, Clone)]
pub struct GitRepository {
    root: PathBuf,
}

impl GitRepository {
    /// Open the working tree rooted exactly at `root`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, RepoError> {
        let root = root.as_ref().canonicalize()?;
        if !root.join(".git").exists() {
            return Err(RepoError::NotFound(root));
        }
        Ok(Self { root })
    }

    /// Walk up from `start` to the nearest directory holding a `.git` entry.
    pub fn discover(start: impl AsRef<Path>) -> Result<Self, RepoError> {
        let start = start.as_ref().canonicalize()?;
        for dir in start.ancestors() {
            if dir.join(".git").exists() {
                info!(root = %dir.display(), "Found git working tree");
                return Ok(Self {
                    root: dir.to_path_buf(),
                });
            }
            debug!(path = %dir.display(), "No .git entry, trying parent");
        }
        error!(start = %start.display(), "No git repository found");
        Err(RepoError::NotFound(start))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Repository for GitRepository {
    fn working_dir(&self) -> PathBuf {
        self.root.clone()
    }

    // `git check-ignore -q` exits 0 when ignored, 1 when not, 128 on fatal errors.
    fn check_ignore(&self, rel_path: &Path) -> Result<bool, VcsError> {
        let rel = rel_path
            .to_str()
            .ok_or_else(|| VcsError::NonUtf8Path(rel_path.to_path_buf()))?;

        let output = Command::new("git")
            .arg("-C")
            .arg(&self.root)
            .args(["check-ignore", "-q", "--"])
            .arg(rel)
            .output()?;

        match output.status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            code => Err(VcsError::Command {
                code,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }),
        }
    }
}
