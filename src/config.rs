use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::patterns::DEFAULT_IGNORE_FILE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackConfig {
    /// Extra ignore patterns supplied by the caller.
    pub ignore: Vec<String>,
    /// Ignore file looked up at the working-tree root.
    pub ignore_file: String,
    /// Consult `git check-ignore` for paths no pattern matched.
    pub vcs_ignore: bool,
    /// Where to write the document; stdout when absent.
    pub output: Option<PathBuf>,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            ignore: Vec::new(),
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
            vcs_ignore: true,
            output: None,
        }
    }
}

impl PackConfig {
    pub fn trace_loaded(&self) {
        info!(
            ignore_count = self.ignore.len(),
            ignore_file = %self.ignore_file,
            vcs_ignore = self.vcs_ignore,
            output = ?self.output,
            "Loaded PackConfig"
        );
        debug!(?self, "PackConfig loaded (full debug)");
    }
}
