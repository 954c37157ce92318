//! Document assembly: collect survivors, render the tree, classify each file and
//! serialize text files into one document. Binary files only show up in the tree.
//! A file that fails to read is replaced by an inline error line; packing never aborts.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::binary::is_binary_file;
use crate::collect::collect_files;
use crate::config::PackConfig;
use crate::contract::Repository;
use crate::ignore_policy::IgnorePolicy;
use crate::patterns::{slash_path, PatternSet, DEFAULT_IGNORE_FILE};
use crate::tree::render_tree;

const SECTION_RULE: &str = "================================================================";
// 16 wide, matching the separator the "File Format" notes below describe.
const FILE_RULE: &str = "================";

const BANNER: &str = "This file is a merged representation of a subset of the codebase, containing files not matching ignore patterns, combined into a single document by Repomix.";

/// Options fixed for the lifetime of a [`Packer`].
#[derive(Debug, Clone)]
pub struct PackOptions {
    /// Caller-supplied patterns, applied after the defaults and the ignore file.
    pub ignore_patterns: Vec<String>,
    /// Name of the ignore file looked up at the working-tree root.
    pub ignore_file: String,
    /// Ask the VCS about paths no static pattern matched.
    pub use_vcs_ignore: bool,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            ignore_patterns: Vec::new(),
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
            use_vcs_ignore: true,
        }
    }
}

impl From<&PackConfig> for PackOptions {
    fn from(config: &PackConfig) -> Self {
        Self {
            ignore_patterns: config.ignore.clone(),
            ignore_file: config.ignore_file.clone(),
            use_vcs_ignore: config.vcs_ignore,
        }
    }
}

/// A collected file, valid for one pack call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    pub relative_path: PathBuf,
    pub is_binary: bool,
}

/// Packs a working tree into a single text document.
pub struct Packer<R: Repository> {
    repo: R,
    root: PathBuf,
    options: PackOptions,
    patterns: PatternSet,
}

impl<R: Repository> Packer<R> {
    pub fn new(repo: R, options: PackOptions) -> Self {
        let root = repo.working_dir();
        let patterns = PatternSet::new(&root, &options.ignore_file, &options.ignore_patterns);
        Self {
            repo,
            root,
            options,
            patterns,
        }
    }

    /// Collect, classify and serialize the working tree.
    pub fn pack(&self) -> String {
        info!(root = %self.root.display(), "Starting pack");
        let records = self.collect();
        let rel_paths: Vec<&Path> = records.iter().map(|r| r.relative_path.as_path()).collect();
        let tree = render_tree(&rel_paths);

        let mut output = self.header_lines();

        output.push(SECTION_RULE.to_string());
        output.push("Directory Structure".to_string());
        output.push(SECTION_RULE.to_string());
        output.push(tree);
        output.push(String::new());

        output.push(SECTION_RULE.to_string());
        output.push("Files".to_string());
        output.push(SECTION_RULE.to_string());
        output.push(String::new());

        let mut emitted = 0;
        for record in records.iter().filter(|r| !r.is_binary) {
            output.push(FILE_RULE.to_string());
            output.push(format!("File: {}", slash_path(&record.relative_path)));
            output.push(FILE_RULE.to_string());
            output.push(read_text(&record.path));
            output.push(String::new());
            emitted += 1;
        }

        info!(
            files = records.len(),
            text_files = emitted,
            binary_files = records.len() - emitted,
            "Pack completed"
        );
        output.join("\n")
    }

    /// Every surviving file in sorted order, with its binary classification.
    pub fn collect(&self) -> Vec<FileRecord> {
        let policy = IgnorePolicy::new(
            &self.root,
            &self.patterns,
            &self.repo,
            self.options.use_vcs_ignore,
        );
        collect_files(&self.root, &policy)
            .into_iter()
            .map(|path| {
                let relative_path = path
                    .strip_prefix(&self.root)
                    .unwrap_or(path.as_path())
                    .to_path_buf();
                let is_binary = is_binary_file(&path);
                debug!(path = %relative_path.display(), is_binary, "Classified file");
                FileRecord {
                    path,
                    relative_path,
                    is_binary,
                }
            })
            .collect()
    }

    fn header_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = vec![
            BANNER,
            "",
            SECTION_RULE,
            "File Summary",
            SECTION_RULE,
            "",
            "Purpose:",
            "--------",
            "This file contains a packed representation of the entire repository's contents.",
            "It is designed to be easily consumable by AI systems for analysis, code review,",
            "or other automated processes.",
            "",
            "File Format:",
            "------------",
            "The content is organized as follows:",
            "1. This summary section",
            "2. Repository information",
            "3. Directory structure",
            "4. Multiple file entries, each consisting of:",
            "  a. A separator line (================)",
            "  b. The file path (File: path/to/file)",
            "  c. Another separator line",
            "  d. The full contents of the file",
            "  e. A blank line",
            "",
            "Usage Guidelines:",
            "-----------------",
            "- This file should be treated as read-only. Any changes should be made to the",
            "  original repository files, not this packed version.",
            "- When processing this file, use the file path to distinguish",
            "  between different files in the repository.",
            "- Be aware that this file may contain sensitive information. Handle it with",
            "  the same level of security as you would the original repository.",
            "",
            "Notes:",
            "------",
            "- Some files may have been excluded based on .gitignore rules and Repomix's configuration",
            "- Binary files are not included in this packed representation. Please refer to the Repository Structure section for a complete list of file paths, including binary files",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let overrides = self.patterns.override_patterns();
        if !overrides.is_empty() {
            lines.push(format!(
                "- Files matching these patterns are excluded: {}",
                overrides.join(", ")
            ));
        }

        lines.extend(
            [
                "- Files matching patterns in .gitignore are excluded",
                "- Files matching default ignore patterns are excluded",
                "",
                "Additional Info:",
                "----------------",
                "",
            ]
            .map(String::from),
        );
        lines
    }
}

/// File content with invalid UTF-8 replaced, or an inline marker if the read fails.
fn read_text(path: &Path) -> String {
    match std::fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            warn!(path = %path.display(), error = ?e, "Failed to read file content");
            format!("Error reading file: {e}")
        }
    }
}
