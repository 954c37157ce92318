//! Ignore patterns: the built-in default table, the repository ignore file, and
//! caller overrides, compiled once into a [`PatternSet`].
//!
//! Matching uses `globset` with `literal_separator(true)`: `*` and `?` stay inside
//! one path segment while `**` spans any number of segments. A pattern with no
//! `/` (other than a trailing one) matches the file or directory name at any
//! depth, so `*.md` excludes `docs/guide.md` too. A pattern of the form
//! `dir/**` also matches the directory `dir` itself, so the walker can prune it
//! before descending. A pattern with a trailing `/` only matches directories.

use std::fs;
use std::path::{Component, Path};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::{debug, info, warn};

/// Name of the optional repository-level ignore file.
pub const DEFAULT_IGNORE_FILE: &str = ".repomixignore";

/// Patterns every pack applies, regardless of configuration.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    ".git/**",
    ".hg/**",
    ".hgignore",
    ".svn/**",
    "**/node_modules/**",
    "**/bower_components/**",
    "**/jspm_packages/**",
    "vendor/**",
    "**/.bundle/**",
    "**/.gradle/**",
    "target/**",
    "logs/**",
    "**/*.log",
    "**/npm-debug.log*",
    "**/yarn-debug.log*",
    "**/yarn-error.log*",
    "pids/**",
    "*.pid",
    "*.seed",
    "*.pid.lock",
    "lib-cov/**",
    "coverage/**",
    ".nyc_output/**",
    ".grunt/**",
    ".lock-wscript",
    "build/Release/**",
    "typings/**",
    "**/.npm/**",
    ".eslintcache",
    ".rollup.cache/**",
    ".webpack.cache/**",
    ".parcel-cache/**",
    ".sass-cache/**",
    "*.cache",
    ".node_repl_history",
    "*.tgz",
    "**/.yarn/**",
    "**/.yarn-integrity",
    ".env",
    ".next/**",
    ".nuxt/**",
    ".vuepress/dist/**",
    ".serverless/**",
    ".fusebox/**",
    ".dynamodb/**",
    "dist/**",
    "**/.DS_Store",
    "**/Thumbs.db",
    ".idea/**",
    ".vscode/**",
    "**/*.swp",
    "**/*.swo",
    "**/*.swn",
    "**/*.bak",
    "build/**",
    "out/**",
    "tmp/**",
    "temp/**",
    "**/repomix-output.*",
    "**/repopack-output.*",
    "**/package-lock.json",
    "**/yarn-error.log",
    "**/yarn.lock",
    "**/pnpm-lock.yaml",
    "**/bun.lockb",
    "**/__pycache__/**",
    "**/*.py[cod]",
    "**/venv/**",
    "**/.venv/**",
    "**/.pytest_cache/**",
    "**/.mypy_cache/**",
    "**/.ipynb_checkpoints/**",
    "**/Pipfile.lock",
    "**/poetry.lock",
    "**/Cargo.lock",
    "**/Cargo.toml.orig",
    "**/target/**",
    "**/*.rs.bk",
    "**/composer.lock",
    "**/Gemfile.lock",
    "**/go.sum",
    "**/mix.lock",
    "**/stack.yaml.lock",
    "**/cabal.project.freeze",
];

/// Which of the three pattern sources produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternSource {
    Default,
    IgnoreFile,
    Override,
}

#[derive(Debug)]
struct Matcher {
    source: PatternSource,
    any: GlobSet,
    dirs_only: GlobSet,
}

impl Matcher {
    fn compile<S: AsRef<str>>(source: PatternSource, patterns: &[S]) -> Self {
        let mut any = GlobSetBuilder::new();
        let mut dirs_only = GlobSetBuilder::new();

        for raw in patterns {
            let raw = raw.as_ref().trim();
            let pattern = raw.trim_start_matches('/');
            if pattern.is_empty() {
                continue;
            }
            let pattern = anchor(pattern, raw.starts_with('/'));
            let pattern = pattern.as_str();

            if let Some(dir) = pattern.strip_suffix('/') {
                add_glob(&mut dirs_only, dir, raw);
                continue;
            }

            add_glob(&mut any, pattern, raw);
            if let Some(dir) = pattern.strip_suffix("/**") {
                add_glob(&mut dirs_only, dir, raw);
            }
        }

        Self {
            source,
            any: build_set(any, source),
            dirs_only: build_set(dirs_only, source),
        }
    }

    fn is_match(&self, rel: &str, is_dir: bool) -> bool {
        self.any.is_match(rel) || (is_dir && self.dirs_only.is_match(rel))
    }
}

/// A pattern without an inner `/` matches a basename at any depth, as in
/// gitignore; a leading `/` pins it to the root instead.
fn anchor(pattern: &str, rooted: bool) -> String {
    if rooted || pattern.trim_end_matches('/').contains('/') {
        pattern.to_string()
    } else {
        format!("**/{pattern}")
    }
}

fn add_glob(builder: &mut GlobSetBuilder, pattern: &str, raw: &str) {
    match GlobBuilder::new(pattern).literal_separator(true).build() {
        Ok(glob) => {
            builder.add(glob);
        }
        Err(e) => warn!(pattern = raw, error = %e, "Skipping invalid ignore pattern"),
    }
}

fn build_set(builder: GlobSetBuilder, source: PatternSource) -> GlobSet {
    builder.build().unwrap_or_else(|e| {
        warn!(?source, error = %e, "Failed to compile ignore patterns, source disabled");
        GlobSet::empty()
    })
}

/// Ignore patterns from all sources, compiled once per packer.
#[derive(Debug)]
pub struct PatternSet {
    override_patterns: Vec<String>,
    matchers: Vec<Matcher>,
}

impl PatternSet {
    /// Build from the defaults, `root/<ignore_file>` (if present) and `overrides`.
    pub fn new(root: &Path, ignore_file: &str, overrides: &[String]) -> Self {
        let ignore_file_patterns = parse_ignore_file(&root.join(ignore_file));
        Self::from_sources(ignore_file_patterns, overrides.to_vec())
    }

    pub fn from_sources(ignore_file_patterns: Vec<String>, override_patterns: Vec<String>) -> Self {
        let matchers = vec![
            Matcher::compile(PatternSource::Default, DEFAULT_IGNORE_PATTERNS),
            Matcher::compile(PatternSource::IgnoreFile, &ignore_file_patterns),
            Matcher::compile(PatternSource::Override, &override_patterns),
        ];
        info!(
            defaults = DEFAULT_IGNORE_PATTERNS.len(),
            ignore_file = ignore_file_patterns.len(),
            overrides = override_patterns.len(),
            "Compiled ignore patterns"
        );
        Self {
            override_patterns,
            matchers,
        }
    }

    /// First source (in precedence order) with a pattern matching `rel_path`.
    pub fn matching_source(&self, rel_path: &Path, is_dir: bool) -> Option<PatternSource> {
        let rel = slash_path(rel_path);
        self.matchers
            .iter()
            .find(|m| m.is_match(&rel, is_dir))
            .map(|m| m.source)
    }

    pub fn is_match(&self, rel_path: &Path, is_dir: bool) -> bool {
        self.matching_source(rel_path, is_dir).is_some()
    }

    /// Caller-supplied patterns, verbatim and in the order given.
    pub fn override_patterns(&self) -> &[String] {
        &self.override_patterns
    }
}

/// Read an ignore file: one pattern per line, blank lines and `#` comments skipped.
/// A missing or unreadable file contributes no patterns.
pub fn parse_ignore_file(path: &Path) -> Vec<String> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No ignore file");
            return Vec::new();
        }
        Err(e) => {
            warn!(path = %path.display(), error = ?e, "Failed to read ignore file, ignoring it");
            return Vec::new();
        }
    };

    let patterns: Vec<String> = String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();
    debug!(path = %path.display(), count = patterns.len(), "Parsed ignore file");
    patterns
}

/// Join the normal components of `path` with `/`, whatever the platform separator.
pub fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(file: &[&str], overrides: &[&str]) -> PatternSet {
        PatternSet::from_sources(
            file.iter().map(|s| s.to_string()).collect(),
            overrides.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_globstar_matches_any_depth() {
        let patterns = set(&[], &[]);
        assert!(patterns.is_match(Path::new("node_modules/pkg/index.js"), false));
        assert!(patterns.is_match(Path::new("web/app/node_modules/pkg/index.js"), false));
        assert!(patterns.is_match(Path::new("a/b/c/debug.log"), false));
        assert!(patterns.is_match(Path::new("Cargo.lock"), false));
        assert!(patterns.is_match(Path::new("crates/x/Cargo.lock"), false));
        assert!(!patterns.is_match(Path::new("src/main.rs"), false));
    }

    #[test]
    fn test_directory_prefix_of_globstar_pattern_is_pruned() {
        let patterns = set(&[], &[]);
        assert!(patterns.is_match(Path::new(".git"), true));
        assert!(patterns.is_match(Path::new("node_modules"), true));
        assert!(patterns.is_match(Path::new("pkg/node_modules"), true));
        // only directories get the prefix treatment
        assert!(!patterns.is_match(Path::new("dist"), false));
        assert!(patterns.is_match(Path::new("dist"), true));
    }

    #[test]
    fn test_single_star_stays_in_one_segment() {
        let patterns = set(&["docs/*.md"], &[]);
        assert!(patterns.is_match(Path::new("docs/intro.md"), false));
        assert!(!patterns.is_match(Path::new("docs/guide/intro.md"), false));
        assert!(!patterns.is_match(Path::new("other/docs/intro.md"), false));
    }

    #[test]
    fn test_basename_pattern_matches_at_any_depth() {
        let patterns = set(&[], &["*.md"]);
        assert!(patterns.is_match(Path::new("README.md"), false));
        assert!(patterns.is_match(Path::new("docs/guide.md"), false));
        assert!(patterns.is_match(Path::new("a/b/c/notes.md"), false));
        // defaults without a slash behave the same way
        assert!(patterns.is_match(Path::new("server.pid"), false));
        assert!(patterns.is_match(Path::new("run/server.pid"), false));
        assert!(patterns.is_match(Path::new("pkg/x.tgz"), false));
        assert!(!patterns.is_match(Path::new("docs/guide.rs"), false));
    }

    #[test]
    fn test_leading_slash_anchors_to_root() {
        let patterns = set(&["/notes.txt"], &[]);
        assert!(patterns.is_match(Path::new("notes.txt"), false));
        assert!(!patterns.is_match(Path::new("docs/notes.txt"), false));
    }

    #[test]
    fn test_matching_source_reports_precedence() {
        let patterns = set(&["secrets/*"], &["*.md", "secrets/*"]);
        assert_eq!(
            patterns.matching_source(Path::new("Cargo.lock"), false),
            Some(PatternSource::Default)
        );
        assert_eq!(
            patterns.matching_source(Path::new("secrets/key.pem"), false),
            Some(PatternSource::IgnoreFile)
        );
        assert_eq!(
            patterns.matching_source(Path::new("README.md"), false),
            Some(PatternSource::Override)
        );
        assert_eq!(patterns.matching_source(Path::new("src/lib.rs"), false), None);
    }

    #[test]
    fn test_trailing_slash_is_directory_only() {
        let patterns = set(&["generated/"], &[]);
        assert!(patterns.is_match(Path::new("generated"), true));
        assert!(!patterns.is_match(Path::new("generated"), false));
        assert!(patterns.is_match(Path::new("src/generated"), true));
    }

    #[test]
    fn test_invalid_pattern_is_skipped() {
        let patterns = set(&["[unclosed", "*.tmp"], &[]);
        assert!(patterns.is_match(Path::new("scratch.tmp"), false));
        assert!(!patterns.is_match(Path::new("[unclosed"), false));
    }

    #[test]
    fn test_parse_ignore_file_skips_comments_and_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_IGNORE_FILE);
        fs::write(&path, "# comment\n\nsecrets/*\n  *.tmp  \n#another\n").unwrap();

        assert_eq!(parse_ignore_file(&path), vec!["secrets/*", "*.tmp"]);
    }

    #[test]
    fn test_parse_missing_ignore_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(parse_ignore_file(&dir.path().join("nope")).is_empty());
    }

    #[test]
    fn test_slash_path_drops_non_normal_components() {
        assert_eq!(slash_path(Path::new("./a/b/c.txt")), "a/b/c.txt");
        assert_eq!(slash_path(Path::new("")), "");
    }
}
