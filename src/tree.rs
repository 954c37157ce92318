//! Unix `tree`-style rendering of the collected relative paths.

use std::collections::BTreeMap;
use std::path::{Component, Path};

const BRANCH: &str = "├── ";
const CORNER: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";

/// One directory level; files are nodes without children.
#[derive(Debug, Default)]
pub struct DirectoryNode {
    children: BTreeMap<String, DirectoryNode>,
}

impl DirectoryNode {
    pub fn insert_path(&mut self, path: &Path) {
        let mut node = self;
        for component in path.components() {
            if let Component::Normal(name) = component {
                node = node
                    .children
                    .entry(name.to_string_lossy().into_owned())
                    .or_default();
            }
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Render children depth-first, one line each, without a trailing newline.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        self.render_into(&mut lines, "");
        lines.join("\n")
    }

    fn render_into(&self, lines: &mut Vec<String>, prefix: &str) {
        let last = self.children.len().saturating_sub(1);
        for (i, (name, child)) in self.children.iter().enumerate() {
            let is_last = i == last;
            let connector = if is_last { CORNER } else { BRANCH };
            lines.push(format!("{prefix}{connector}{name}"));

            if !child.is_leaf() {
                let indent = if is_last { BLANK } else { PIPE };
                child.render_into(lines, &format!("{prefix}{indent}"));
            }
        }
    }
}

/// Build the directory tree for `rel_paths` and render it.
pub fn render_tree<P: AsRef<Path>>(rel_paths: &[P]) -> String {
    let mut root = DirectoryNode::default();
    for path in rel_paths {
        root.insert_path(path.as_ref());
    }
    root.render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_nested_tree() {
        let tree = render_tree(&[
            "src/main.rs",
            "README.md",
            "src/util/io.rs",
            "src/lib.rs",
            "Cargo.toml",
        ]);

        let expected = "\
├── Cargo.toml
├── README.md
└── src
    ├── lib.rs
    ├── main.rs
    └── util
        └── io.rs";
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_continuation_glyph_for_non_last_ancestor() {
        let tree = render_tree(&["a/x.txt", "a/y.txt", "b.txt"]);

        let expected = "\
├── a
│   ├── x.txt
│   └── y.txt
└── b.txt";
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_empty_tree_renders_nothing() {
        let tree = render_tree::<&str>(&[]);
        assert_eq!(tree, "");
    }
}
