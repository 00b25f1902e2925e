// src/tree/node.rs
// =============================================================================
// This module defines the tree data model for a repository's file structure.
//
// A repository is represented as a single rooted tree:
// - The root is always a directory named after the repository
// - Directory nodes own an ordered list of children
// - File nodes are leaves and own nothing
//
// The JSON shape is chosen to match the project document format:
//   { "name": "src", "type": "directory", "children": [...] }
//   { "name": "main.rs", "type": "file" }
// Note that files have NO "children" key at all (not an empty list).
//
// Rust concepts:
// - Enums: NodeKind is either Directory or File, nothing else
// - Option<Vec<T>>: "directories have children, files don't" in the type
// - serde attributes: Controlling the exact JSON output
// =============================================================================

use serde::{Deserialize, Serialize};

// What kind of filesystem entry a node represents
//
// Serialized as "directory" / "file" to match the document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Directory,
    File,
}

// One entry in the repository tree
//
// Invariant: `children` is Some(..) for directories and None for files,
// and no two children of the same directory share a name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// The final path segment (e.g. "main.rs", not "src/main.rs")
    pub name: String,

    /// Whether this is a file or a directory
    #[serde(rename = "type")]
    pub kind: NodeKind,

    /// Child entries in insertion order, present only for directories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    /// Creates an empty directory node
    pub fn directory(name: impl Into<String>) -> Self {
        TreeNode {
            name: name.into(),
            kind: NodeKind::Directory,
            children: Some(Vec::new()),
        }
    }

    /// Creates a file leaf
    pub fn file(name: impl Into<String>) -> Self {
        TreeNode {
            name: name.into(),
            kind: NodeKind::File,
            children: None,
        }
    }

    /// Appends a child to a directory node
    ///
    /// Callers are responsible for the sibling-name-uniqueness invariant;
    /// the converter and walker both check before attaching.
    pub fn push_child(&mut self, child: TreeNode) {
        self.children
            .get_or_insert_with(Vec::new)
            .push(child);
    }

    /// Borrowed view of the children (empty slice for files)
    pub fn children(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Counts all file leaves in this subtree
    pub fn file_count(&self) -> usize {
        match self.kind {
            NodeKind::File => 1,
            NodeKind::Directory => self.children().iter().map(TreeNode::file_count).sum(),
        }
    }

    /// Counts all directory nodes in this subtree, including this one
    pub fn directory_count(&self) -> usize {
        match self.kind {
            NodeKind::File => 0,
            NodeKind::Directory => {
                1 + self
                    .children()
                    .iter()
                    .map(TreeNode::directory_count)
                    .sum::<usize>()
            }
        }
    }

    /// Depth of the deepest node in this subtree (a lone node has depth 1)
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(TreeNode::depth)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_file_serializes_without_children_key() {
        let node = TreeNode::file("main.rs");
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value, json!({ "name": "main.rs", "type": "file" }));
    }

    #[test]
    fn test_directory_serializes_with_children() {
        let mut dir = TreeNode::directory("src");
        dir.push_child(TreeNode::file("main.rs"));
        let value = serde_json::to_value(&dir).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "src",
                "type": "directory",
                "children": [{ "name": "main.rs", "type": "file" }]
            })
        );
    }

    #[test]
    fn test_deserialize_round_trip() {
        let mut dir = TreeNode::directory("src");
        dir.push_child(TreeNode::file("lib.rs"));
        let text = serde_json::to_string(&dir).unwrap();
        let back: TreeNode = serde_json::from_str(&text).unwrap();
        assert_eq!(back, dir);
    }

    #[test]
    fn test_counting_helpers() {
        let mut root = TreeNode::directory("repo");
        let mut src = TreeNode::directory("src");
        src.push_child(TreeNode::file("main.rs"));
        src.push_child(TreeNode::file("cli.rs"));
        root.push_child(src);
        root.push_child(TreeNode::file("Cargo.toml"));

        assert_eq!(root.file_count(), 3);
        assert_eq!(root.directory_count(), 2);
        assert_eq!(root.depth(), 3);
    }
}
