// src/tree/display.rs
// =============================================================================
// This module renders a TreeNode as the familiar `tree`-command ASCII art:
//
//   repo
//   ├── src
//   │   ├── main.rs
//   │   └── cli.rs
//   └── Cargo.toml
//
// Rendering is pure presentation: it never touches the network or mutates
// the tree, it just walks it and pushes lines into a String.
// =============================================================================

use crate::tree::{NodeKind, TreeNode};

/// Renders the tree as a multi-line string, root first
pub fn render_tree(root: &TreeNode) -> String {
    let mut out = String::new();
    out.push_str(&root.name);
    if root.kind == NodeKind::Directory {
        out.push('/');
    }
    out.push('\n');
    render_children(root, "", &mut out);
    out
}

fn render_children(node: &TreeNode, prefix: &str, out: &mut String) {
    let children = node.children();
    for (i, child) in children.iter().enumerate() {
        let last = i + 1 == children.len();

        // The connector for this line, then the prefix its children inherit
        let (branch, extension) = if last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };

        out.push_str(prefix);
        out.push_str(branch);
        out.push_str(&child.name);
        if child.kind == NodeKind::Directory {
            out.push('/');
        }
        out.push('\n');

        if child.kind == NodeKind::Directory {
            let child_prefix = format!("{}{}", prefix, extension);
            render_children(child, &child_prefix, out);
        }
    }
}
