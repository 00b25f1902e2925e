// src/tree/convert.rs
// =============================================================================
// This module rebuilds a nested directory tree from the FLAT path list that
// GitHub's Git Trees API returns.
//
// The Trees API gives us entries like:
//   { "path": "src/tree/node.rs", "type": "blob" }
//   { "path": "src",              "type": "tree" }
// in no particular nesting, and it is allowed to mention a deep file without
// ever listing its ancestor directories explicitly. So the converter has to:
//
// 1. Sort entries by path, so a parent path is always handled before (or
//    synthesized for) anything underneath it
// 2. Walk each entry's path segments, creating any missing intermediate
//    directory on the way down
// 3. Attach the final segment as a file or directory under its parent
//
// A PathIndex (path string -> node) remembers every directory created so far,
// which makes step 2 a cheap lookup instead of a tree search. The index lives
// only for the duration of one conversion pass.
//
// Rust concepts:
// - Index-based arena: Nodes hold Vec<usize> child ids while under
//   construction, then get materialized into owned TreeNodes at the end.
//   This sidesteps the borrow checker issues of storing &mut references
//   to nodes inside a growing tree.
// - HashMap/HashSet: O(1) path lookups
// =============================================================================

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::extract::ExtractionStats;
use crate::github::{EntryKind, ListingEntry};
use crate::tree::{NodeKind, TreeNode};

// A listing that contradicts itself is an upstream contract violation.
// We surface it instead of guessing which of the two entries to believe.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("listing entry '{path}' is a file, but an earlier entry already created a directory there")]
    FileCollidesWithDirectory { path: String },

    #[error("listing entry '{path}' needs a directory, but an earlier entry already created a file there")]
    DirectoryCollidesWithFile { path: String },
}

/// Converts the flat bulk listing into a rooted tree named after the repo.
///
/// Statistics are incremented once per distinct node created, never once per
/// entry, so a directory that appears both explicitly and as an implied
/// ancestor is counted a single time. The root itself is not counted.
pub fn convert_listing(
    entries: &[ListingEntry],
    repo_name: &str,
    stats: &mut ExtractionStats,
) -> Result<TreeNode, ConversionError> {
    // Sort by path so every ancestor sorts before its descendants.
    // We sort borrowed entries to leave the caller's listing untouched.
    let mut sorted: Vec<&ListingEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.path.cmp(&b.path));

    let mut builder = TreeBuilder::new(repo_name);
    for entry in sorted {
        builder.insert(entry, stats)?;
    }

    Ok(builder.finish())
}

// Maps a normalized path ("" = root, no leading slash) to the arena id of
// the directory node already created for it. Discarded after one pass.
struct PathIndex {
    map: HashMap<String, usize>,
}

impl PathIndex {
    fn with_root(root_id: usize) -> Self {
        let mut map = HashMap::new();
        map.insert(String::new(), root_id);
        PathIndex { map }
    }

    fn get(&self, path: &str) -> Option<usize> {
        self.map.get(path).copied()
    }

    fn insert(&mut self, path: &str, id: usize) {
        self.map.insert(path.to_string(), id);
    }
}

// A node while the tree is under construction: children are arena ids
struct Slot {
    name: String,
    kind: NodeKind,
    children: Vec<usize>,
}

struct TreeBuilder {
    nodes: Vec<Slot>,
    index: PathIndex,
    // Full paths already attached as files, for duplicate/collision checks
    // (the index above only ever holds directories)
    files: HashSet<String>,
}

const ROOT: usize = 0;

impl TreeBuilder {
    fn new(repo_name: &str) -> Self {
        let nodes = vec![Slot {
            name: repo_name.to_string(),
            kind: NodeKind::Directory,
            children: Vec::new(),
        }];
        TreeBuilder {
            index: PathIndex::with_root(ROOT),
            nodes,
            files: HashSet::new(),
        }
    }

    fn insert(&mut self, entry: &ListingEntry, stats: &mut ExtractionStats) -> Result<(), ConversionError> {
        if entry.path.is_empty() {
            // The Trees API never emits an empty path; nothing sane to attach
            return Ok(());
        }

        let segments: Vec<&str> = entry.path.split('/').collect();

        // Make sure every ancestor directory exists, creating missing ones.
        // `prefix` grows from "src" to "src/tree" to ... as we walk down.
        let mut parent = ROOT;
        let mut prefix = String::new();
        for segment in &segments[..segments.len() - 1] {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(segment);
            parent = self.ensure_directory(&prefix, segment, parent, stats)?;
        }

        // Attach the entry itself under its (now guaranteed) parent
        let name = segments[segments.len() - 1];
        match entry.kind {
            EntryKind::Tree => {
                // Already present only if the listing repeated itself;
                // ensure_directory absorbs that without double-counting
                self.ensure_directory(&entry.path, name, parent, stats)?;
            }
            // Blobs and anything exotic (submodule "commit" entries) become
            // file leaves, matching how the Contents walker treats them
            _ => self.attach_file(&entry.path, name, parent, stats)?,
        }

        Ok(())
    }

    // Returns the arena id for the directory at `path`, creating and
    // indexing it (and counting it) only if it does not exist yet
    fn ensure_directory(
        &mut self,
        path: &str,
        name: &str,
        parent: usize,
        stats: &mut ExtractionStats,
    ) -> Result<usize, ConversionError> {
        if let Some(id) = self.index.get(path) {
            return Ok(id);
        }
        if self.files.contains(path) {
            return Err(ConversionError::DirectoryCollidesWithFile {
                path: path.to_string(),
            });
        }

        let id = self.nodes.len();
        self.nodes.push(Slot {
            name: name.to_string(),
            kind: NodeKind::Directory,
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        self.index.insert(path, id);
        stats.directories_seen += 1;
        Ok(id)
    }

    fn attach_file(
        &mut self,
        path: &str,
        name: &str,
        parent: usize,
        stats: &mut ExtractionStats,
    ) -> Result<(), ConversionError> {
        if self.files.contains(path) {
            // Duplicate entry for the same file: no-op for tree shape,
            // and statistics must not double-count it either
            return Ok(());
        }
        if self.index.get(path).is_some() {
            return Err(ConversionError::FileCollidesWithDirectory {
                path: path.to_string(),
            });
        }

        let id = self.nodes.len();
        self.nodes.push(Slot {
            name: name.to_string(),
            kind: NodeKind::File,
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        self.files.insert(path.to_string());
        stats.files_seen += 1;
        Ok(())
    }

    // Materializes the arena into an owned TreeNode graph, children in the
    // order they were attached
    fn finish(self) -> TreeNode {
        self.materialize(ROOT)
    }

    fn materialize(&self, id: usize) -> TreeNode {
        let slot = &self.nodes[id];
        match slot.kind {
            NodeKind::File => TreeNode::file(slot.name.clone()),
            NodeKind::Directory => {
                let mut node = TreeNode::directory(slot.name.clone());
                for &child in &slot.children {
                    node.push_child(self.materialize(child));
                }
                node
            }
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why sort first?
//    - After sorting, "src" < "src/tree" < "src/tree/node.rs"
//    - So by the time we meet an entry, its explicit ancestors (if any)
//      have already been inserted, and implicit ones get synthesized in
//      path order
//    - This makes a single forward pass with no lookahead correct
//
// 2. Why an arena of Slots instead of building TreeNodes directly?
//    - The PathIndex needs to point at nodes that are still growing
//    - Holding &mut TreeNode references inside a HashMap while also
//      mutating their parents is exactly what the borrow checker forbids
//    - Plain usize ids have no lifetime, so the index stays simple
//
// 3. Why track files in a separate HashSet?
//    - The PathIndex invariant is "every indexed path is a directory"
//    - Files still need duplicate detection (idempotence) and collision
//      detection (a path can't be both a file and a directory)
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, kind: EntryKind) -> ListingEntry {
        ListingEntry {
            path: path.to_string(),
            kind,
        }
    }

    fn convert(entries: &[ListingEntry]) -> (TreeNode, ExtractionStats) {
        let mut stats = ExtractionStats::start();
        let tree = convert_listing(entries, "repo", &mut stats).unwrap();
        (tree, stats)
    }

    // Collects every root-to-file path as "a/b/c.txt" strings
    fn file_paths(node: &TreeNode, prefix: &str, out: &mut Vec<String>) {
        for child in node.children() {
            let path = if prefix.is_empty() {
                child.name.clone()
            } else {
                format!("{}/{}", prefix, child.name)
            };
            match child.kind {
                NodeKind::File => out.push(path),
                NodeKind::Directory => file_paths(child, &path, out),
            }
        }
    }

    #[test]
    fn test_empty_listing_yields_bare_root() {
        let (tree, stats) = convert(&[]);
        assert_eq!(tree.name, "repo");
        assert_eq!(tree.kind, NodeKind::Directory);
        assert!(tree.children().is_empty());
        assert_eq!(stats.directories_seen, 0);
        assert_eq!(stats.files_seen, 0);
    }

    #[test]
    fn test_intermediate_directories_are_synthesized() {
        // A deep blob with no explicit ancestor entries at all
        let (tree, stats) = convert(&[entry("a/b.txt", EntryKind::Blob)]);
        let a = &tree.children()[0];
        assert_eq!(a.name, "a");
        assert_eq!(a.kind, NodeKind::Directory);
        let b = &a.children()[0];
        assert_eq!(b.name, "b.txt");
        assert_eq!(b.kind, NodeKind::File);
        assert_eq!(stats.directories_seen, 1);
        assert_eq!(stats.files_seen, 1);
    }

    #[test]
    fn test_explicit_and_implicit_directories_are_equivalent() {
        let (implicit, implicit_stats) = convert(&[entry("a/b.txt", EntryKind::Blob)]);
        let (explicit, explicit_stats) = convert(&[
            entry("a", EntryKind::Tree),
            entry("a/b.txt", EntryKind::Blob),
        ]);
        assert_eq!(implicit, explicit);
        assert_eq!(implicit_stats.directories_seen, explicit_stats.directories_seen);
        assert_eq!(implicit_stats.files_seen, explicit_stats.files_seen);
    }

    #[test]
    fn test_duplicate_entries_are_idempotent() {
        let once = convert(&[entry("src/main.rs", EntryKind::Blob)]);
        let twice = convert(&[
            entry("src/main.rs", EntryKind::Blob),
            entry("src/main.rs", EntryKind::Blob),
            entry("src", EntryKind::Tree),
        ]);
        assert_eq!(once.0, twice.0);
        assert_eq!(twice.1.directories_seen, 1);
        assert_eq!(twice.1.files_seen, 1);
    }

    #[test]
    fn test_every_file_path_round_trips_and_siblings_are_unique() {
        let listing = vec![
            entry("README.md", EntryKind::Blob),
            entry("src", EntryKind::Tree),
            entry("src/main.rs", EntryKind::Blob),
            entry("src/tree", EntryKind::Tree),
            entry("src/tree/node.rs", EntryKind::Blob),
            entry("docs/guide.md", EntryKind::Blob),
        ];
        let (tree, stats) = convert(&listing);

        let mut paths = Vec::new();
        file_paths(&tree, "", &mut paths);
        paths.sort();
        assert_eq!(
            paths,
            vec!["README.md", "docs/guide.md", "src/main.rs", "src/tree/node.rs"]
        );

        // Distinct directory prefixes: src, src/tree, docs
        assert_eq!(stats.directories_seen, 3);
        assert_eq!(stats.files_seen, 4);

        // No two siblings anywhere share a name
        fn assert_unique_siblings(node: &TreeNode) {
            let mut names: Vec<&str> = node.children().iter().map(|c| c.name.as_str()).collect();
            let before = names.len();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), before);
            for child in node.children() {
                assert_unique_siblings(child);
            }
        }
        assert_unique_siblings(&tree);
    }

    #[test]
    fn test_unsorted_input_is_handled() {
        // Deliberately shuffled: the converter must sort internally
        let listing = vec![
            entry("src/tree/node.rs", EntryKind::Blob),
            entry("README.md", EntryKind::Blob),
            entry("src/main.rs", EntryKind::Blob),
        ];
        let (tree, stats) = convert(&listing);
        assert_eq!(tree.file_count(), 3);
        assert_eq!(stats.directories_seen, 2);
    }

    #[test]
    fn test_deeply_nested_files() {
        // Three files four directories down: tree depth 5 counting the root
        // level, with 4 directory nodes total (root included)
        let listing = vec![
            entry("a/b/c/one.txt", EntryKind::Blob),
            entry("a/b/c/two.txt", EntryKind::Blob),
            entry("a/b/c/three.txt", EntryKind::Blob),
        ];
        let (tree, stats) = convert(&listing);
        assert_eq!(tree.depth(), 5);
        assert_eq!(tree.file_count(), 3);
        assert_eq!(tree.directory_count(), 4);
        assert_eq!(stats.directories_seen, 3);
        assert_eq!(stats.files_seen, 3);
    }

    #[test]
    fn test_submodule_entries_become_file_leaves() {
        let (tree, _) = convert(&[entry("vendored", EntryKind::Other)]);
        assert_eq!(tree.children()[0].kind, NodeKind::File);
    }

    #[test]
    fn test_file_directory_collision_is_an_error() {
        let mut stats = ExtractionStats::start();
        let err = convert_listing(
            &[
                entry("src", EntryKind::Tree),
                entry("src", EntryKind::Blob),
            ],
            "repo",
            &mut stats,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConversionError::FileCollidesWithDirectory {
                path: "src".to_string()
            }
        );

        let mut stats = ExtractionStats::start();
        let err = convert_listing(
            &[
                entry("src", EntryKind::Blob),
                entry("src/main.rs", EntryKind::Blob),
            ],
            "repo",
            &mut stats,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConversionError::DirectoryCollidesWithFile {
                path: "src".to_string()
            }
        );
    }
}
