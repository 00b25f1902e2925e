// src/extract/walker.rs
// =============================================================================
// The fallback traversal: enumerate the repository one directory at a time.
//
// This costs one API call PER DIRECTORY (not per file), so a repo with 40
// directories takes 40 calls where the bulk tree listing takes 3 in total.
// That is exactly why the orchestrator only comes here when the bulk
// strategy fails.
//
// Calls are issued strictly one after another - there is no concurrent
// fan-out of sibling directories. That keeps the walk gentle on the rate
// limit and the call ordering deterministic.
//
// Rust concepts:
// - Recursive async: An async fn cannot call itself directly (the future
//   type would be infinitely large), so the recursion goes through a boxed
//   future (LocalBoxFuture)
// - Reborrowing: `&mut *stats` hands the recursive call a shorter-lived
//   mutable borrow of the same counters
// =============================================================================

use futures::future::LocalBoxFuture;

use super::{ExtractionStats, RepoListing};
use crate::github::ApiError;
use crate::tree::TreeNode;

/// Walks the whole repository starting at the root directory.
/// The returned root node is named after the repository.
pub async fn walk_repository<C: RepoListing>(
    client: &C,
    owner: &str,
    repo: &str,
    stats: &mut ExtractionStats,
) -> Result<TreeNode, ApiError> {
    walk_directory(client, owner, repo, "", repo.to_string(), stats).await
}

// Lists one directory, recurses into its subdirectories, attaches file
// leaves. A directory with zero children simply comes back empty.
fn walk_directory<'a, C: RepoListing>(
    client: &'a C,
    owner: &'a str,
    repo: &'a str,
    path: &'a str,
    name: String,
    stats: &'a mut ExtractionStats,
) -> LocalBoxFuture<'a, Result<TreeNode, ApiError>> {
    Box::pin(async move {
        stats.record_call();
        let items = client.directory(owner, repo, path).await?;
        stats.directories_seen += 1;

        let mut node = TreeNode::directory(name);
        for item in items {
            if item.is_directory() {
                let child = walk_directory(
                    client,
                    owner,
                    repo,
                    &item.path,
                    item.name.clone(),
                    &mut *stats,
                )
                .await?;
                node.push_child(child);
            } else {
                // Files, symlinks and submodule pointers all become leaves
                stats.files_seen += 1;
                node.push_child(TreeNode::file(item.name));
            }
        }

        Ok(node)
    })
}
