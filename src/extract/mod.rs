// src/extract/mod.rs
// =============================================================================
// The extraction orchestrator: a two-state strategy machine.
//
//   Attempt-Bulk ──success──> Done (strategy = Bulk)
//        │
//      failure (transport, rate limit, or a bad listing)
//        ▼
//   Attempt-Fallback ──success──> Done (strategy = Fallback)
//        │
//      failure
//        ▼
//   Failed (the FALLBACK's error reaches the caller, unchanged)
//
// The bulk path costs 3 API calls no matter how big the repository is:
//   repo metadata -> branch head SHA -> full recursive tree listing
// The fallback costs one call per directory, which is why it is only the
// second choice. Statistics are reset at the start of each attempt so they
// always describe the strategy that actually won.
//
// The orchestrator is generic over the RepoListing trait rather than tied
// to GithubClient, so the strategy machine can be exercised in tests with
// a scripted in-memory repository - no network, no global state.
//
// Submodules:
// - stats: The per-attempt counters
// - walker: The directory-by-directory fallback traversal
// =============================================================================

mod stats;
mod walker;

pub use stats::ExtractionStats;
pub use walker::walk_repository;

use anyhow::Result;

use crate::github::{ApiError, DirectoryItem, GithubClient, RepoMetadata, TreeListing};
use crate::tree::{convert_listing, TreeNode};

// The four read operations an extraction needs from the hosting service.
// GithubClient is the real implementation; tests script their own.
#[allow(async_fn_in_trait)]
pub trait RepoListing {
    async fn repo_metadata(&self, owner: &str, repo: &str) -> Result<RepoMetadata, ApiError>;
    async fn branch_head(&self, owner: &str, repo: &str, branch: &str)
        -> Result<String, ApiError>;
    async fn full_tree(&self, owner: &str, repo: &str, sha: &str) -> Result<TreeListing, ApiError>;
    async fn directory(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Vec<DirectoryItem>, ApiError>;
}

impl RepoListing for GithubClient {
    async fn repo_metadata(&self, owner: &str, repo: &str) -> Result<RepoMetadata, ApiError> {
        GithubClient::repo_metadata(self, owner, repo).await
    }

    async fn branch_head(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<String, ApiError> {
        GithubClient::branch_head(self, owner, repo, branch).await
    }

    async fn full_tree(&self, owner: &str, repo: &str, sha: &str) -> Result<TreeListing, ApiError> {
        GithubClient::full_tree(self, owner, repo, sha).await
    }

    async fn directory(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Vec<DirectoryItem>, ApiError> {
        GithubClient::directory(self, owner, repo, path).await
    }
}

/// Which strategy produced the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// One recursive tree listing (3 API calls total)
    Bulk,
    /// One Contents API call per directory
    Fallback,
}

impl Strategy {
    pub fn describe(&self) -> &'static str {
        match self {
            Strategy::Bulk => "bulk tree listing",
            Strategy::Fallback => "directory-by-directory walk",
        }
    }
}

/// A finished extraction: the tree plus the statistics of the attempt
/// that produced it
#[derive(Debug)]
pub struct Extraction {
    pub tree: TreeNode,
    pub stats: ExtractionStats,
    pub strategy: Strategy,
}

pub struct Extractor<C> {
    client: C,
}

impl<C: RepoListing> Extractor<C> {
    pub fn new(client: C) -> Self {
        Extractor { client }
    }

    /// Extracts the repository structure, bulk-first with automatic
    /// fallback. All-or-nothing: on failure no partial tree is returned.
    pub async fn extract(&self, owner: &str, repo: &str) -> Result<Extraction> {
        let mut stats = ExtractionStats::start();

        match self.attempt_bulk(owner, repo, &mut stats).await {
            Ok(tree) => Ok(Extraction {
                tree,
                stats,
                strategy: Strategy::Bulk,
            }),
            Err(bulk_error) => {
                // The bulk error is reported once and then discarded; the
                // walker is the authoritative second opinion from here on
                eprintln!("⚠️  Bulk listing failed ({bulk_error}), falling back to directory walk");

                stats.reset();
                let tree = walk_repository(&self.client, owner, repo, &mut stats).await?;
                Ok(Extraction {
                    tree,
                    stats,
                    strategy: Strategy::Fallback,
                })
            }
        }
    }

    /// Skips the bulk strategy entirely and walks directory by directory.
    /// Useful when the Trees API is known to be unavailable or truncating.
    pub async fn extract_contents_only(&self, owner: &str, repo: &str) -> Result<Extraction> {
        let mut stats = ExtractionStats::start();
        let tree = walk_repository(&self.client, owner, repo, &mut stats).await?;
        Ok(Extraction {
            tree,
            stats,
            strategy: Strategy::Fallback,
        })
    }

    // The bulk path: metadata -> head SHA -> full listing -> convert.
    // Any error here (including a self-contradictory listing) makes the
    // orchestrator switch to the fallback.
    async fn attempt_bulk(
        &self,
        owner: &str,
        repo: &str,
        stats: &mut ExtractionStats,
    ) -> Result<TreeNode> {
        stats.record_call();
        let metadata = self.client.repo_metadata(owner, repo).await?;

        stats.record_call();
        let head = self
            .client
            .branch_head(owner, repo, &metadata.default_branch)
            .await?;

        stats.record_call();
        let listing = self.client.full_tree(owner, repo, &head).await?;

        // GitHub silently caps very large listings and sets this flag.
        // We warn and keep the partial bulk result rather than paying for
        // a walk that could cost thousands of calls.
        if listing.truncated {
            eprintln!("⚠️  GitHub truncated the bulk listing; the extracted tree may be incomplete");
        }

        let tree = convert_listing(&listing.tree, repo, stats)?;
        Ok(tree)
    }
}
