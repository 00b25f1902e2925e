// src/github/mod.rs
// =============================================================================
// This module handles all communication with the GitHub REST API.
//
// Submodules:
// - client: The authenticated HTTP client and the four endpoints we use
// - error: The typed error taxonomy (transport vs rate limit)
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

mod client;
mod error;

// Re-export public items from submodules
// This lets users write `github::GithubClient` instead of
// `github::client::GithubClient`
pub use client::{
    DirectoryItem, EntryKind, GithubClient, ItemKind, ListingEntry, RepoMetadata, TreeListing,
};
pub use error::ApiError;
