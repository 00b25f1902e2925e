// src/github/client.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Four endpoints, matching the two extraction strategies:
// - GET /repos/{owner}/{repo}                      -> default branch name
// - GET /repos/{owner}/{repo}/branches/{branch}    -> head commit SHA
// - GET /repos/{owner}/{repo}/git/trees/{sha}?recursive=1
//       -> the ENTIRE repository listing in one call (bulk strategy)
// - GET /repos/{owner}/{repo}/contents/{path}      -> one directory level
//       (fallback strategy, one call per directory)
//
// Every response goes through the same classification: 2xx passes through,
// a 403 with an exhausted X-RateLimit-Remaining header becomes a dedicated
// RateLimited error (so the caller can print actionable guidance), and any
// other non-2xx becomes a plain Transport error. Nothing is retried here.
//
// Rust concepts:
// - async functions: For network I/O
// - Generic helper: get_json<T> deserializes any endpoint's payload
// - serde derive: Wire structs mirror only the JSON fields we care about
// =============================================================================

use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use super::error::ApiError;

const API_ROOT: &str = "https://api.github.com";

// Selects the stable v3 JSON representation of the API
const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

// Repository metadata - we only need the default branch out of the
// (very large) payload GitHub sends back
#[derive(Debug, Deserialize)]
pub struct RepoMetadata {
    pub default_branch: String,
}

// Branch lookup response: { "commit": { "sha": "..." } }
#[derive(Debug, Deserialize)]
struct BranchInfo {
    commit: BranchCommit,
}

#[derive(Debug, Deserialize)]
struct BranchCommit {
    sha: String,
}

// What a bulk listing entry can be. GitHub also emits "commit" for
// submodule pointers; anything we don't recognize is treated as a file,
// the same way the per-directory walker treats non-directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Blob,
    Tree,
    #[serde(other)]
    Other,
}

// One record from the bulk listing: a slash-separated path relative to the
// repository root (no leading slash) plus its kind
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListingEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

// The full Trees API response. GitHub truncates `tree` for very large
// repositories and says so via `truncated` rather than failing.
#[derive(Debug, Deserialize)]
pub struct TreeListing {
    pub sha: String,
    pub tree: Vec<ListingEntry>,
    #[serde(default)]
    pub truncated: bool,
}

// Kinds the Contents API reports for directory children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    File,
    Dir,
    #[serde(other)]
    Other,
}

// One child from a single-level directory listing
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryItem {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
}

impl DirectoryItem {
    pub fn is_directory(&self) -> bool {
        self.kind == ItemKind::Dir
    }
}

// Authenticated (or anonymous) GitHub API client
//
// Cheap to pass around by reference; holds one pooled reqwest::Client
pub struct GithubClient {
    http: Client,
    token: Option<String>,
}

impl GithubClient {
    /// Creates a client, optionally carrying a personal access token.
    /// Without a token GitHub allows 60 requests/hour; with one, 5000/hour.
    pub fn new(token: Option<String>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            // GitHub rejects requests without a User-Agent
            .user_agent(concat!("repo-mapper/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(GithubClient { http, token })
    }

    /// Repository metadata, primarily the default branch name
    pub async fn repo_metadata(&self, owner: &str, repo: &str) -> Result<RepoMetadata, ApiError> {
        self.get_json(&format!("{API_ROOT}/repos/{owner}/{repo}")).await
    }

    /// Resolves a branch name to the commit SHA it currently points at
    pub async fn branch_head(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<String, ApiError> {
        let info: BranchInfo = self
            .get_json(&format!("{API_ROOT}/repos/{owner}/{repo}/branches/{branch}"))
            .await?;
        Ok(info.commit.sha)
    }

    /// The whole repository listing in one call (the Trees API with
    /// recursive=1). The response may be flagged as truncated for very
    /// large repositories; the caller decides what to do about that.
    pub async fn full_tree(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> Result<TreeListing, ApiError> {
        self.get_json(&format!(
            "{API_ROOT}/repos/{owner}/{repo}/git/trees/{sha}?recursive=1"
        ))
        .await
    }

    /// One directory level via the Contents API ("" lists the root)
    pub async fn directory(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Vec<DirectoryItem>, ApiError> {
        self.get_json(&format!("{API_ROOT}/repos/{owner}/{repo}/contents/{path}"))
            .await
    }

    // Shared request path: build headers, send, classify, deserialize
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let mut request = self.http.get(url).header(ACCEPT, ACCEPT_HEADER);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("token {token}"));
        }

        let response = request.send().await?;
        let response = classify(response)?;
        Ok(response.json::<T>().await?)
    }
}

// Turns a non-2xx response into the right error variant.
// A 403 is only a rate limit if the quota headers say it is exhausted;
// an ordinary "forbidden" (e.g. a blocked repository) stays a Transport error.
fn classify(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::FORBIDDEN {
        if let Some((remaining, reset)) = rate_limit_headers(response.headers()) {
            if remaining == 0 {
                return Err(ApiError::RateLimited { remaining, reset });
            }
        }
    }

    Err(ApiError::Transport {
        status: status.as_u16(),
    })
}

// Reads X-RateLimit-Remaining (required) and X-RateLimit-Reset (optional)
// from the response headers. Returns None if the remaining count is absent
// or unparseable - then the 403 wasn't quota-related.
fn rate_limit_headers(headers: &HeaderMap) -> Option<(u64, Option<i64>)> {
    let remaining = headers
        .get("x-ratelimit-remaining")?
        .to_str()
        .ok()?
        .parse()
        .ok()?;
    let reset = headers
        .get("x-ratelimit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok());
    Some((remaining, reset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                reqwest::header::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn test_rate_limit_headers_parsed() {
        let map = headers(&[
            ("x-ratelimit-remaining", "0"),
            ("x-ratelimit-reset", "1735689600"),
        ]);
        assert_eq!(rate_limit_headers(&map), Some((0, Some(1735689600))));
    }

    #[test]
    fn test_rate_limit_headers_absent() {
        assert_eq!(rate_limit_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn test_rate_limit_reset_is_optional() {
        let map = headers(&[("x-ratelimit-remaining", "42")]);
        assert_eq!(rate_limit_headers(&map), Some((42, None)));
    }

    #[test]
    fn test_tree_listing_deserializes() {
        let json = r#"{
            "sha": "abc123",
            "tree": [
                { "path": "src", "type": "tree", "mode": "040000" },
                { "path": "src/main.rs", "type": "blob", "size": 120 },
                { "path": "vendored", "type": "commit" }
            ]
        }"#;
        let listing: TreeListing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.sha, "abc123");
        assert!(!listing.truncated);
        assert_eq!(listing.tree.len(), 3);
        assert_eq!(listing.tree[0].kind, EntryKind::Tree);
        assert_eq!(listing.tree[1].kind, EntryKind::Blob);
        // Submodule pointers come through as "commit"
        assert_eq!(listing.tree[2].kind, EntryKind::Other);
    }

    #[test]
    fn test_truncated_flag_is_read() {
        let json = r#"{ "sha": "abc", "tree": [], "truncated": true }"#;
        let listing: TreeListing = serde_json::from_str(json).unwrap();
        assert!(listing.truncated);
    }

    #[test]
    fn test_directory_item_deserializes() {
        let json = r#"[
            { "name": "src", "path": "src", "type": "dir" },
            { "name": "Cargo.toml", "path": "Cargo.toml", "type": "file" },
            { "name": "link", "path": "link", "type": "symlink" }
        ]"#;
        let items: Vec<DirectoryItem> = serde_json::from_str(json).unwrap();
        assert!(items[0].is_directory());
        assert!(!items[1].is_directory());
        // Symlinks and submodules are not recursed into
        assert!(!items[2].is_directory());
    }
}
