// src/project.rs
// =============================================================================
// This module assembles and saves the project document - the JSON file a
// portfolio site (or an indexer) consumes.
//
// The document wraps the extracted tree with human-supplied metadata:
//
//   {
//     "id": "repo-mapper",
//     "title": "...",
//     "description": "...",
//     "repoUrl": "https://github.com/...",
//     "liveUrl": "...",
//     "techStack": ["Rust", "..."],
//     "structure": { "root": "repo-mapper", "children": [...] },
//     "images": []
//   }
//
// Also here: turning whatever the user typed ("owner/repo", a pasted GitHub
// URL, with or without .git) into an (owner, repo) pair.
//
// Rust concepts:
// - serde rename_all = "camelCase": Rust snake_case fields, JS-style JSON
// - The url crate: Proper URL parsing instead of string surgery
// =============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::tree::TreeNode;

// Metadata the user supplies on the command line
#[derive(Debug, Clone, Default)]
pub struct ProjectDetails {
    pub title: String,
    pub description: String,
    pub live_url: String,
    pub tech_stack: Vec<String>,
}

// The saved document. Field names become camelCase in JSON.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    pub id: String,
    pub title: String,
    pub description: String,
    pub repo_url: String,
    pub live_url: String,
    pub tech_stack: Vec<String>,
    pub structure: ProjectStructure,
    /// Reserved for manual population after the fact
    pub images: Vec<String>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectStructure {
    /// The repository name
    pub root: String,
    /// The root's children; the root directory node itself is implied
    pub children: Vec<TreeNode>,
}

impl ProjectDocument {
    /// Wraps an extracted tree in the document format.
    /// The id is the lowercased repository name; empty title defaults to
    /// the repository name as typed.
    pub fn assemble(owner: &str, repo: &str, details: ProjectDetails, tree: TreeNode) -> Self {
        let title = if details.title.is_empty() {
            repo.to_string()
        } else {
            details.title
        };

        ProjectDocument {
            id: repo.to_lowercase(),
            title,
            description: details.description,
            repo_url: format!("https://github.com/{owner}/{repo}"),
            live_url: details.live_url,
            tech_stack: details.tech_stack,
            structure: ProjectStructure {
                root: repo.to_string(),
                children: tree.children.unwrap_or_default(),
            },
            images: Vec::new(),
        }
    }
}

/// Saves the document as `<id>.json` under `out_dir`, creating the
/// directory if needed. Returns the path written.
pub fn save_project(document: &ProjectDocument, out_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("could not create output directory {}", out_dir.display()))?;

    let path = out_dir.join(format!("{}.json", document.id));
    let json = serde_json::to_string_pretty(document)?;
    fs::write(&path, json)
        .with_context(|| format!("could not write {}", path.display()))?;

    Ok(path)
}

/// Parses what the user typed into (owner, repo).
///
/// Accepted forms:
///   - owner/repo
///   - https://github.com/owner/repo
///   - https://github.com/owner/repo.git
///   - github.com/owner/repo
pub fn parse_repo_spec(spec: &str) -> Result<(String, String)> {
    let spec = spec.trim();

    if spec.starts_with("http://")
        || spec.starts_with("https://")
        || spec.starts_with("www.")
        || spec.starts_with("github.com/")
    {
        return parse_github_url(spec);
    }

    // The shorthand form: exactly one slash, nothing empty on either side
    let parts: Vec<&str> = spec.split('/').collect();
    if parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty() {
        return Ok((parts[0].to_string(), strip_git_suffix(parts[1])));
    }

    Err(anyhow!(
        "expected 'owner/repo' or a GitHub URL, got '{spec}'"
    ))
}

fn parse_github_url(raw: &str) -> Result<(String, String)> {
    // Tolerate pasted URLs missing their scheme
    let with_scheme = if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };

    let url = Url::parse(&with_scheme).map_err(|e| anyhow!("invalid URL '{raw}': {e}"))?;

    match url.domain() {
        Some("github.com") | Some("www.github.com") => {}
        _ => return Err(anyhow!("not a GitHub URL: {raw}")),
    }

    let mut segments = url
        .path_segments()
        .ok_or_else(|| anyhow!("URL has no path: {raw}"))?;
    let owner = segments
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow!("URL is missing the owner: {raw}"))?;
    let repo = segments
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow!("URL is missing the repository name: {raw}"))?;

    Ok((owner.to_string(), strip_git_suffix(repo)))
}

fn strip_git_suffix(repo: &str) -> String {
    repo.strip_suffix(".git").unwrap_or(repo).to_string()
}
