// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Dispatch to the appropriate subcommand handler
// 3. Run the extraction and print the statistics summary
// 4. Exit with proper code (0 = success, 2 = error)
//
// Everything user-facing (progress lines, the stats block, the rate-limit
// guidance) lives here; the extraction engine itself only returns values.
//
// Rust concepts used:
// - async/await: All network I/O is async (though calls run sequentially)
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod extract; // src/extract/ - the bulk/fallback extraction engine
mod github; // src/github/ - GitHub REST API client
mod project; // src/project.rs - project document assembly and saving
mod tree; // src/tree/ - tree model, flat-to-tree conversion, rendering

use std::path::Path;

// Import items we need from our modules
use clap::Parser; // Parser trait enables the parse() method
use cli::{Cli, Commands};

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;
use chrono::{Local, TimeZone};

use extract::{Extraction, Extractor};
use github::{ApiError, GithubClient};
use project::{ProjectDetails, ProjectDocument};

// The #[tokio::main] attribute transforms our async main into a real main
// function: it creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            // A rate limit deserves more than a one-liner: tell the user
            // when the quota refills and how to raise it
            print_rate_limit_help(&e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            repo,
            title,
            description,
            live_url,
            tech_stack,
            output,
            json,
            contents_only,
        } => {
            let details = ProjectDetails {
                title,
                description,
                live_url,
                tech_stack,
            };
            handle_scan(&repo, details, &output, json, contents_only).await
        }
        Commands::Tree {
            repo,
            contents_only,
        } => handle_tree(&repo, contents_only).await,
    }
}

// Handles the 'scan' subcommand: extract, wrap, save (or print)
async fn handle_scan(
    repo_spec: &str,
    details: ProjectDetails,
    output: &Path,
    json: bool,
    contents_only: bool,
) -> Result<i32> {
    let (owner, repo, extraction) = extract_repository(repo_spec, contents_only).await?;

    let document = ProjectDocument::assemble(&owner, &repo, details, extraction.tree);

    if json {
        // Serialize the document to JSON and print it
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        let path = project::save_project(&document, output)?;
        println!("💾 Project JSON saved to: {}", path.display());
    }

    Ok(0)
}

// Handles the 'tree' subcommand: extract and render, nothing saved
async fn handle_tree(repo_spec: &str, contents_only: bool) -> Result<i32> {
    let (_owner, _repo, extraction) = extract_repository(repo_spec, contents_only).await?;

    println!();
    print!("{}", tree::render_tree(&extraction.tree));

    Ok(0)
}

// Shared by both subcommands: parse the spec, build the client, run the
// extraction, print the statistics block
async fn extract_repository(
    repo_spec: &str,
    contents_only: bool,
) -> Result<(String, String, Extraction)> {
    let (owner, repo) = project::parse_repo_spec(repo_spec)?;

    let token = github_token();
    if token.is_some() {
        println!("✅ Using GITHUB_TOKEN (rate limit: 5000 requests/hour)");
    } else {
        println!("⚠️  No GITHUB_TOKEN set, using anonymous access (rate limit: 60 requests/hour)");
        println!("💡 Tip: export GITHUB_TOKEN to raise the limit");
    }

    println!("🔍 Scanning repository: {owner}/{repo}");

    let client = GithubClient::new(token)?;
    let extractor = Extractor::new(client);

    let extraction = if contents_only {
        extractor.extract_contents_only(&owner, &repo).await?
    } else {
        extractor.extract(&owner, &repo).await?
    };

    print_stats(&extraction);

    Ok((owner, repo, extraction))
}

// Reads the optional token from the environment; empty counts as unset
fn github_token() -> Option<String> {
    match std::env::var("GITHUB_TOKEN") {
        Ok(token) if !token.is_empty() => Some(token),
        _ => None,
    }
}

// Prints the statistics block for the attempt that produced the tree
fn print_stats(extraction: &Extraction) {
    let stats = &extraction.stats;
    let elapsed = stats.elapsed().as_secs_f64();

    println!();
    println!("✅ Extraction complete ({})", extraction.strategy.describe());
    println!("   📊 Statistics:");
    println!("      - API calls: {}", stats.api_calls);
    println!("      - Directories: {}", stats.directories_seen);
    println!("      - Files: {}", stats.files_seen);
    println!("      - Elapsed: {elapsed:.2}s");
    if elapsed > 0.0 {
        println!(
            "      - Throughput: {:.2} files/sec",
            stats.files_seen as f64 / elapsed
        );
    }
}

// If the error chain bottoms out in a rate limit, print the remediation
// block: remaining quota, reset time, and how to get a bigger quota
fn print_rate_limit_help(error: &anyhow::Error) {
    let Some(ApiError::RateLimited { remaining, reset }) = error.downcast_ref::<ApiError>()
    else {
        return;
    };

    eprintln!();
    eprintln!("❌ GitHub API rate limit exceeded!");
    eprintln!("   Remaining requests: {remaining}");
    if let Some(reset) = reset {
        // The header carries unix seconds; show it in local time
        if let Some(when) = Local.timestamp_opt(*reset, 0).single() {
            eprintln!("   Resets at: {}", when.format("%Y-%m-%d %H:%M:%S"));
        }
    }
    eprintln!();
    eprintln!("💡 What you can do:");
    eprintln!("   1. Wait for the limit to reset (up to an hour)");
    eprintln!("   2. Use a GitHub personal access token for a higher limit:");
    eprintln!("      - Create one at https://github.com/settings/tokens ('public_repo' scope)");
    eprintln!("      - export GITHUB_TOKEN='ghp_YOUR_TOKEN'");
}
