// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "repo-mapper",
    version = "0.1.0",
    about = "Map a GitHub repository's file structure into a project document",
    long_about = "repo-mapper extracts the complete file/directory structure of a GitHub \
                  repository (3 API calls via the Tree API, with an automatic per-directory \
                  fallback) and saves it as a nested JSON document ready for a portfolio \
                  site or an indexer."
)]
pub struct Cli {
    // The #[command(subcommand)] attribute tells clap that this field
    // will hold one of the subcommands defined in the Commands enum
    #[command(subcommand)]
    pub command: Commands,
}

// This enum defines our subcommands (scan, tree)
//
// Each variant represents a different subcommand the user can run
// The fields inside each variant become the arguments for that subcommand
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract a repository's structure and save it as a project document
    ///
    /// Example: repo-mapper scan rust-lang/rust --tech Rust --tech LLVM
    Scan {
        /// Repository to scan: 'owner/repo' or a GitHub URL
        repo: String,

        /// Project title (defaults to the repository name)
        #[arg(long, default_value = "")]
        title: String,

        /// Short project description
        #[arg(long, default_value = "")]
        description: String,

        /// Live/demo URL, if the project has one
        #[arg(long, default_value = "")]
        live_url: String,

        /// Tech stack entry; repeat for several (--tech Rust --tech React)
        #[arg(long = "tech")]
        tech_stack: Vec<String>,

        /// Directory the project JSON is written into
        #[arg(long, default_value = "projects")]
        output: PathBuf,

        /// Print the document to stdout instead of saving it
        #[arg(long)]
        json: bool,

        /// Skip the bulk Tree API and walk one directory at a time
        /// (slower: one API call per directory)
        #[arg(long)]
        contents_only: bool,
    },

    /// Print a repository's structure as an ASCII tree
    ///
    /// Example: repo-mapper tree rust-lang/rust
    Tree {
        /// Repository to scan: 'owner/repo' or a GitHub URL
        repo: String,

        /// Skip the bulk Tree API and walk one directory at a time
        #[arg(long)]
        contents_only: bool,
    },
}
