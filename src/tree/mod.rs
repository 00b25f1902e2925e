// src/tree/mod.rs
// =============================================================================
// This module owns everything about the repository tree itself.
//
// Submodules:
// - node: The TreeNode data model and its JSON shape
// - convert: Rebuilds a nested tree from GitHub's flat bulk listing
// - display: Renders a tree as `tree`-command style ASCII art
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

mod convert;
mod display;
mod node;

// Re-export public items from submodules
// This lets users write `tree::convert_listing()` instead of
// `tree::convert::convert_listing()`
pub use convert::{convert_listing, ConversionError};
pub use display::render_tree;
pub use node::{NodeKind, TreeNode};
