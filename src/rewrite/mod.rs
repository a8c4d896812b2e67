// src/rewrite/mod.rs
// =============================================================================
// This module contains the link rewriting logic.
//
// Submodules:
// - rules: The mirror Origin type and the table of recognized GitHub hosts
// - engine: The pure rewrite function itself
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod engine;
mod rules;

// Re-export public items from submodules
// This lets users write `rewrite::rewrite()` instead of
// `rewrite::engine::rewrite()`
pub use engine::{rewrite, RewriteResult};
pub use rules::Origin;
