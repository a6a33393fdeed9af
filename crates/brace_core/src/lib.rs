//! brace_core: Core utilities for the brace parser front-end.
//!
//! Provides source locations and ranges, the line map used to derive them,
//! the parse arena, and the hash collections shared by the other crates.

pub mod arena;
pub mod collections;
pub mod text;

// Re-export commonly used types
pub use arena::ParseArena;
pub use collections::FxHashSet;
pub use text::{LineMap, SourceLocation, SourceRange, TextPos, TextRange};
