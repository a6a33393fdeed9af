//! brace_ast: Syntax tree definitions for the brace parser front-end.
//!
//! This module defines all AST node types, the SyntaxKind enum, token flag
//! types, the canonical text writer and the visitor.

pub mod description;
pub mod node;
pub mod syntax_kind;
pub mod types;
pub mod visitor;

// Re-export key types
pub use description::TextDescription;
pub use node::*;
pub use syntax_kind::SyntaxKind;
pub use types::*;
pub use visitor::AstVisitor;
