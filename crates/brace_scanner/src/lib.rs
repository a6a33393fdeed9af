//! brace_scanner: Lexer for brace source text.
//!
//! Produces tokens from source text with support for:
//! - Open-ended regular and dot operators with whitespace-derived binding
//! - Comment collection while skipping trivia
//! - Shebang lines
//! - Integer, floating point and string literals, escaped identifiers

mod char_codes;
pub mod operators;
mod scanner;
mod token;

pub use scanner::{Scanner, ScannerState};
pub use token::TokenInfo;
