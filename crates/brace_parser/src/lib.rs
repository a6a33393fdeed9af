//! brace_parser: Parser for the brace language front-end.
//!
//! Builds an arena-allocated syntax tree from source text. Operator
//! expressions are kept as flat sequences for a later precedence pass.

mod expression;
mod options;
mod parser;
mod types;
mod utilities;

pub use options::{ParseOptions, DEFAULT_MAX_RECURSION_DEPTH};
pub use parser::Parser;

use brace_ast::node::{Expression, TopLevelDeclaration};
use brace_diagnostics::ParseResult;
use bumpalo::Bump;

/// Parse a whole source unit with default options.
pub fn parse_top_level<'a>(
    arena: &'a Bump,
    text: &str,
    identifier: &str,
) -> ParseResult<TopLevelDeclaration<'a>> {
    Parser::new(arena, identifier, text).parse_top_level_declaration()
}

/// Parse text that holds exactly one expression.
pub fn parse_expression<'a>(
    arena: &'a Bump,
    text: &str,
    identifier: &str,
) -> ParseResult<&'a Expression<'a>> {
    Parser::new(arena, identifier, text).parse_standalone_expression()
}
