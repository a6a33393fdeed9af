//! Token information produced by the scanner.

use brace_ast::syntax_kind::SyntaxKind;
use brace_ast::types::{OperatorFixity, TokenFlags};
use brace_core::text::TextRange;

/// Information about a scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenInfo<'s> {
    pub kind: SyntaxKind,
    /// Start offset in the source text.
    pub pos: u32,
    /// End offset in the source text (exclusive).
    pub end: u32,
    /// The raw text of the token.
    pub text: &'s str,
    pub flags: TokenFlags,
}

impl<'s> TokenInfo<'s> {
    pub fn range(&self) -> TextRange {
        TextRange::new(self.pos, self.end)
    }

    /// Whether there was a line break before this token.
    pub fn has_preceding_line_break(&self) -> bool {
        self.flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    /// Role of an operator token, derived from the whitespace around it.
    pub fn fixity(&self) -> OperatorFixity {
        self.flags.operator_fixity()
    }

    pub fn is_operator(&self, spelling: &str) -> bool {
        self.kind.is_operator() && self.text == spelling
    }
}
