//! brace_diagnostics: Parse errors and their rendered form.
//!
//! Every failure of the scanner or parser is a [`ParseError`]. Errors are
//! fatal to the parse call that produced them: the first one is returned to
//! the caller unchanged, carrying the location where parsing stopped.

use brace_core::text::SourceLocation;
use miette::Diagnostic as MietteDiagnostic;
use std::fmt;
use thiserror::Error;

/// Result alias used by the scanner and parser.
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// The ways a parse can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum ParseError {
    #[error("expected {expected}, found {found}")]
    #[diagnostic(code(brace::unexpected_token))]
    UnexpectedToken {
        expected: String,
        found: String,
        at: SourceLocation,
    },

    #[error("expected ':' after the then-branch of a ternary conditional")]
    #[diagnostic(code(brace::expected_colon_after_ternary))]
    ExpectedColonAfterTernary { at: SourceLocation },

    #[error("unterminated block comment")]
    #[diagnostic(code(brace::unterminated_block_comment), help("close the comment with '*/'"))]
    UnterminatedBlockComment { at: SourceLocation },

    #[error("unterminated string literal")]
    #[diagnostic(code(brace::unterminated_string_literal))]
    UnterminatedStringLiteral { at: SourceLocation },

    #[error("invalid character '{character}'")]
    #[diagnostic(code(brace::invalid_character))]
    InvalidCharacter { character: char, at: SourceLocation },

    #[error("'{spelling}' is not a valid operator here")]
    #[diagnostic(code(brace::invalid_operator_spelling))]
    InvalidOperatorSpelling { spelling: String, at: SourceLocation },

    #[error("nesting exceeds the maximum depth of {limit}")]
    #[diagnostic(code(brace::recursion_depth_exceeded))]
    RecursionDepthExceeded { limit: u32, at: SourceLocation },

    #[error("unexpected end of input while parsing {context}")]
    #[diagnostic(code(brace::unexpected_end_of_input))]
    UnexpectedEndOfInput {
        context: &'static str,
        at: SourceLocation,
    },
}

impl ParseError {
    /// Stable numeric code, rendered as `BRnnnn`.
    pub fn code(&self) -> u32 {
        match self {
            ParseError::InvalidCharacter { .. } => 1001,
            ParseError::UnterminatedStringLiteral { .. } => 1002,
            ParseError::UnterminatedBlockComment { .. } => 1003,
            ParseError::UnexpectedToken { .. } => 1005,
            ParseError::UnexpectedEndOfInput { .. } => 1006,
            ParseError::ExpectedColonAfterTernary { .. } => 1010,
            ParseError::InvalidOperatorSpelling { .. } => 1011,
            ParseError::RecursionDepthExceeded { .. } => 1020,
        }
    }

    /// Where parsing stopped.
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::UnexpectedToken { at, .. }
            | ParseError::ExpectedColonAfterTernary { at }
            | ParseError::UnterminatedBlockComment { at }
            | ParseError::UnterminatedStringLiteral { at }
            | ParseError::InvalidCharacter { at, .. }
            | ParseError::InvalidOperatorSpelling { at, .. }
            | ParseError::RecursionDepthExceeded { at, .. }
            | ParseError::UnexpectedEndOfInput { at, .. } => *at,
        }
    }
}

/// A parse error bound to the source unit it came from, in the
/// `file(line,col): error BRnnnn: message` form tools print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The logical identifier of the source unit (usually a file path).
    pub file: String,
    pub location: SourceLocation,
    pub code: u32,
    pub message_text: String,
}

impl Diagnostic {
    pub fn from_parse_error(file: &str, error: &ParseError) -> Self {
        Self {
            file: file.to_string(),
            location: error.location(),
            code: error.code(),
            message_text: error.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({},{}): error BR{}: {}",
            self.file, self.location.line, self.location.column, self.code, self.message_text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ParseError::UnexpectedToken {
            expected: "':'".to_string(),
            found: "end of input".to_string(),
            at: SourceLocation::new(1, 4),
        };
        assert_eq!(err.to_string(), "expected ':', found end of input");
        assert_eq!(err.location(), SourceLocation::new(1, 4));
        assert_eq!(err.code(), 1005);
    }

    #[test]
    fn test_diagnostic_display() {
        let err = ParseError::ExpectedColonAfterTernary {
            at: SourceLocation::new(2, 7),
        };
        let diagnostic = Diagnostic::from_parse_error("main.brace", &err);
        assert_eq!(
            diagnostic.to_string(),
            "main.brace(2,7): error BR1010: expected ':' after the then-branch of a ternary conditional"
        );
    }

    #[test]
    fn test_miette_code() {
        let err = ParseError::RecursionDepthExceeded {
            limit: 8,
            at: SourceLocation::START,
        };
        let code = MietteDiagnostic::code(&err).map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("brace::recursion_depth_exceeded"));
    }
}
