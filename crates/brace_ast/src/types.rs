//! Flag types and small value types shared by tokens and nodes.

use brace_core::text::SourceLocation;
use serde::Serialize;
use std::fmt;

bitflags::bitflags! {
    /// Flags attached to each scanned token.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TokenFlags: u16 {
        const NONE                 = 0;
        const PRECEDING_LINE_BREAK = 1 << 0;
        /// Whitespace, a comment, start of input, or an opening delimiter
        /// sits right before the token.
        const PRECEDING_WHITESPACE = 1 << 1;
        /// Whitespace, a comment, end of input, or a closing delimiter
        /// sits right after the token.
        const FOLLOWING_WHITESPACE = 1 << 2;
        const ESCAPED_IDENTIFIER   = 1 << 3;
        const HEX_SPECIFIER        = 1 << 4;
        const OCTAL_SPECIFIER      = 1 << 5;
        const BINARY_SPECIFIER     = 1 << 6;
        const CONTAINS_SEPARATOR   = 1 << 7;
        const SCIENTIFIC           = 1 << 8;

        const NUMERIC_LITERAL_FLAGS = Self::HEX_SPECIFIER.bits()
            | Self::OCTAL_SPECIFIER.bits()
            | Self::BINARY_SPECIFIER.bits()
            | Self::CONTAINS_SEPARATOR.bits()
            | Self::SCIENTIFIC.bits();
    }
}

impl TokenFlags {
    /// No whitespace on the left.
    #[inline]
    pub fn is_left_bound(self) -> bool {
        !self.contains(TokenFlags::PRECEDING_WHITESPACE)
    }

    /// No whitespace on the right.
    #[inline]
    pub fn is_right_bound(self) -> bool {
        !self.contains(TokenFlags::FOLLOWING_WHITESPACE)
    }

    /// How an operator token binds given the whitespace around it.
    pub fn operator_fixity(self) -> OperatorFixity {
        match (self.is_left_bound(), self.is_right_bound()) {
            (true, false) => OperatorFixity::Postfix,
            (false, true) => OperatorFixity::Prefix,
            _ => OperatorFixity::Infix,
        }
    }
}

/// Whitespace-derived role of an operator token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OperatorFixity {
    Prefix,
    Infix,
    Postfix,
}

/// The two lexical classes of user-definable operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OperatorClass {
    /// Built from the regular operator characters.
    Regular,
    /// Starts with `..`.
    Dot,
}

/// A comment found while skipping trivia.
///
/// Equality, hashing and ordering use `(location, content)`, so a set of
/// comments sorts into source order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Comment {
    pub location: SourceLocation,
    /// Interior text without the `//` or `/* */` delimiters.
    pub content: String,
}

impl Comment {
    pub fn new(content: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            location,
            content: content.into(),
        }
    }
}

/// Opaque handle into an external scope table.
///
/// The lexical-parent relation is expressed only through this id, never
/// through a reference to the enclosing node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ScopeId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LiteralKind {
    Integer,
    FloatingPoint,
    String,
    Boolean,
    Nil,
}

/// `try`, `try?` or `try!`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TryKind {
    Try,
    Optional,
    Forced,
}

impl fmt::Display for TryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TryKind::Try => write!(f, "try"),
            TryKind::Optional => write!(f, "try?"),
            TryKind::Forced => write!(f, "try!"),
        }
    }
}

/// The declaration kind named in a kind-qualified import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ImportKind {
    Typealias,
    Struct,
    Class,
    Enum,
    Protocol,
    Let,
    Var,
    Func,
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ImportKind::Typealias => "typealias",
            ImportKind::Struct => "struct",
            ImportKind::Class => "class",
            ImportKind::Enum => "enum",
            ImportKind::Protocol => "protocol",
            ImportKind::Let => "let",
            ImportKind::Var => "var",
            ImportKind::Func => "func",
        };
        f.write_str(text)
    }
}

/// Whether a function type may throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ThrowsKind {
    Nothrowing,
    Throwing,
    Rethrowing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_fixity() {
        let both = TokenFlags::PRECEDING_WHITESPACE | TokenFlags::FOLLOWING_WHITESPACE;
        assert_eq!(both.operator_fixity(), OperatorFixity::Infix);
        assert_eq!(TokenFlags::NONE.operator_fixity(), OperatorFixity::Infix);
        assert_eq!(TokenFlags::PRECEDING_WHITESPACE.operator_fixity(), OperatorFixity::Prefix);
        assert_eq!(TokenFlags::FOLLOWING_WHITESPACE.operator_fixity(), OperatorFixity::Postfix);
    }

    #[test]
    fn test_comments_sort_by_location() {
        let mut comments = vec![
            Comment::new(" b", SourceLocation::new(4, 1)),
            Comment::new(" a", SourceLocation::new(1, 1)),
        ];
        comments.sort();
        assert_eq!(comments[0].location.line, 1);
        assert_eq!(comments[1].content, " b");
    }
}
