//! SyntaxKind enum - all token and node kinds in the brace syntax tree.

use serde::Serialize;

/// The kind of a syntax token or node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u16)]
pub enum SyntaxKind {
    // ========================================================================
    // Tokens
    // ========================================================================
    Unknown,
    EndOfFileToken,

    // Literals
    IntegerLiteral,
    FloatingPointLiteral,
    StringLiteral,

    // Operators
    OperatorToken,
    DotOperatorToken,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    CommaToken,
    ColonToken,
    SemicolonToken,
    AtToken,
    HashToken,

    // Identifiers
    Identifier,

    // Keywords
    AsKeyword,
    ClassKeyword,
    EnumKeyword,
    FalseKeyword,
    FuncKeyword,
    ImportKeyword,
    IsKeyword,
    LetKeyword,
    NilKeyword,
    ProtocolKeyword,
    RethrowsKeyword,
    SelfKeyword,
    SelfTypeKeyword,
    StructKeyword,
    ThrowsKeyword,
    TrueKeyword,
    TryKeyword,
    TypealiasKeyword,
    UnderscoreKeyword,
    VarKeyword,

    // ========================================================================
    // Nodes
    // ========================================================================
    TopLevelDeclaration,
    ShebangDirective,

    // Statements
    ExpressionStatement,
    ImportDeclaration,
    ConstantDeclaration,
    VariableDeclaration,

    // Expressions
    IdentifierExpression,
    LiteralExpression,
    SelfExpression,
    WildcardExpression,
    ParenthesizedExpression,
    TupleExpression,
    ArrayLiteralExpression,
    DictionaryLiteralExpression,
    ImplicitMemberExpression,
    ExplicitMemberExpression,
    FunctionCallExpression,
    SubscriptExpression,
    ForcedValueExpression,
    OptionalChainingExpression,
    PrefixOperatorExpression,
    PostfixOperatorExpression,
    TryOperatorExpression,
    SequenceExpression,

    // Types
    TypeIdentifier,
    ArrayType,
    DictionaryType,
    TupleType,
    FunctionType,
    OptionalType,
    ImplicitlyUnwrappedOptionalType,
}

impl SyntaxKind {
    /// Look up the keyword kind for an identifier-shaped word.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        match text {
            "as" => Some(SyntaxKind::AsKeyword),
            "class" => Some(SyntaxKind::ClassKeyword),
            "enum" => Some(SyntaxKind::EnumKeyword),
            "false" => Some(SyntaxKind::FalseKeyword),
            "func" => Some(SyntaxKind::FuncKeyword),
            "import" => Some(SyntaxKind::ImportKeyword),
            "is" => Some(SyntaxKind::IsKeyword),
            "let" => Some(SyntaxKind::LetKeyword),
            "nil" => Some(SyntaxKind::NilKeyword),
            "protocol" => Some(SyntaxKind::ProtocolKeyword),
            "rethrows" => Some(SyntaxKind::RethrowsKeyword),
            "self" => Some(SyntaxKind::SelfKeyword),
            "Self" => Some(SyntaxKind::SelfTypeKeyword),
            "struct" => Some(SyntaxKind::StructKeyword),
            "throws" => Some(SyntaxKind::ThrowsKeyword),
            "true" => Some(SyntaxKind::TrueKeyword),
            "try" => Some(SyntaxKind::TryKeyword),
            "typealias" => Some(SyntaxKind::TypealiasKeyword),
            "_" => Some(SyntaxKind::UnderscoreKeyword),
            "var" => Some(SyntaxKind::VarKeyword),
            _ => None,
        }
    }

    pub fn keyword_text(self) -> Option<&'static str> {
        match self {
            SyntaxKind::AsKeyword => Some("as"),
            SyntaxKind::ClassKeyword => Some("class"),
            SyntaxKind::EnumKeyword => Some("enum"),
            SyntaxKind::FalseKeyword => Some("false"),
            SyntaxKind::FuncKeyword => Some("func"),
            SyntaxKind::ImportKeyword => Some("import"),
            SyntaxKind::IsKeyword => Some("is"),
            SyntaxKind::LetKeyword => Some("let"),
            SyntaxKind::NilKeyword => Some("nil"),
            SyntaxKind::ProtocolKeyword => Some("protocol"),
            SyntaxKind::RethrowsKeyword => Some("rethrows"),
            SyntaxKind::SelfKeyword => Some("self"),
            SyntaxKind::SelfTypeKeyword => Some("Self"),
            SyntaxKind::StructKeyword => Some("struct"),
            SyntaxKind::ThrowsKeyword => Some("throws"),
            SyntaxKind::TrueKeyword => Some("true"),
            SyntaxKind::TryKeyword => Some("try"),
            SyntaxKind::TypealiasKeyword => Some("typealias"),
            SyntaxKind::UnderscoreKeyword => Some("_"),
            SyntaxKind::VarKeyword => Some("var"),
            _ => None,
        }
    }

    pub fn punctuation_text(self) -> Option<&'static str> {
        match self {
            SyntaxKind::OpenBraceToken => Some("{"),
            SyntaxKind::CloseBraceToken => Some("}"),
            SyntaxKind::OpenParenToken => Some("("),
            SyntaxKind::CloseParenToken => Some(")"),
            SyntaxKind::OpenBracketToken => Some("["),
            SyntaxKind::CloseBracketToken => Some("]"),
            SyntaxKind::DotToken => Some("."),
            SyntaxKind::CommaToken => Some(","),
            SyntaxKind::ColonToken => Some(":"),
            SyntaxKind::SemicolonToken => Some(";"),
            SyntaxKind::AtToken => Some("@"),
            SyntaxKind::HashToken => Some("#"),
            _ => None,
        }
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        self >= SyntaxKind::AsKeyword && self <= SyntaxKind::VarKeyword
    }

    #[inline]
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            SyntaxKind::IntegerLiteral | SyntaxKind::FloatingPointLiteral | SyntaxKind::StringLiteral
        )
    }

    #[inline]
    pub fn is_operator(self) -> bool {
        matches!(self, SyntaxKind::OperatorToken | SyntaxKind::DotOperatorToken)
    }

    /// Keywords that may still be used as a member name after `.`
    /// or as a path component of an import.
    pub fn is_contextual_name(self) -> bool {
        self.is_keyword()
            && !matches!(
                self,
                SyntaxKind::UnderscoreKeyword | SyntaxKind::SelfTypeKeyword
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip() {
        for word in ["as", "is", "try", "import", "let", "var", "self", "Self", "_", "nil"] {
            let kind = SyntaxKind::from_keyword(word).unwrap();
            assert!(kind.is_keyword());
            assert_eq!(kind.keyword_text(), Some(word));
        }
        assert_eq!(SyntaxKind::from_keyword("foobar"), None);
    }

    #[test]
    fn test_classification() {
        assert!(SyntaxKind::OperatorToken.is_operator());
        assert!(SyntaxKind::DotOperatorToken.is_operator());
        assert!(!SyntaxKind::DotToken.is_operator());
        assert!(SyntaxKind::StringLiteral.is_literal());
        assert!(!SyntaxKind::Identifier.is_keyword());
        assert_eq!(SyntaxKind::ColonToken.punctuation_text(), Some(":"));
    }
}
