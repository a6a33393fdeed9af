//! Small lookups shared by the statement and expression parsers.

use brace_ast::syntax_kind::SyntaxKind;
use brace_ast::types::ImportKind;

/// How a token is named in an error message.
pub(crate) fn describe_token(kind: SyntaxKind, text: &str) -> String {
    match kind {
        SyntaxKind::EndOfFileToken => "end of input".to_string(),
        _ => format!("'{text}'"),
    }
}

/// The import kind a keyword selects in `import <kind> path`.
pub(crate) fn import_kind_of(kind: SyntaxKind) -> Option<ImportKind> {
    Some(match kind {
        SyntaxKind::TypealiasKeyword => ImportKind::Typealias,
        SyntaxKind::StructKeyword => ImportKind::Struct,
        SyntaxKind::ClassKeyword => ImportKind::Class,
        SyntaxKind::EnumKeyword => ImportKind::Enum,
        SyntaxKind::ProtocolKeyword => ImportKind::Protocol,
        SyntaxKind::LetKeyword => ImportKind::Let,
        SyntaxKind::VarKeyword => ImportKind::Var,
        SyntaxKind::FuncKeyword => ImportKind::Func,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_token() {
        assert_eq!(describe_token(SyntaxKind::EndOfFileToken, ""), "end of input");
        assert_eq!(describe_token(SyntaxKind::CloseParenToken, ")"), "')'");
    }

    #[test]
    fn test_import_kind_of() {
        assert_eq!(import_kind_of(SyntaxKind::FuncKeyword), Some(ImportKind::Func));
        assert_eq!(import_kind_of(SyntaxKind::TypealiasKeyword), Some(ImportKind::Typealias));
        assert_eq!(import_kind_of(SyntaxKind::Identifier), None);
        assert_eq!(import_kind_of(SyntaxKind::ImportKeyword), None);
    }
}
