//! The operator lexicon.
//!
//! Operators are open-ended: any run of operator characters is a single
//! operator token. Regular operators are built from
//! `/ = - + ! * % < > & | ^ ~ ?`. Dot operators start with `..` and may
//! continue with any regular operator character or more dots. A handful of
//! exact spellings carry built-in meaning and are never user operators.

use brace_ast::types::{OperatorClass, OperatorFixity};

/// Characters that make up regular operators.
pub const OPERATOR_CHARACTERS: &[char] = &[
    '/', '=', '-', '+', '!', '*', '%', '<', '>', '&', '|', '^', '~', '?',
];

#[inline]
pub fn is_operator_character(ch: char) -> bool {
    OPERATOR_CHARACTERS.contains(&ch)
}

/// Characters that may follow the leading `..` of a dot operator.
#[inline]
pub fn is_dot_operator_character(ch: char) -> bool {
    ch == '.' || is_operator_character(ch)
}

pub fn classify(spelling: &str) -> OperatorClass {
    if spelling.starts_with("..") {
        OperatorClass::Dot
    } else {
        OperatorClass::Regular
    }
}

/// Meaning of an operator token at a binary position in an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinOperator {
    Assignment,
    TernaryConditional,
    /// Any user-definable operator.
    Custom,
}

pub fn builtin_operator(spelling: &str) -> BuiltinOperator {
    match spelling {
        "=" => BuiltinOperator::Assignment,
        "?" => BuiltinOperator::TernaryConditional,
        _ => BuiltinOperator::Custom,
    }
}

/// Returns why `spelling` cannot be used as an operator in expression
/// position with the given fixity, or `None` when it is allowed.
pub fn reserved_reason(spelling: &str, fixity: OperatorFixity) -> Option<&'static str> {
    if spelling == "->" {
        return Some("'->' is reserved for function types");
    }
    if spelling.contains("*/") {
        return Some("'*/' cannot appear in an operator");
    }
    match (spelling, fixity) {
        ("&", OperatorFixity::Prefix) => Some("prefix '&' is reserved"),
        ("=", OperatorFixity::Prefix | OperatorFixity::Postfix) => {
            Some("'=' must have consistent whitespace on both sides")
        }
        ("?", OperatorFixity::Prefix) => Some("'?' cannot be used as a prefix operator"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(".."), OperatorClass::Dot);
        assert_eq!(classify("...++"), OperatorClass::Dot);
        assert_eq!(classify("../"), OperatorClass::Dot);
        assert_eq!(classify(">>>!!>>"), OperatorClass::Regular);
        assert_eq!(classify("?"), OperatorClass::Regular);
    }

    #[test]
    fn test_builtin_operators() {
        assert_eq!(builtin_operator("="), BuiltinOperator::Assignment);
        assert_eq!(builtin_operator("?"), BuiltinOperator::TernaryConditional);
        assert_eq!(builtin_operator("=="), BuiltinOperator::Custom);
        assert_eq!(builtin_operator("??"), BuiltinOperator::Custom);
    }

    #[test]
    fn test_reserved_spellings() {
        assert!(reserved_reason("->", OperatorFixity::Infix).is_some());
        assert!(reserved_reason("&", OperatorFixity::Prefix).is_some());
        assert!(reserved_reason("&", OperatorFixity::Infix).is_none());
        assert!(reserved_reason("+*/", OperatorFixity::Infix).is_some());
        assert!(reserved_reason("=", OperatorFixity::Prefix).is_some());
        assert!(reserved_reason("=", OperatorFixity::Infix).is_none());
        assert!(reserved_reason("&|^~?", OperatorFixity::Infix).is_none());
    }
}
