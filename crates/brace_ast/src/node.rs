//! AST node definitions for the brace language front-end.
//!
//! Nodes reference child nodes via arena-allocated references and never
//! point back at their parents. Every node carries a [`NodeData`] with its
//! kind and source range.

use crate::syntax_kind::SyntaxKind;
use crate::types::*;
use brace_core::collections::{sorted, FxHashSet};
use brace_core::text::SourceRange;
use serde::{Serialize, Serializer};

// ============================================================================
// Core Node Wrapper
// ============================================================================

/// Common data shared by all AST nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeData {
    pub kind: SyntaxKind,
    pub range: SourceRange,
}

impl NodeData {
    pub fn new(kind: SyntaxKind, range: SourceRange) -> Self {
        Self { kind, range }
    }
}

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

/// Access to the shared [`NodeData`] of a node.
pub trait HasNodeData {
    fn data(&self) -> &NodeData;

    #[inline]
    fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    #[inline]
    fn range(&self) -> SourceRange {
        self.data().range
    }
}

// ============================================================================
// Top Level
// ============================================================================

/// The root of a parsed source unit.
#[derive(Debug, Serialize)]
pub struct TopLevelDeclaration<'a> {
    pub data: NodeData,
    /// Logical name of the source unit, usually a path.
    pub identifier: &'a str,
    pub statements: NodeList<'a, Statement<'a>>,
    /// Every comment in the unit. Not ordered; use
    /// [`TopLevelDeclaration::sorted_comments`] for source order.
    #[serde(serialize_with = "serialize_comments")]
    pub comments: FxHashSet<Comment>,
    pub shebang: Option<ShebangDirective<'a>>,
    pub lexical_parent: Option<ScopeId>,
}

impl TopLevelDeclaration<'_> {
    pub fn sorted_comments(&self) -> Vec<Comment> {
        sorted(&self.comments)
    }
}

fn serialize_comments<S: Serializer>(
    comments: &FxHashSet<Comment>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    sorted(comments).serialize(serializer)
}

/// The `#!` interpreter line at the very start of a unit.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ShebangDirective<'a> {
    pub data: NodeData,
    /// Text after `#!`, trimmed on both sides.
    pub interpreter_directive: &'a str,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Serialize)]
pub enum Statement<'a> {
    Expression(ExpressionStatement<'a>),
    Import(ImportDeclaration<'a>),
    Constant(ValueDeclaration<'a>),
    Variable(ValueDeclaration<'a>),
}

impl Statement<'_> {
    pub fn lexical_parent(&self) -> Option<ScopeId> {
        match self {
            Statement::Expression(n) => n.lexical_parent,
            Statement::Import(n) => n.lexical_parent,
            Statement::Constant(n) | Statement::Variable(n) => n.lexical_parent,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExpressionStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub lexical_parent: Option<ScopeId>,
}

/// `import [kind] A.B.C`
#[derive(Debug, Serialize)]
pub struct ImportDeclaration<'a> {
    pub data: NodeData,
    pub import_kind: Option<ImportKind>,
    pub path: NodeList<'a, ImportPathComponent<'a>>,
    pub lexical_parent: Option<ScopeId>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub enum ImportPathComponent<'a> {
    Identifier(Identifier<'a>),
    Operator(Operator<'a>),
}

impl ImportPathComponent<'_> {
    pub fn range(&self) -> SourceRange {
        match self {
            ImportPathComponent::Identifier(n) => n.data.range,
            ImportPathComponent::Operator(n) => n.range,
        }
    }
}

/// `let name[: Type] [= initializer]` or the `var` form.
#[derive(Debug, Serialize)]
pub struct ValueDeclaration<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
    pub type_annotation: Option<&'a TypeNode<'a>>,
    pub initializer: Option<&'a Expression<'a>>,
    pub lexical_parent: Option<ScopeId>,
}

// ============================================================================
// Names and Operators
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Identifier<'a> {
    pub data: NodeData,
    /// The name without backticks.
    pub name: &'a str,
    /// Written as `` `name` ``.
    pub escaped: bool,
}

/// An operator spelling together with its class and extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Operator<'a> {
    pub spelling: &'a str,
    pub class: OperatorClass,
    pub range: SourceRange,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Serialize)]
pub enum Expression<'a> {
    Identifier(Identifier<'a>),
    Literal(LiteralExpression<'a>),
    SelfExpression(NodeData),
    Wildcard(NodeData),
    Parenthesized(ParenthesizedExpression<'a>),
    Tuple(TupleExpression<'a>),
    ArrayLiteral(ArrayLiteralExpression<'a>),
    DictionaryLiteral(DictionaryLiteralExpression<'a>),
    ImplicitMember(ImplicitMemberExpression<'a>),
    ExplicitMember(ExplicitMemberExpression<'a>),
    FunctionCall(FunctionCallExpression<'a>),
    Subscript(SubscriptExpression<'a>),
    ForcedValue(WrappedExpression<'a>),
    OptionalChaining(WrappedExpression<'a>),
    PrefixOperator(PrefixOperatorExpression<'a>),
    PostfixOperator(PostfixOperatorExpression<'a>),
    TryOperator(TryOperatorExpression<'a>),
    Sequence(SequenceExpression<'a>),
}

#[derive(Debug, Serialize)]
pub struct LiteralExpression<'a> {
    pub data: NodeData,
    pub literal_kind: LiteralKind,
    /// Spelling as written, quotes and escapes included.
    pub raw: &'a str,
    /// Numeric-literal flags from the scanner.
    #[serde(skip)]
    pub flags: TokenFlags,
}

#[derive(Debug, Serialize)]
pub struct ParenthesizedExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Serialize)]
pub struct TupleExpression<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, Argument<'a>>,
}

/// An optionally labeled expression in a tuple, call or subscript.
#[derive(Debug, Serialize)]
pub struct Argument<'a> {
    pub label: Option<Identifier<'a>>,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Serialize)]
pub struct ArrayLiteralExpression<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, &'a Expression<'a>>,
}

#[derive(Debug, Serialize)]
pub struct DictionaryLiteralExpression<'a> {
    pub data: NodeData,
    pub entries: NodeList<'a, DictionaryEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct DictionaryEntry<'a> {
    pub key: &'a Expression<'a>,
    pub value: &'a Expression<'a>,
}

/// `.member`
#[derive(Debug, Serialize)]
pub struct ImplicitMemberExpression<'a> {
    pub data: NodeData,
    pub member: Identifier<'a>,
}

/// `base.member` or `base.0`
#[derive(Debug, Serialize)]
pub struct ExplicitMemberExpression<'a> {
    pub data: NodeData,
    pub base: &'a Expression<'a>,
    pub member: MemberName<'a>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub enum MemberName<'a> {
    Named(Identifier<'a>),
    TupleIndex { index: &'a str, range: SourceRange },
}

#[derive(Debug, Serialize)]
pub struct FunctionCallExpression<'a> {
    pub data: NodeData,
    pub callee: &'a Expression<'a>,
    pub arguments: NodeList<'a, Argument<'a>>,
}

#[derive(Debug, Serialize)]
pub struct SubscriptExpression<'a> {
    pub data: NodeData,
    pub base: &'a Expression<'a>,
    pub arguments: NodeList<'a, Argument<'a>>,
}

/// `a!` and `a?`
#[derive(Debug, Serialize)]
pub struct WrappedExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Serialize)]
pub struct PrefixOperatorExpression<'a> {
    pub data: NodeData,
    pub operator: Operator<'a>,
    pub operand: &'a Expression<'a>,
}

#[derive(Debug, Serialize)]
pub struct PostfixOperatorExpression<'a> {
    pub data: NodeData,
    pub operand: &'a Expression<'a>,
    pub operator: Operator<'a>,
}

#[derive(Debug, Serialize)]
pub struct TryOperatorExpression<'a> {
    pub data: NodeData,
    pub try_kind: TryKind,
    pub expression: &'a Expression<'a>,
}

// ============================================================================
// Sequence Expressions
// ============================================================================

/// A flat chain of operands and binary-position operators whose precedence
/// has not been resolved.
#[derive(Debug, Serialize)]
pub struct SequenceExpression<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, SequenceElement<'a>>,
}

impl SequenceExpression<'_> {
    /// Checks the shape the builder guarantees: an operand first, never two
    /// operands in a row, and an operand after every binary, assignment or
    /// ternary element. Cast elements carry their own operand and may be
    /// followed by anything.
    pub fn is_well_formed(&self) -> bool {
        let Some(first) = self.elements.first() else {
            return false;
        };
        if !first.is_expression() || self.elements.len() < 2 {
            return false;
        }
        for pair in self.elements.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);
            if current.is_expression() && next.is_expression() {
                return false;
            }
            if current.needs_right_operand() && !next.is_expression() {
                return false;
            }
        }
        self.elements
            .last()
            .is_some_and(|last| !last.needs_right_operand())
    }
}

#[derive(Debug, Serialize)]
pub enum SequenceElement<'a> {
    Expression(&'a Expression<'a>),
    BinaryOperator(Operator<'a>),
    AssignmentOperator(SourceRange),
    TernaryConditionalOperator(TernaryConditionalElement<'a>),
    TypeCheck(TypeOperatorElement<'a>),
    TypeCast(TypeOperatorElement<'a>),
    TypeConditionalCast(TypeOperatorElement<'a>),
    TypeForcedCast(TypeOperatorElement<'a>),
}

impl SequenceElement<'_> {
    pub fn range(&self) -> SourceRange {
        match self {
            SequenceElement::Expression(e) => e.range(),
            SequenceElement::BinaryOperator(op) => op.range,
            SequenceElement::AssignmentOperator(range) => *range,
            SequenceElement::TernaryConditionalOperator(t) => t.range,
            SequenceElement::TypeCheck(t)
            | SequenceElement::TypeCast(t)
            | SequenceElement::TypeConditionalCast(t)
            | SequenceElement::TypeForcedCast(t) => t.range,
        }
    }

    #[inline]
    pub fn is_expression(&self) -> bool {
        matches!(self, SequenceElement::Expression(_))
    }

    /// Binary, assignment and ternary elements take the next operand.
    pub fn needs_right_operand(&self) -> bool {
        matches!(
            self,
            SequenceElement::BinaryOperator(_)
                | SequenceElement::AssignmentOperator(_)
                | SequenceElement::TernaryConditionalOperator(_)
        )
    }
}

/// `? then :`
#[derive(Debug, Serialize)]
pub struct TernaryConditionalElement<'a> {
    pub then_expression: &'a Expression<'a>,
    pub range: SourceRange,
}

/// A cast or type check fused with its type operand, e.g. `as? T`.
#[derive(Debug, Serialize)]
pub struct TypeOperatorElement<'a> {
    pub type_node: &'a TypeNode<'a>,
    pub range: SourceRange,
}

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Serialize)]
pub enum TypeNode<'a> {
    Identifier(TypeIdentifier<'a>),
    Array(ArrayType<'a>),
    Dictionary(DictionaryType<'a>),
    Tuple(TupleType<'a>),
    Function(FunctionType<'a>),
    Optional(WrappedType<'a>),
    ImplicitlyUnwrappedOptional(WrappedType<'a>),
}

/// `A.B<C>.D`
#[derive(Debug, Serialize)]
pub struct TypeIdentifier<'a> {
    pub data: NodeData,
    pub components: NodeList<'a, TypeNameComponent<'a>>,
}

#[derive(Debug, Serialize)]
pub struct TypeNameComponent<'a> {
    pub name: Identifier<'a>,
    pub generic_arguments: NodeList<'a, &'a TypeNode<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ArrayType<'a> {
    pub data: NodeData,
    pub element: &'a TypeNode<'a>,
}

#[derive(Debug, Serialize)]
pub struct DictionaryType<'a> {
    pub data: NodeData,
    pub key: &'a TypeNode<'a>,
    pub value: &'a TypeNode<'a>,
}

#[derive(Debug, Serialize)]
pub struct TupleType<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, TupleTypeElement<'a>>,
}

#[derive(Debug, Serialize)]
pub struct TupleTypeElement<'a> {
    pub label: Option<Identifier<'a>>,
    pub type_node: &'a TypeNode<'a>,
}

/// `(A, B) throws -> C`
#[derive(Debug, Serialize)]
pub struct FunctionType<'a> {
    pub data: NodeData,
    pub parameters: &'a TupleType<'a>,
    pub throws: ThrowsKind,
    pub result: &'a TypeNode<'a>,
}

/// `T?` and `T!`
#[derive(Debug, Serialize)]
pub struct WrappedType<'a> {
    pub data: NodeData,
    pub wrapped: &'a TypeNode<'a>,
}

// ============================================================================
// HasNodeData impls
// ============================================================================

impl HasNodeData for Identifier<'_> {
    fn data(&self) -> &NodeData {
        &self.data
    }
}

impl HasNodeData for TopLevelDeclaration<'_> {
    fn data(&self) -> &NodeData {
        &self.data
    }
}

impl HasNodeData for ShebangDirective<'_> {
    fn data(&self) -> &NodeData {
        &self.data
    }
}

impl HasNodeData for Statement<'_> {
    fn data(&self) -> &NodeData {
        match self {
            Statement::Expression(n) => &n.data,
            Statement::Import(n) => &n.data,
            Statement::Constant(n) | Statement::Variable(n) => &n.data,
        }
    }
}

impl HasNodeData for Expression<'_> {
    fn data(&self) -> &NodeData {
        match self {
            Expression::Identifier(n) => &n.data,
            Expression::Literal(n) => &n.data,
            Expression::SelfExpression(n) | Expression::Wildcard(n) => n,
            Expression::Parenthesized(n) => &n.data,
            Expression::Tuple(n) => &n.data,
            Expression::ArrayLiteral(n) => &n.data,
            Expression::DictionaryLiteral(n) => &n.data,
            Expression::ImplicitMember(n) => &n.data,
            Expression::ExplicitMember(n) => &n.data,
            Expression::FunctionCall(n) => &n.data,
            Expression::Subscript(n) => &n.data,
            Expression::ForcedValue(n) | Expression::OptionalChaining(n) => &n.data,
            Expression::PrefixOperator(n) => &n.data,
            Expression::PostfixOperator(n) => &n.data,
            Expression::TryOperator(n) => &n.data,
            Expression::Sequence(n) => &n.data,
        }
    }
}

impl HasNodeData for TypeNode<'_> {
    fn data(&self) -> &NodeData {
        match self {
            TypeNode::Identifier(n) => &n.data,
            TypeNode::Array(n) => &n.data,
            TypeNode::Dictionary(n) => &n.data,
            TypeNode::Tuple(n) => &n.data,
            TypeNode::Function(n) => &n.data,
            TypeNode::Optional(n) | TypeNode::ImplicitlyUnwrappedOptional(n) => &n.data,
        }
    }
}

impl HasNodeData for TupleType<'_> {
    fn data(&self) -> &NodeData {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brace_core::text::SourceLocation;

    fn range(sc: u32, ec: u32) -> SourceRange {
        SourceRange::from_coordinates(1, sc, 1, ec)
    }

    fn ident(name: &'static str, sc: u32) -> Expression<'static> {
        Expression::Identifier(Identifier {
            data: NodeData::new(SyntaxKind::IdentifierExpression, range(sc, sc + name.len() as u32)),
            name,
            escaped: false,
        })
    }

    fn plus(sc: u32) -> SequenceElement<'static> {
        SequenceElement::BinaryOperator(Operator {
            spelling: "+",
            class: OperatorClass::Regular,
            range: range(sc, sc + 1),
        })
    }

    #[test]
    fn test_well_formed_alternation() {
        let a = ident("a", 1);
        let b = ident("b", 5);
        let elements = [SequenceElement::Expression(&a), plus(3), SequenceElement::Expression(&b)];
        let seq = SequenceExpression {
            data: NodeData::new(SyntaxKind::SequenceExpression, range(1, 6)),
            elements: &elements,
        };
        assert!(seq.is_well_formed());
    }

    #[test]
    fn test_dangling_operator_is_not_well_formed() {
        let a = ident("a", 1);
        let elements = [SequenceElement::Expression(&a), plus(3)];
        let seq = SequenceExpression {
            data: NodeData::new(SyntaxKind::SequenceExpression, range(1, 4)),
            elements: &elements,
        };
        assert!(!seq.is_well_formed());
    }

    #[test]
    fn test_adjacent_operands_are_not_well_formed() {
        let a = ident("a", 1);
        let b = ident("b", 3);
        let elements = [SequenceElement::Expression(&a), SequenceElement::Expression(&b)];
        let seq = SequenceExpression {
            data: NodeData::new(SyntaxKind::SequenceExpression, range(1, 4)),
            elements: &elements,
        };
        assert!(!seq.is_well_formed());
    }

    #[test]
    fn test_expression_range_accessor() {
        let a = ident("abc", 4);
        assert_eq!(a.range().start, SourceLocation::new(1, 4));
        assert_eq!(a.range().end, SourceLocation::new(1, 7));
        assert_eq!(a.kind(), SyntaxKind::IdentifierExpression);
    }
}
