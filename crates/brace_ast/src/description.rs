//! Canonical text of syntax nodes.
//!
//! The canonical form is whitespace-normalized: sequence elements are joined
//! by exactly one space, list items by `", "`, statements by a newline.
//! Comments are never reproduced.

use crate::node::*;
use crate::types::*;

/// Writes a node back out in canonical form.
pub trait TextDescription {
    fn write_description(&self, out: &mut String);

    fn text_description(&self) -> String {
        let mut out = String::new();
        self.write_description(&mut out);
        out
    }
}

fn write_separated<T: TextDescription>(out: &mut String, items: &[T], separator: &str) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        item.write_description(out);
    }
}

impl<T: TextDescription + ?Sized> TextDescription for &T {
    fn write_description(&self, out: &mut String) {
        (**self).write_description(out);
    }
}

// ============================================================================
// Top Level and Statements
// ============================================================================

impl TextDescription for TopLevelDeclaration<'_> {
    fn write_description(&self, out: &mut String) {
        if let Some(shebang) = &self.shebang {
            shebang.write_description(out);
            if !self.statements.is_empty() {
                out.push_str("\n\n");
            }
        }
        write_separated(out, self.statements, "\n");
    }
}

impl TextDescription for ShebangDirective<'_> {
    fn write_description(&self, out: &mut String) {
        out.push_str("#!");
        out.push_str(self.interpreter_directive);
    }
}

impl TextDescription for Statement<'_> {
    fn write_description(&self, out: &mut String) {
        match self {
            Statement::Expression(n) => n.expression.write_description(out),
            Statement::Import(n) => n.write_description(out),
            Statement::Constant(n) => {
                out.push_str("let ");
                n.write_description(out);
            }
            Statement::Variable(n) => {
                out.push_str("var ");
                n.write_description(out);
            }
        }
    }
}

impl TextDescription for ImportDeclaration<'_> {
    fn write_description(&self, out: &mut String) {
        out.push_str("import ");
        if let Some(kind) = self.import_kind {
            out.push_str(&kind.to_string());
            out.push(' ');
        }
        write_separated(out, self.path, ".");
    }
}

impl TextDescription for ImportPathComponent<'_> {
    fn write_description(&self, out: &mut String) {
        match self {
            ImportPathComponent::Identifier(n) => n.write_description(out),
            ImportPathComponent::Operator(n) => n.write_description(out),
        }
    }
}

/// Writes the part after `let`/`var`.
impl TextDescription for ValueDeclaration<'_> {
    fn write_description(&self, out: &mut String) {
        self.name.write_description(out);
        if let Some(ty) = self.type_annotation {
            out.push_str(": ");
            ty.write_description(out);
        }
        if let Some(init) = self.initializer {
            out.push_str(" = ");
            init.write_description(out);
        }
    }
}

// ============================================================================
// Names and Operators
// ============================================================================

impl TextDescription for Identifier<'_> {
    fn write_description(&self, out: &mut String) {
        if self.escaped {
            out.push('`');
            out.push_str(self.name);
            out.push('`');
        } else {
            out.push_str(self.name);
        }
    }
}

impl TextDescription for Operator<'_> {
    fn write_description(&self, out: &mut String) {
        out.push_str(self.spelling);
    }
}

// ============================================================================
// Expressions
// ============================================================================

impl TextDescription for Expression<'_> {
    fn write_description(&self, out: &mut String) {
        match self {
            Expression::Identifier(n) => n.write_description(out),
            Expression::Literal(n) => out.push_str(n.raw),
            Expression::SelfExpression(_) => out.push_str("self"),
            Expression::Wildcard(_) => out.push('_'),
            Expression::Parenthesized(n) => {
                out.push('(');
                n.expression.write_description(out);
                out.push(')');
            }
            Expression::Tuple(n) => {
                out.push('(');
                write_separated(out, n.elements, ", ");
                out.push(')');
            }
            Expression::ArrayLiteral(n) => {
                out.push('[');
                write_separated(out, n.elements, ", ");
                out.push(']');
            }
            Expression::DictionaryLiteral(n) => {
                out.push('[');
                if n.entries.is_empty() {
                    out.push(':');
                } else {
                    write_separated(out, n.entries, ", ");
                }
                out.push(']');
            }
            Expression::ImplicitMember(n) => {
                out.push('.');
                n.member.write_description(out);
            }
            Expression::ExplicitMember(n) => {
                n.base.write_description(out);
                out.push('.');
                match n.member {
                    MemberName::Named(ident) => ident.write_description(out),
                    MemberName::TupleIndex { index, .. } => out.push_str(index),
                }
            }
            Expression::FunctionCall(n) => {
                n.callee.write_description(out);
                out.push('(');
                write_separated(out, n.arguments, ", ");
                out.push(')');
            }
            Expression::Subscript(n) => {
                n.base.write_description(out);
                out.push('[');
                write_separated(out, n.arguments, ", ");
                out.push(']');
            }
            Expression::ForcedValue(n) => {
                n.expression.write_description(out);
                out.push('!');
            }
            Expression::OptionalChaining(n) => {
                n.expression.write_description(out);
                out.push('?');
            }
            Expression::PrefixOperator(n) => {
                n.operator.write_description(out);
                n.operand.write_description(out);
            }
            Expression::PostfixOperator(n) => {
                n.operand.write_description(out);
                n.operator.write_description(out);
            }
            Expression::TryOperator(n) => {
                out.push_str(&n.try_kind.to_string());
                out.push(' ');
                n.expression.write_description(out);
            }
            Expression::Sequence(n) => n.write_description(out),
        }
    }
}

impl TextDescription for Argument<'_> {
    fn write_description(&self, out: &mut String) {
        if let Some(label) = &self.label {
            label.write_description(out);
            out.push_str(": ");
        }
        self.expression.write_description(out);
    }
}

impl TextDescription for DictionaryEntry<'_> {
    fn write_description(&self, out: &mut String) {
        self.key.write_description(out);
        out.push_str(": ");
        self.value.write_description(out);
    }
}

impl TextDescription for SequenceExpression<'_> {
    fn write_description(&self, out: &mut String) {
        write_separated(out, self.elements, " ");
    }
}

impl TextDescription for SequenceElement<'_> {
    fn write_description(&self, out: &mut String) {
        match self {
            SequenceElement::Expression(e) => e.write_description(out),
            SequenceElement::BinaryOperator(op) => op.write_description(out),
            SequenceElement::AssignmentOperator(_) => out.push('='),
            SequenceElement::TernaryConditionalOperator(t) => {
                out.push_str("? ");
                t.then_expression.write_description(out);
                out.push_str(" :");
            }
            SequenceElement::TypeCheck(t) => write_type_operator(out, "is", t),
            SequenceElement::TypeCast(t) => write_type_operator(out, "as", t),
            SequenceElement::TypeConditionalCast(t) => write_type_operator(out, "as?", t),
            SequenceElement::TypeForcedCast(t) => write_type_operator(out, "as!", t),
        }
    }
}

fn write_type_operator(out: &mut String, keyword: &str, element: &TypeOperatorElement<'_>) {
    out.push_str(keyword);
    out.push(' ');
    element.type_node.write_description(out);
}

// ============================================================================
// Types
// ============================================================================

impl TextDescription for TypeNode<'_> {
    fn write_description(&self, out: &mut String) {
        match self {
            TypeNode::Identifier(n) => write_separated(out, n.components, "."),
            TypeNode::Array(n) => {
                out.push('[');
                n.element.write_description(out);
                out.push(']');
            }
            TypeNode::Dictionary(n) => {
                out.push('[');
                n.key.write_description(out);
                out.push_str(": ");
                n.value.write_description(out);
                out.push(']');
            }
            TypeNode::Tuple(n) => n.write_description(out),
            TypeNode::Function(n) => {
                n.parameters.write_description(out);
                match n.throws {
                    ThrowsKind::Nothrowing => {}
                    ThrowsKind::Throwing => out.push_str(" throws"),
                    ThrowsKind::Rethrowing => out.push_str(" rethrows"),
                }
                out.push_str(" -> ");
                n.result.write_description(out);
            }
            TypeNode::Optional(n) => {
                n.wrapped.write_description(out);
                out.push('?');
            }
            TypeNode::ImplicitlyUnwrappedOptional(n) => {
                n.wrapped.write_description(out);
                out.push('!');
            }
        }
    }
}

impl TextDescription for TypeNameComponent<'_> {
    fn write_description(&self, out: &mut String) {
        self.name.write_description(out);
        if !self.generic_arguments.is_empty() {
            out.push('<');
            write_separated(out, self.generic_arguments, ", ");
            out.push('>');
        }
    }
}

impl TextDescription for TupleType<'_> {
    fn write_description(&self, out: &mut String) {
        out.push('(');
        write_separated(out, self.elements, ", ");
        out.push(')');
    }
}

impl TextDescription for TupleTypeElement<'_> {
    fn write_description(&self, out: &mut String) {
        if let Some(label) = &self.label {
            label.write_description(out);
            out.push_str(": ");
        }
        self.type_node.write_description(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax_kind::SyntaxKind;
    use brace_core::text::SourceRange;

    fn data(kind: SyntaxKind) -> NodeData {
        NodeData::new(kind, SourceRange::from_coordinates(1, 1, 1, 1))
    }

    fn name(text: &'static str) -> Identifier<'static> {
        Identifier {
            data: data(SyntaxKind::IdentifierExpression),
            name: text,
            escaped: false,
        }
    }

    #[test]
    fn test_escaped_identifier() {
        let mut ident = name("class");
        ident.escaped = true;
        assert_eq!(ident.text_description(), "`class`");
    }

    #[test]
    fn test_sequence_joins_with_single_spaces() {
        let bump = bumpalo::Bump::new();
        let a = bump.alloc(Expression::Identifier(name("a")));
        let b = bump.alloc(Expression::Identifier(name("b")));
        let foo = bump.alloc(TypeNode::Identifier(TypeIdentifier {
            data: data(SyntaxKind::TypeIdentifier),
            components: bump.alloc_slice_fill_iter([TypeNameComponent {
                name: name("Foo"),
                generic_arguments: &[],
            }]),
        }));
        let elements = bump.alloc_slice_fill_iter([
            SequenceElement::Expression(a),
            SequenceElement::AssignmentOperator(data(SyntaxKind::Unknown).range),
            SequenceElement::Expression(b),
            SequenceElement::TypeConditionalCast(TypeOperatorElement {
                type_node: foo,
                range: data(SyntaxKind::Unknown).range,
            }),
        ]);
        let seq = SequenceExpression {
            data: data(SyntaxKind::SequenceExpression),
            elements,
        };
        assert_eq!(seq.text_description(), "a = b as? Foo");
    }

    #[test]
    fn test_empty_dictionary_literal() {
        let dict = Expression::DictionaryLiteral(DictionaryLiteralExpression {
            data: data(SyntaxKind::DictionaryLiteralExpression),
            entries: &[],
        });
        assert_eq!(dict.text_description(), "[:]");
    }
}
