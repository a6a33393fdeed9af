//! AST visitor trait for traversing the syntax tree.

use crate::node::*;

/// A visitor that traverses the AST. Implement this trait to perform
/// operations on each node kind. Default implementations walk into children.
pub trait AstVisitor<'a> {
    fn visit_top_level_declaration(&mut self, node: &TopLevelDeclaration<'a>) {
        for stmt in node.statements.iter() {
            self.visit_statement(stmt);
        }
    }

    fn visit_statement(&mut self, stmt: &Statement<'a>) {
        match stmt {
            Statement::Expression(n) => self.visit_expression(n.expression),
            Statement::Import(n) => self.visit_import_declaration(n),
            Statement::Constant(n) | Statement::Variable(n) => self.visit_value_declaration(n),
        }
    }

    // -- Statements --

    fn visit_import_declaration(&mut self, _node: &ImportDeclaration<'a>) {}

    fn visit_value_declaration(&mut self, node: &ValueDeclaration<'a>) {
        self.visit_identifier(&node.name);
        if let Some(ty) = node.type_annotation {
            self.visit_type_node(ty);
        }
        if let Some(init) = node.initializer {
            self.visit_expression(init);
        }
    }

    fn visit_identifier(&mut self, _node: &Identifier<'a>) {}

    // -- Expressions --

    fn visit_expression(&mut self, expr: &Expression<'a>) {
        match expr {
            Expression::Identifier(n) => self.visit_identifier(n),
            Expression::Literal(_) => {}
            Expression::SelfExpression(_) => {}
            Expression::Wildcard(_) => {}
            Expression::Parenthesized(n) => self.visit_expression(n.expression),
            Expression::Tuple(n) => self.visit_arguments(n.elements),
            Expression::ArrayLiteral(n) => {
                for elem in n.elements.iter() {
                    self.visit_expression(elem);
                }
            }
            Expression::DictionaryLiteral(n) => {
                for entry in n.entries.iter() {
                    self.visit_expression(entry.key);
                    self.visit_expression(entry.value);
                }
            }
            Expression::ImplicitMember(n) => self.visit_identifier(&n.member),
            Expression::ExplicitMember(n) => self.visit_expression(n.base),
            Expression::FunctionCall(n) => {
                self.visit_expression(n.callee);
                self.visit_arguments(n.arguments);
            }
            Expression::Subscript(n) => {
                self.visit_expression(n.base);
                self.visit_arguments(n.arguments);
            }
            Expression::ForcedValue(n) | Expression::OptionalChaining(n) => {
                self.visit_expression(n.expression)
            }
            Expression::PrefixOperator(n) => {
                self.visit_operator(&n.operator);
                self.visit_expression(n.operand);
            }
            Expression::PostfixOperator(n) => {
                self.visit_expression(n.operand);
                self.visit_operator(&n.operator);
            }
            Expression::TryOperator(n) => self.visit_expression(n.expression),
            Expression::Sequence(n) => self.visit_sequence_expression(n),
        }
    }

    fn visit_arguments(&mut self, arguments: &[Argument<'a>]) {
        for arg in arguments.iter() {
            self.visit_expression(arg.expression);
        }
    }

    fn visit_operator(&mut self, _operator: &Operator<'a>) {}

    fn visit_sequence_expression(&mut self, node: &SequenceExpression<'a>) {
        for elem in node.elements.iter() {
            self.visit_sequence_element(elem);
        }
    }

    fn visit_sequence_element(&mut self, elem: &SequenceElement<'a>) {
        match elem {
            SequenceElement::Expression(e) => self.visit_expression(e),
            SequenceElement::BinaryOperator(op) => self.visit_operator(op),
            SequenceElement::AssignmentOperator(_) => {}
            SequenceElement::TernaryConditionalOperator(t) => {
                self.visit_expression(t.then_expression)
            }
            SequenceElement::TypeCheck(t)
            | SequenceElement::TypeCast(t)
            | SequenceElement::TypeConditionalCast(t)
            | SequenceElement::TypeForcedCast(t) => self.visit_type_node(t.type_node),
        }
    }

    // -- Types --

    fn visit_type_node(&mut self, node: &TypeNode<'a>) {
        match node {
            TypeNode::Identifier(n) => {
                for component in n.components.iter() {
                    for arg in component.generic_arguments.iter() {
                        self.visit_type_node(arg);
                    }
                }
            }
            TypeNode::Array(n) => self.visit_type_node(n.element),
            TypeNode::Dictionary(n) => {
                self.visit_type_node(n.key);
                self.visit_type_node(n.value);
            }
            TypeNode::Tuple(n) => {
                for elem in n.elements.iter() {
                    self.visit_type_node(elem.type_node);
                }
            }
            TypeNode::Function(n) => {
                for elem in n.parameters.elements.iter() {
                    self.visit_type_node(elem.type_node);
                }
                self.visit_type_node(n.result);
            }
            TypeNode::Optional(n) | TypeNode::ImplicitlyUnwrappedOptional(n) => {
                self.visit_type_node(n.wrapped)
            }
        }
    }
}
