//! Type parsing for annotations and cast targets.

use brace_ast::node::*;
use brace_ast::syntax_kind::SyntaxKind;
use brace_ast::types::ThrowsKind;
use brace_core::arena::alloc_vec_in;
use brace_diagnostics::{ParseError, ParseResult};

use crate::parser::Parser;

impl<'a> Parser<'a> {
    /// Parse a type, including any trailing `?` and `!` suffixes.
    pub(crate) fn parse_type(&mut self) -> ParseResult<&'a TypeNode<'a>> {
        self.enter_recursion()?;
        let start = self.token_start();
        let mut type_node = self.parse_primary_type()?;

        loop {
            let kind = if self.is_left_bound_operator_prefix('?') {
                SyntaxKind::OptionalType
            } else if self.is_left_bound_operator_prefix('!') {
                SyntaxKind::ImplicitlyUnwrappedOptionalType
            } else {
                break;
            };
            self.consume_operator_prefix()?;
            let wrapped = WrappedType {
                data: NodeData::new(kind, self.range_from(start)),
                wrapped: type_node,
            };
            type_node = self.arena.alloc(if kind == SyntaxKind::OptionalType {
                TypeNode::Optional(wrapped)
            } else {
                TypeNode::ImplicitlyUnwrappedOptional(wrapped)
            });
        }

        self.exit_recursion();
        Ok(type_node)
    }

    fn parse_primary_type(&mut self) -> ParseResult<&'a TypeNode<'a>> {
        let start = self.token_start();
        let type_node = match self.current_token() {
            SyntaxKind::Identifier | SyntaxKind::SelfTypeKeyword => self.parse_type_identifier()?,
            SyntaxKind::OpenBracketToken => {
                self.next_token()?;
                let key = self.parse_type()?;
                if self.optional_token(SyntaxKind::ColonToken)? {
                    let value = self.parse_type()?;
                    self.expect_token(SyntaxKind::CloseBracketToken)?;
                    TypeNode::Dictionary(DictionaryType {
                        data: NodeData::new(SyntaxKind::DictionaryType, self.range_from(start)),
                        key,
                        value,
                    })
                } else {
                    self.expect_token(SyntaxKind::CloseBracketToken)?;
                    TypeNode::Array(ArrayType {
                        data: NodeData::new(SyntaxKind::ArrayType, self.range_from(start)),
                        element: key,
                    })
                }
            }
            SyntaxKind::OpenParenToken => {
                let tuple = self.parse_tuple_type()?;
                let is_function = matches!(
                    self.current_token(),
                    SyntaxKind::ThrowsKeyword | SyntaxKind::RethrowsKeyword
                ) || self.is_operator("->");
                if is_function {
                    self.parse_function_type(start, tuple)?
                } else {
                    TypeNode::Tuple(tuple)
                }
            }
            SyntaxKind::EndOfFileToken => {
                return Err(ParseError::UnexpectedEndOfInput {
                    context: "type",
                    at: self.current_location(),
                })
            }
            _ => return Err(self.unexpected_token("type")),
        };
        Ok(self.arena.alloc(type_node))
    }

    /// `A.B<C, D>.E`
    fn parse_type_identifier(&mut self) -> ParseResult<TypeNode<'a>> {
        let start = self.token_start();
        let mut components = Vec::new();
        let mut name = self.take_identifier(SyntaxKind::Identifier)?;

        loop {
            let generic_arguments = if self.is_left_bound_operator_prefix('<') {
                self.parse_generic_arguments()?
            } else {
                &[]
            };
            components.push(TypeNameComponent {
                name,
                generic_arguments,
            });
            if self.current_token() != SyntaxKind::DotToken || self.has_preceding_line_break() {
                break;
            }
            self.next_token()?;
            name = self.parse_name("type name")?;
        }

        Ok(TypeNode::Identifier(TypeIdentifier {
            data: NodeData::new(SyntaxKind::TypeIdentifier, self.range_from(start)),
            components: alloc_vec_in(self.arena, components),
        }))
    }

    /// `<A, B>`. Operator tokens such as `>>` or `>?` that merely start with
    /// the closing angle are split so the remainder is scanned again.
    fn parse_generic_arguments(&mut self) -> ParseResult<&'a [&'a TypeNode<'a>]> {
        self.consume_operator_prefix()?;
        let mut arguments = vec![self.parse_type()?];
        while self.optional_token(SyntaxKind::CommaToken)? {
            arguments.push(self.parse_type()?);
        }
        if !(self.current_token().is_operator() && self.token_text().starts_with('>')) {
            return Err(self.unexpected_token("'>'"));
        }
        self.consume_operator_prefix()?;
        Ok(alloc_vec_in(self.arena, arguments))
    }

    /// `(label: A, B)`
    fn parse_tuple_type(&mut self) -> ParseResult<TupleType<'a>> {
        let start = self.token_start();
        self.expect_token(SyntaxKind::OpenParenToken)?;

        let mut elements = Vec::new();
        while self.current_token() != SyntaxKind::CloseParenToken {
            let label = if self.is_label()? {
                let label = self.parse_name("element label")?;
                self.expect_token(SyntaxKind::ColonToken)?;
                Some(label)
            } else {
                None
            };
            let type_node = self.parse_type()?;
            elements.push(TupleTypeElement { label, type_node });
            if !self.optional_token(SyntaxKind::CommaToken)? {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseParenToken)?;

        Ok(TupleType {
            data: NodeData::new(SyntaxKind::TupleType, self.range_from(start)),
            elements: alloc_vec_in(self.arena, elements),
        })
    }

    /// `(params) [throws | rethrows] -> Result`
    fn parse_function_type(
        &mut self,
        start: usize,
        parameters: TupleType<'a>,
    ) -> ParseResult<TypeNode<'a>> {
        let throws = match self.current_token() {
            SyntaxKind::ThrowsKeyword => ThrowsKind::Throwing,
            SyntaxKind::RethrowsKeyword => ThrowsKind::Rethrowing,
            _ => ThrowsKind::Nothrowing,
        };
        if throws != ThrowsKind::Nothrowing {
            self.next_token()?;
        }
        if !self.is_operator("->") {
            return Err(self.unexpected_token("'->'"));
        }
        self.next_token()?;
        let result = self.parse_type()?;

        Ok(TypeNode::Function(FunctionType {
            data: NodeData::new(SyntaxKind::FunctionType, self.range_from(start)),
            parameters: self.arena.alloc(parameters),
            throws,
            result,
        }))
    }
}
