//! Expression parsing.
//!
//! An expression is a prefix expression, optionally followed by a run of
//! binary-position elements. The run is kept flat as a sequence expression;
//! precedence is resolved by a later pass.

use brace_ast::node::*;
use brace_ast::syntax_kind::SyntaxKind;
use brace_ast::types::{LiteralKind, OperatorFixity, TokenFlags, TryKind};
use brace_core::arena::alloc_vec_in;
use brace_diagnostics::{ParseError, ParseResult};
use brace_scanner::operators::{builtin_operator, reserved_reason, BuiltinOperator};
use tracing::trace;

use crate::parser::Parser;

impl<'a> Parser<'a> {
    // ========================================================================
    // Sequence expressions
    // ========================================================================

    /// Parse a full expression. Returns the lone operand when no operator
    /// follows it, otherwise a sequence expression.
    pub(crate) fn parse_expression(&mut self) -> ParseResult<&'a Expression<'a>> {
        self.enter_recursion()?;
        let start = self.token_start();
        let first = self.parse_prefix_expression()?;
        let mut elements: Vec<SequenceElement<'a>> = Vec::new();

        loop {
            let element = match self.current_token() {
                SyntaxKind::IsKeyword | SyntaxKind::AsKeyword => self.parse_type_operator()?,
                kind if kind.is_operator() && self.continues_sequence() => {
                    self.parse_binary_operator()?
                }
                _ => break,
            };
            trace!(element = %element.range(), "sequence element");

            if elements.is_empty() {
                elements.push(SequenceElement::Expression(first));
            }
            let needs_operand = element.needs_right_operand();
            elements.push(element);
            if needs_operand {
                let operand = self.parse_prefix_expression()?;
                elements.push(SequenceElement::Expression(operand));
            }
        }
        self.exit_recursion();

        if elements.is_empty() {
            return Ok(first);
        }
        Ok(self.arena.alloc(Expression::Sequence(SequenceExpression {
            data: NodeData::new(SyntaxKind::SequenceExpression, self.range_from(start)),
            elements: alloc_vec_in(self.arena, elements),
        })))
    }

    /// Whether the current operator token extends the sequence.
    fn continues_sequence(&self) -> bool {
        match builtin_operator(self.token_text()) {
            BuiltinOperator::TernaryConditional | BuiltinOperator::Assignment => true,
            BuiltinOperator::Custom => self.operator_fixity() == OperatorFixity::Infix,
        }
    }

    fn parse_binary_operator(&mut self) -> ParseResult<SequenceElement<'a>> {
        let operator = self.current_operator();
        let builtin = builtin_operator(operator.spelling);
        if builtin == BuiltinOperator::TernaryConditional {
            return self.parse_ternary_conditional();
        }
        if let Some(reason) = reserved_reason(operator.spelling, self.operator_fixity()) {
            trace!(reason, "rejected binary operator");
            return Err(ParseError::InvalidOperatorSpelling {
                spelling: operator.spelling.to_string(),
                at: self.current_location(),
            });
        }
        self.next_token()?;
        Ok(match builtin {
            BuiltinOperator::Assignment => SequenceElement::AssignmentOperator(operator.range),
            _ => SequenceElement::BinaryOperator(operator),
        })
    }

    /// `? then-expression :`
    fn parse_ternary_conditional(&mut self) -> ParseResult<SequenceElement<'a>> {
        let start = self.token_start();
        self.next_token()?;
        let then_expression = self.parse_expression()?;
        if self.current_token() != SyntaxKind::ColonToken {
            return Err(ParseError::ExpectedColonAfterTernary {
                at: self.current_location(),
            });
        }
        self.next_token()?;
        Ok(SequenceElement::TernaryConditionalOperator(TernaryConditionalElement {
            then_expression,
            range: self.range_from(start),
        }))
    }

    /// `is T`, `as T`, `as? T` or `as! T`.
    fn parse_type_operator(&mut self) -> ParseResult<SequenceElement<'a>> {
        let start = self.token_start();
        let keyword = self.current_token();
        self.next_token()?;

        let mut suffix = None;
        if keyword == SyntaxKind::AsKeyword
            && self.token_flags().is_left_bound()
            && (self.is_operator("?") || self.is_operator("!"))
        {
            suffix = Some(self.token_text());
            self.next_token()?;
        }

        let type_node = self.parse_type()?;
        let element = TypeOperatorElement {
            type_node,
            range: self.range_from(start),
        };
        Ok(match (keyword, suffix) {
            (SyntaxKind::IsKeyword, _) => SequenceElement::TypeCheck(element),
            (_, Some("?")) => SequenceElement::TypeConditionalCast(element),
            (_, Some(_)) => SequenceElement::TypeForcedCast(element),
            (_, None) => SequenceElement::TypeCast(element),
        })
    }

    // ========================================================================
    // Prefix expressions
    // ========================================================================

    pub(crate) fn parse_prefix_expression(&mut self) -> ParseResult<&'a Expression<'a>> {
        let start = self.token_start();
        match self.current_token() {
            SyntaxKind::TryKeyword => self.parse_try_expression(),
            kind if kind.is_operator() => {
                let operator = self.current_operator();
                if let Some(reason) = reserved_reason(operator.spelling, OperatorFixity::Prefix) {
                    trace!(reason, "rejected prefix operator");
                    return Err(ParseError::InvalidOperatorSpelling {
                        spelling: operator.spelling.to_string(),
                        at: self.current_location(),
                    });
                }
                if !self.token_flags().is_right_bound() {
                    return Err(self.unexpected_token("expression"));
                }
                self.enter_recursion()?;
                self.next_token()?;
                let operand = self.parse_prefix_expression()?;
                self.exit_recursion();
                Ok(self.arena.alloc(Expression::PrefixOperator(PrefixOperatorExpression {
                    data: NodeData::new(SyntaxKind::PrefixOperatorExpression, self.range_from(start)),
                    operator,
                    operand,
                })))
            }
            _ => {
                let primary = self.parse_primary_expression()?;
                self.parse_postfix_expression(start, primary)
            }
        }
    }

    /// `try`, `try?` or `try!` applied to the following prefix expression.
    fn parse_try_expression(&mut self) -> ParseResult<&'a Expression<'a>> {
        let start = self.token_start();
        self.next_token()?;

        let try_kind = if !self.token_flags().is_left_bound() {
            TryKind::Try
        } else if self.is_operator("?") {
            TryKind::Optional
        } else if self.is_operator("!") {
            TryKind::Forced
        } else {
            TryKind::Try
        };
        if try_kind != TryKind::Try {
            self.next_token()?;
        }

        self.enter_recursion()?;
        let expression = self.parse_prefix_expression()?;
        self.exit_recursion();
        Ok(self.arena.alloc(Expression::TryOperator(TryOperatorExpression {
            data: NodeData::new(SyntaxKind::TryOperatorExpression, self.range_from(start)),
            try_kind,
            expression,
        })))
    }

    // ========================================================================
    // Postfix expressions
    // ========================================================================

    fn parse_postfix_expression(
        &mut self,
        start: usize,
        mut expression: &'a Expression<'a>,
    ) -> ParseResult<&'a Expression<'a>> {
        loop {
            let next = match self.current_token() {
                SyntaxKind::DotToken => {
                    self.next_token()?;
                    let member = self.parse_member_name()?;
                    Expression::ExplicitMember(ExplicitMemberExpression {
                        data: NodeData::new(SyntaxKind::ExplicitMemberExpression, self.range_from(start)),
                        base: expression,
                        member,
                    })
                }
                SyntaxKind::OpenParenToken if !self.has_preceding_line_break() => {
                    self.next_token()?;
                    let arguments = self.parse_argument_list(SyntaxKind::CloseParenToken)?;
                    Expression::FunctionCall(FunctionCallExpression {
                        data: NodeData::new(SyntaxKind::FunctionCallExpression, self.range_from(start)),
                        callee: expression,
                        arguments: alloc_vec_in(self.arena, arguments),
                    })
                }
                SyntaxKind::OpenBracketToken if !self.has_preceding_line_break() => {
                    self.next_token()?;
                    let arguments = self.parse_argument_list(SyntaxKind::CloseBracketToken)?;
                    Expression::Subscript(SubscriptExpression {
                        data: NodeData::new(SyntaxKind::SubscriptExpression, self.range_from(start)),
                        base: expression,
                        arguments: alloc_vec_in(self.arena, arguments),
                    })
                }
                kind if kind.is_operator() && self.token_flags().is_left_bound() => {
                    match self.parse_postfix_operator(start, expression)? {
                        Some(next) => next,
                        None => break,
                    }
                }
                _ => break,
            };
            expression = self.arena.alloc(next);
        }
        Ok(expression)
    }

    /// A left-bound operator after an operand: forced value, optional
    /// chaining or a user postfix operator. `None` leaves the token for the
    /// sequence builder.
    fn parse_postfix_operator(
        &mut self,
        start: usize,
        operand: &'a Expression<'a>,
    ) -> ParseResult<Option<Expression<'a>>> {
        let spelling = self.token_text();
        if spelling == "!" {
            self.next_token()?;
            return Ok(Some(Expression::ForcedValue(WrappedExpression {
                data: NodeData::new(SyntaxKind::ForcedValueExpression, self.range_from(start)),
                expression: operand,
            })));
        }
        if spelling == "?" {
            if !matches!(self.scanner.char_after_token(), Some('.' | '(' | '[')) {
                return Ok(None);
            }
            self.next_token()?;
            return Ok(Some(Expression::OptionalChaining(WrappedExpression {
                data: NodeData::new(SyntaxKind::OptionalChainingExpression, self.range_from(start)),
                expression: operand,
            })));
        }
        if spelling == "=" || self.operator_fixity() != OperatorFixity::Postfix {
            return Ok(None);
        }

        let operator = self.current_operator();
        if let Some(reason) = reserved_reason(spelling, OperatorFixity::Postfix) {
            trace!(reason, "rejected postfix operator");
            return Err(ParseError::InvalidOperatorSpelling {
                spelling: spelling.to_string(),
                at: self.current_location(),
            });
        }
        self.next_token()?;
        Ok(Some(Expression::PostfixOperator(PostfixOperatorExpression {
            data: NodeData::new(SyntaxKind::PostfixOperatorExpression, self.range_from(start)),
            operand,
            operator,
        })))
    }

    /// The part after `.` in a member expression: a name or a tuple index.
    fn parse_member_name(&mut self) -> ParseResult<MemberName<'a>> {
        let is_tuple_index = self.current_token() == SyntaxKind::IntegerLiteral
            && !self.token_flags().intersects(TokenFlags::NUMERIC_LITERAL_FLAGS);
        if is_tuple_index {
            let index = self.token_text();
            let range = self.current_token_range();
            self.next_token()?;
            return Ok(MemberName::TupleIndex { index, range });
        }
        Ok(MemberName::Named(self.parse_name("member name")?))
    }

    // ========================================================================
    // Primary expressions
    // ========================================================================

    fn parse_primary_expression(&mut self) -> ParseResult<&'a Expression<'a>> {
        let start = self.token_start();
        let expression = match self.current_token() {
            SyntaxKind::Identifier | SyntaxKind::SelfTypeKeyword => {
                Expression::Identifier(self.take_identifier(SyntaxKind::IdentifierExpression)?)
            }
            SyntaxKind::IntegerLiteral => self.parse_literal(LiteralKind::Integer)?,
            SyntaxKind::FloatingPointLiteral => self.parse_literal(LiteralKind::FloatingPoint)?,
            SyntaxKind::StringLiteral => self.parse_literal(LiteralKind::String)?,
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
                self.parse_literal(LiteralKind::Boolean)?
            }
            SyntaxKind::NilKeyword => self.parse_literal(LiteralKind::Nil)?,
            SyntaxKind::SelfKeyword => {
                let range = self.current_token_range();
                self.next_token()?;
                Expression::SelfExpression(NodeData::new(SyntaxKind::SelfExpression, range))
            }
            SyntaxKind::UnderscoreKeyword => {
                let range = self.current_token_range();
                self.next_token()?;
                Expression::Wildcard(NodeData::new(SyntaxKind::WildcardExpression, range))
            }
            SyntaxKind::OpenParenToken => self.parse_parenthesized_or_tuple()?,
            SyntaxKind::OpenBracketToken => self.parse_collection_literal()?,
            SyntaxKind::DotToken => {
                self.next_token()?;
                let member = self.parse_name("member name")?;
                Expression::ImplicitMember(ImplicitMemberExpression {
                    data: NodeData::new(SyntaxKind::ImplicitMemberExpression, self.range_from(start)),
                    member,
                })
            }
            SyntaxKind::EndOfFileToken => {
                return Err(ParseError::UnexpectedEndOfInput {
                    context: "expression",
                    at: self.current_location(),
                })
            }
            _ => return Err(self.unexpected_token("expression")),
        };
        Ok(self.arena.alloc(expression))
    }

    fn parse_literal(&mut self, literal_kind: LiteralKind) -> ParseResult<Expression<'a>> {
        let literal = LiteralExpression {
            data: NodeData::new(SyntaxKind::LiteralExpression, self.current_token_range()),
            literal_kind,
            raw: self.token_text(),
            flags: self.token_flags() & TokenFlags::NUMERIC_LITERAL_FLAGS,
        };
        self.next_token()?;
        Ok(Expression::Literal(literal))
    }

    /// `(a)` is a parenthesized expression; `()`, `(a, b)` and `(x: a)` are
    /// tuples.
    fn parse_parenthesized_or_tuple(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.token_start();
        self.next_token()?;
        let elements = self.parse_argument_list(SyntaxKind::CloseParenToken)?;
        let range = self.range_from(start);

        if elements.len() == 1 && elements[0].label.is_none() {
            return Ok(Expression::Parenthesized(ParenthesizedExpression {
                data: NodeData::new(SyntaxKind::ParenthesizedExpression, range),
                expression: elements[0].expression,
            }));
        }
        Ok(Expression::Tuple(TupleExpression {
            data: NodeData::new(SyntaxKind::TupleExpression, range),
            elements: alloc_vec_in(self.arena, elements),
        }))
    }

    /// `[a, b]`, `[k: v]` or `[:]`. A trailing comma is allowed.
    fn parse_collection_literal(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.token_start();
        self.next_token()?;

        if self.optional_token(SyntaxKind::ColonToken)? {
            self.expect_token(SyntaxKind::CloseBracketToken)?;
            return Ok(Expression::DictionaryLiteral(DictionaryLiteralExpression {
                data: NodeData::new(SyntaxKind::DictionaryLiteralExpression, self.range_from(start)),
                entries: &[],
            }));
        }

        let mut elements = Vec::new();
        let mut entries = Vec::new();
        let mut is_dictionary = false;
        while self.current_token() != SyntaxKind::CloseBracketToken {
            let key = self.parse_expression()?;
            if elements.is_empty() && entries.is_empty() {
                is_dictionary = self.current_token() == SyntaxKind::ColonToken;
            }
            if is_dictionary {
                self.expect_token(SyntaxKind::ColonToken)?;
                let value = self.parse_expression()?;
                entries.push(DictionaryEntry { key, value });
            } else {
                elements.push(key);
            }
            if !self.optional_token(SyntaxKind::CommaToken)? {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseBracketToken)?;

        let range = self.range_from(start);
        if is_dictionary {
            Ok(Expression::DictionaryLiteral(DictionaryLiteralExpression {
                data: NodeData::new(SyntaxKind::DictionaryLiteralExpression, range),
                entries: alloc_vec_in(self.arena, entries),
            }))
        } else {
            Ok(Expression::ArrayLiteral(ArrayLiteralExpression {
                data: NodeData::new(SyntaxKind::ArrayLiteralExpression, range),
                elements: alloc_vec_in(self.arena, elements),
            }))
        }
    }

    /// Comma-separated, optionally labeled expressions up to and including
    /// `close`. The opening delimiter has already been consumed.
    fn parse_argument_list(&mut self, close: SyntaxKind) -> ParseResult<Vec<Argument<'a>>> {
        let mut arguments = Vec::new();
        while self.current_token() != close {
            let label = if self.is_label()? {
                let label = self.parse_name("argument label")?;
                self.expect_token(SyntaxKind::ColonToken)?;
                Some(label)
            } else {
                None
            };
            let expression = self.parse_expression()?;
            arguments.push(Argument { label, expression });
            if !self.optional_token(SyntaxKind::CommaToken)? {
                break;
            }
        }
        self.expect_token(close)?;
        Ok(arguments)
    }

    /// Whether the current token is a name followed by `:`.
    pub(crate) fn is_label(&mut self) -> ParseResult<bool> {
        let kind = self.current_token();
        if kind != SyntaxKind::Identifier && !kind.is_contextual_name() {
            return Ok(false);
        }
        self.look_ahead(|p| {
            p.next_token()?;
            Ok(p.current_token() == SyntaxKind::ColonToken)
        })
    }
}
