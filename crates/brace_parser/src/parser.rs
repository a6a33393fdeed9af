//! The brace parser: infrastructure, top-level assembly and statements.
//!
//! This is a recursive descent parser. It consumes tokens from the scanner
//! and builds an arena-allocated AST. The first error stops the parse and is
//! returned to the caller.

use brace_ast::node::*;
use brace_ast::syntax_kind::SyntaxKind;
use brace_ast::types::{OperatorFixity, TokenFlags};
use brace_core::arena::alloc_vec_in;
use brace_core::text::{SourceLocation, SourceRange, TextRange};
use brace_diagnostics::{ParseError, ParseResult};
use brace_scanner::operators::classify;
use brace_scanner::Scanner;
use bumpalo::Bump;
use tracing::{debug, instrument, trace};

use crate::options::ParseOptions;
use crate::utilities::{describe_token, import_kind_of};

/// The parser produces a syntax tree from brace source text.
pub struct Parser<'a> {
    pub(crate) arena: &'a Bump,
    pub(crate) scanner: Scanner<'a>,
    identifier: &'a str,
    pub(crate) options: ParseOptions,
    /// Tracks recursion depth to bound nesting.
    pub(crate) recursion_depth: u32,
    /// End offset of the last consumed token.
    pub(crate) previous_token_end: usize,
}

impl<'a> Parser<'a> {
    pub fn new(arena: &'a Bump, identifier: &str, source_text: &str) -> Self {
        Self::with_options(arena, identifier, source_text, ParseOptions::default())
    }

    /// The source text and identifier are copied into the arena, so the
    /// tree only borrows from `arena`.
    pub fn with_options(
        arena: &'a Bump,
        identifier: &str,
        source_text: &str,
        options: ParseOptions,
    ) -> Self {
        let text: &'a str = arena.alloc_str(source_text);
        Self {
            arena,
            scanner: Scanner::new(text),
            identifier: arena.alloc_str(identifier),
            options,
            recursion_depth: 0,
            previous_token_end: 0,
        }
    }

    /// Parse a whole source unit.
    #[instrument(level = "debug", skip(self), fields(identifier = self.identifier))]
    pub fn parse_top_level_declaration(mut self) -> ParseResult<TopLevelDeclaration<'a>> {
        let shebang = if self.options.allow_shebang {
            self.scanner.scan_shebang().map(|range| self.make_shebang(range))
        } else {
            None
        };
        self.next_token()?;

        let statements = self.parse_statements()?;
        let text = self.scanner.text();
        let range = SourceRange::new(SourceLocation::START, self.scanner.location_of(text.len()));
        let comments = self.scanner.take_comments();
        debug!(
            statements = statements.len(),
            comments = comments.len(),
            shebang = shebang.is_some(),
            "parsed top-level declaration"
        );

        Ok(TopLevelDeclaration {
            data: NodeData::new(SyntaxKind::TopLevelDeclaration, range),
            identifier: self.identifier,
            statements,
            comments,
            shebang,
            lexical_parent: None,
        })
    }

    /// Parse input that must consist of exactly one expression.
    #[instrument(level = "debug", skip(self), fields(identifier = self.identifier))]
    pub fn parse_standalone_expression(mut self) -> ParseResult<&'a Expression<'a>> {
        self.next_token()?;
        let expression = self.parse_expression()?;
        if self.current_token() != SyntaxKind::EndOfFileToken {
            return Err(self.unexpected_token("end of input"));
        }
        debug!(range = %expression.range(), "parsed expression");
        Ok(expression)
    }

    fn make_shebang(&self, range: TextRange) -> ShebangDirective<'a> {
        let text = self.scanner.text();
        let line = &text[range.to_range()];
        ShebangDirective {
            data: NodeData::new(
                SyntaxKind::ShebangDirective,
                self.scanner.range_of(range.pos as usize, range.end as usize),
            ),
            interpreter_directive: line[2..].trim(),
        }
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    pub(crate) fn current_token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    pub(crate) fn next_token(&mut self) -> ParseResult<SyntaxKind> {
        self.previous_token_end = self.scanner.token_end();
        self.scanner.scan()
    }

    #[inline]
    pub(crate) fn token_start(&self) -> usize {
        self.scanner.token_start()
    }

    #[inline]
    pub(crate) fn token_text(&self) -> &'a str {
        self.scanner.token_text()
    }

    #[inline]
    pub(crate) fn token_flags(&self) -> TokenFlags {
        self.scanner.token_flags()
    }

    #[inline]
    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    /// Whether the current token is the operator spelled exactly `spelling`.
    pub(crate) fn is_operator(&self, spelling: &str) -> bool {
        self.current_token().is_operator() && self.token_text() == spelling
    }

    /// Whether the current token is an operator starting with `prefix` and
    /// written with no whitespace on its left.
    pub(crate) fn is_left_bound_operator_prefix(&self, prefix: char) -> bool {
        self.current_token().is_operator()
            && self.token_flags().is_left_bound()
            && self.token_text().starts_with(prefix)
    }

    pub(crate) fn operator_fixity(&self) -> OperatorFixity {
        self.token_flags().operator_fixity()
    }

    /// Consume the current token if it is `kind`.
    pub(crate) fn optional_token(&mut self, kind: SyntaxKind) -> ParseResult<bool> {
        if self.current_token() == kind {
            self.next_token()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consume a token of the given kind or fail.
    pub(crate) fn expect_token(&mut self, kind: SyntaxKind) -> ParseResult<()> {
        if self.current_token() == kind {
            self.next_token()?;
            return Ok(());
        }
        let expected = kind
            .punctuation_text()
            .or_else(|| kind.keyword_text())
            .map_or_else(|| format!("{kind:?}"), |text| format!("'{text}'"));
        Err(self.unexpected_token(&expected))
    }

    /// Consume the current operator token, or just its first character when
    /// the token is longer.
    pub(crate) fn consume_operator_prefix(&mut self) -> ParseResult<()> {
        if self.token_text().len() > 1 {
            self.scanner.split_operator_token(1);
        }
        self.next_token()?;
        Ok(())
    }

    /// Build an operator from the current token.
    pub(crate) fn current_operator(&self) -> Operator<'a> {
        let spelling = self.token_text();
        Operator {
            spelling,
            class: classify(spelling),
            range: self.current_token_range(),
        }
    }

    // ========================================================================
    // Locations and errors
    // ========================================================================

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.scanner.location_of(self.token_start())
    }

    pub(crate) fn current_token_range(&self) -> SourceRange {
        self.scanner.range_of(self.token_start(), self.scanner.token_end())
    }

    /// Range from `start` to the end of the last consumed token.
    pub(crate) fn range_from(&self, start: usize) -> SourceRange {
        self.scanner.range_of(start, self.previous_token_end.max(start))
    }

    pub(crate) fn unexpected_token(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: describe_token(self.current_token(), self.token_text()),
            at: self.current_location(),
        }
    }

    pub(crate) fn enter_recursion(&mut self) -> ParseResult<()> {
        self.recursion_depth += 1;
        if self.recursion_depth > self.options.max_recursion_depth {
            return Err(ParseError::RecursionDepthExceeded {
                limit: self.options.max_recursion_depth,
                at: self.current_location(),
            });
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth -= 1;
    }

    /// Run `f` against a copy of the scanner position and roll back.
    pub(crate) fn look_ahead<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let state = self.scanner.save_state();
        let previous_end = self.previous_token_end;
        let result = f(self);
        self.scanner.restore_state(state);
        self.previous_token_end = previous_end;
        result
    }

    // ========================================================================
    // Statement parsing
    // ========================================================================

    fn parse_statements(&mut self) -> ParseResult<&'a [Statement<'a>]> {
        let mut statements = Vec::new();
        loop {
            while self.optional_token(SyntaxKind::SemicolonToken)? {}
            if self.current_token() == SyntaxKind::EndOfFileToken {
                break;
            }
            let statement = self.parse_statement()?;
            trace!(kind = ?statement.kind(), range = %statement.range(), "statement");
            statements.push(statement);

            match self.current_token() {
                SyntaxKind::EndOfFileToken | SyntaxKind::SemicolonToken => {}
                _ if self.has_preceding_line_break() => {}
                _ => return Err(self.unexpected_token("line break or ';'")),
            }
        }
        Ok(alloc_vec_in(self.arena, statements))
    }

    fn parse_statement(&mut self) -> ParseResult<Statement<'a>> {
        match self.current_token() {
            SyntaxKind::ImportKeyword => self.parse_import_declaration().map(Statement::Import),
            SyntaxKind::LetKeyword => self
                .parse_value_declaration(SyntaxKind::ConstantDeclaration)
                .map(Statement::Constant),
            SyntaxKind::VarKeyword => self
                .parse_value_declaration(SyntaxKind::VariableDeclaration)
                .map(Statement::Variable),
            _ => {
                let expression = self.parse_expression()?;
                Ok(Statement::Expression(ExpressionStatement {
                    data: NodeData::new(SyntaxKind::ExpressionStatement, expression.range()),
                    expression,
                    lexical_parent: None,
                }))
            }
        }
    }

    /// `import [kind] path(.path)*`
    fn parse_import_declaration(&mut self) -> ParseResult<ImportDeclaration<'a>> {
        let start = self.token_start();
        self.expect_token(SyntaxKind::ImportKeyword)?;

        let import_kind = import_kind_of(self.current_token());
        if import_kind.is_some() {
            self.next_token()?;
        }

        let mut path = vec![self.parse_import_path_component()?];
        while self.current_token() == SyntaxKind::DotToken && !self.has_preceding_line_break() {
            self.next_token()?;
            path.push(self.parse_import_path_component()?);
        }

        Ok(ImportDeclaration {
            data: NodeData::new(SyntaxKind::ImportDeclaration, self.range_from(start)),
            import_kind,
            path: alloc_vec_in(self.arena, path),
            lexical_parent: None,
        })
    }

    fn parse_import_path_component(&mut self) -> ParseResult<ImportPathComponent<'a>> {
        if self.current_token().is_operator() {
            let operator = self.current_operator();
            self.next_token()?;
            return Ok(ImportPathComponent::Operator(operator));
        }
        let name = self.parse_name("module or declaration name")?;
        Ok(ImportPathComponent::Identifier(name))
    }

    /// `let`/`var` name [: Type] [= initializer]
    fn parse_value_declaration(&mut self, kind: SyntaxKind) -> ParseResult<ValueDeclaration<'a>> {
        let start = self.token_start();
        self.next_token()?;

        let name = self.parse_identifier()?;
        let type_annotation = if self.optional_token(SyntaxKind::ColonToken)? {
            Some(self.parse_type()?)
        } else {
            None
        };
        let initializer = if self.is_operator("=") {
            self.next_token()?;
            Some(self.parse_expression()?)
        } else {
            None
        };
        if type_annotation.is_none() && initializer.is_none() {
            return Err(self.unexpected_token("':' or '='"));
        }

        Ok(ValueDeclaration {
            data: NodeData::new(kind, self.range_from(start)),
            name,
            type_annotation,
            initializer,
            lexical_parent: None,
        })
    }

    // ========================================================================
    // Names
    // ========================================================================

    /// An identifier, plain or escaped.
    pub(crate) fn parse_identifier(&mut self) -> ParseResult<Identifier<'a>> {
        if self.current_token() != SyntaxKind::Identifier {
            return Err(self.unexpected_token("identifier"));
        }
        self.take_identifier(SyntaxKind::Identifier)
    }

    /// An identifier or a keyword usable as a name, as after `.`.
    pub(crate) fn parse_name(&mut self, expected: &str) -> ParseResult<Identifier<'a>> {
        let kind = self.current_token();
        if kind != SyntaxKind::Identifier && !kind.is_contextual_name() {
            return Err(self.unexpected_token(expected));
        }
        self.take_identifier(SyntaxKind::Identifier)
    }

    /// Build an identifier from the current token and advance.
    pub(crate) fn take_identifier(&mut self, kind: SyntaxKind) -> ParseResult<Identifier<'a>> {
        let identifier = Identifier {
            data: NodeData::new(kind, self.current_token_range()),
            name: self.scanner.token_value(),
            escaped: self.token_flags().contains(TokenFlags::ESCAPED_IDENTIFIER),
        };
        self.next_token()?;
        Ok(identifier)
    }
}
