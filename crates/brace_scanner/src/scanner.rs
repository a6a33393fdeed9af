//! The brace scanner.
//!
//! Converts source text into a stream of tokens for the parser. Whitespace,
//! line breaks and comments are trivia: they never become tokens, but they
//! set the token flags that decide how operators bind, and every comment is
//! recorded in the scanner's comment set.

use crate::char_codes::*;
use crate::operators::{is_dot_operator_character, is_operator_character};
use crate::token::TokenInfo;
use brace_ast::syntax_kind::SyntaxKind;
use brace_ast::types::{Comment, TokenFlags};
use brace_core::collections::FxHashSet;
use brace_core::text::{LineMap, SourceLocation, SourceRange, TextPos, TextRange};
use brace_diagnostics::{ParseError, ParseResult};

/// Saved scanner state for lookahead.
#[derive(Debug, Clone, Copy)]
pub struct ScannerState {
    pos: usize,
    token_start: usize,
    token: SyntaxKind,
    token_flags: TokenFlags,
}

/// The scanner converts brace source text into tokens.
pub struct Scanner<'s> {
    /// The source text being scanned.
    text: &'s str,
    line_map: LineMap<'s>,
    /// Current byte offset in the text.
    pos: usize,
    /// Start of the current token (after leading trivia).
    token_start: usize,
    token: SyntaxKind,
    token_flags: TokenFlags,
    /// Every comment seen so far. Rescanning after a lookahead inserts the
    /// same `(location, content)` again, which the set absorbs.
    comments: FxHashSet<Comment>,
}

impl<'s> Scanner<'s> {
    /// Create a new scanner for the given source text.
    pub fn new(text: &'s str) -> Self {
        Self {
            text,
            line_map: LineMap::new(text),
            pos: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_flags: TokenFlags::NONE,
            comments: FxHashSet::default(),
        }
    }

    /// Consume a `#!` line at offset 0, returning its byte range.
    /// Call this before the first `scan()` call.
    pub fn scan_shebang(&mut self) -> Option<TextRange> {
        if self.pos != 0 || !self.text.starts_with("#!") {
            return None;
        }
        let end = memchr::memchr2(b'\n', b'\r', self.text.as_bytes()).unwrap_or(self.text.len());
        self.pos = end;
        Some(TextRange::new(0, end as TextPos))
    }

    #[inline]
    pub fn text(&self) -> &'s str {
        self.text
    }

    /// 1-based location of a byte offset.
    pub fn location_of(&self, pos: usize) -> SourceLocation {
        self.line_map.location_of(pos as TextPos)
    }

    pub fn range_of(&self, pos: usize, end: usize) -> SourceRange {
        self.line_map.range_of(TextRange::new(pos as TextPos, end as TextPos))
    }

    /// Look ahead: save state, call f, restore state and return the result.
    pub fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let state = self.save_state();
        let result = f(self);
        self.restore_state(state);
        result
    }

    /// Get the current token kind.
    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    /// The raw text of the current token.
    #[inline]
    pub fn token_text(&self) -> &'s str {
        &self.text[self.token_start..self.pos]
    }

    /// The value of the current token: the raw text, minus the backticks of
    /// an escaped identifier.
    pub fn token_value(&self) -> &'s str {
        if self.token_flags.contains(TokenFlags::ESCAPED_IDENTIFIER) {
            &self.text[self.token_start + 1..self.pos - 1]
        } else {
            self.token_text()
        }
    }

    /// Get the start position of the current token (after trivia).
    #[inline]
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Get the current position (end of current token).
    #[inline]
    pub fn token_end(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn token_flags(&self) -> TokenFlags {
        self.token_flags
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    /// Get a TokenInfo for the current token.
    pub fn token_info(&self) -> TokenInfo<'s> {
        TokenInfo {
            kind: self.token,
            pos: self.token_start as TextPos,
            end: self.pos as TextPos,
            text: self.token_text(),
            flags: self.token_flags,
        }
    }

    /// The character right after the current token, before any trivia.
    pub fn char_after_token(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    pub fn comments(&self) -> &FxHashSet<Comment> {
        &self.comments
    }

    /// Take the collected comments, leaving an empty set.
    pub fn take_comments(&mut self) -> FxHashSet<Comment> {
        std::mem::take(&mut self.comments)
    }

    /// Save the full scanner state for lookahead.
    pub fn save_state(&self) -> ScannerState {
        ScannerState {
            pos: self.pos,
            token_start: self.token_start,
            token: self.token,
            token_flags: self.token_flags,
        }
    }

    /// Restore the full scanner state from a saved state.
    pub fn restore_state(&mut self, state: ScannerState) {
        self.pos = state.pos;
        self.token_start = state.token_start;
        self.token = state.token;
        self.token_flags = state.token_flags;
    }

    /// Shorten the current operator token to its first `len` bytes. The rest
    /// is scanned again by the next `scan()`, left-bound to this piece.
    ///
    /// Used where operator characters close or suffix a type: the `>` of a
    /// generic argument list, or the `?` of an optional type.
    pub fn split_operator_token(&mut self, len: usize) {
        debug_assert!(self.token.is_operator() && len < self.pos - self.token_start);
        self.pos = self.token_start + len;
        self.token_flags.remove(TokenFlags::FOLLOWING_WHITESPACE);
        self.token = if self.token_text().starts_with("..") {
            SyntaxKind::DotOperatorToken
        } else {
            SyntaxKind::OperatorToken
        };
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    #[inline]
    fn current_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    #[inline]
    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.text.as_bytes().get(pos).copied()
    }

    /// Whether a `//` or `/*` starts at `pos`.
    #[inline]
    fn is_comment_start(&self, pos: usize) -> bool {
        self.byte_at(pos) == Some(b'/') && matches!(self.byte_at(pos + 1), Some(b'/' | b'*'))
    }

    /// Skip whitespace and comments, setting token flags for line breaks.
    fn skip_trivia(&mut self) -> ParseResult<()> {
        while let Some(ch) = self.current_char() {
            match ch {
                '\r' | '\n' => {
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    self.pos += 1;
                }
                '/' if self.byte_at(self.pos + 1) == Some(b'/') => self.skip_line_comment(),
                '/' if self.byte_at(self.pos + 1) == Some(b'*') => self.skip_block_comment()?,
                c if is_white_space_single_line(c) => self.pos += c.len_utf8(),
                _ => break,
            }
        }
        Ok(())
    }

    fn skip_line_comment(&mut self) {
        let text = self.text;
        let start = self.pos;
        let content_start = start + 2;
        let end = memchr::memchr2(b'\n', b'\r', &text.as_bytes()[content_start..])
            .map_or(text.len(), |i| content_start + i);
        self.record_comment(start, &text[content_start..end]);
        self.pos = end;
    }

    fn skip_block_comment(&mut self) -> ParseResult<()> {
        let text = self.text;
        let start = self.pos;
        let content_start = start + 2;
        let Some(len) = memchr::memmem::find(&text.as_bytes()[content_start..], b"*/") else {
            return Err(ParseError::UnterminatedBlockComment {
                at: self.location_of(start),
            });
        };
        let content = &text[content_start..content_start + len];
        if memchr::memchr2(b'\n', b'\r', content.as_bytes()).is_some() {
            self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
        }
        self.record_comment(start, content);
        self.pos = content_start + len + 2;
        Ok(())
    }

    fn record_comment(&mut self, start: usize, content: &str) {
        let location = self.location_of(start);
        self.comments.insert(Comment::new(content, location));
    }

    /// Scan the next token and return its kind.
    pub fn scan(&mut self) -> ParseResult<SyntaxKind> {
        self.token_flags = TokenFlags::NONE;
        let trivia_start = self.pos;
        self.skip_trivia()?;
        self.token_start = self.pos;

        if self.pos > trivia_start || self.preceded_by_delimiter() {
            self.token_flags |= TokenFlags::PRECEDING_WHITESPACE;
        }

        let Some(ch) = self.current_char() else {
            self.token = SyntaxKind::EndOfFileToken;
            self.token_flags |= TokenFlags::FOLLOWING_WHITESPACE;
            return Ok(self.token);
        };

        self.token = match ch {
            '(' => self.single(SyntaxKind::OpenParenToken),
            ')' => self.single(SyntaxKind::CloseParenToken),
            '{' => self.single(SyntaxKind::OpenBraceToken),
            '}' => self.single(SyntaxKind::CloseBraceToken),
            '[' => self.single(SyntaxKind::OpenBracketToken),
            ']' => self.single(SyntaxKind::CloseBracketToken),
            ',' => self.single(SyntaxKind::CommaToken),
            ':' => self.single(SyntaxKind::ColonToken),
            ';' => self.single(SyntaxKind::SemicolonToken),
            '@' => self.single(SyntaxKind::AtToken),
            '#' => self.single(SyntaxKind::HashToken),

            '.' => self.scan_dot(),
            '"' => self.scan_string_literal()?,
            '`' => self.scan_escaped_identifier()?,
            '0'..='9' => self.scan_number(),

            c if is_operator_character(c) => self.scan_operator(),
            c if is_identifier_start(c) => self.scan_identifier(),
            '$' if self.text[self.pos + 1..].starts_with(is_identifier_part) => {
                self.scan_identifier()
            }

            c => {
                return Err(ParseError::InvalidCharacter {
                    character: c,
                    at: self.location_of(self.pos),
                })
            }
        };

        if self.followed_by_delimiter() {
            self.token_flags |= TokenFlags::FOLLOWING_WHITESPACE;
        }
        Ok(self.token)
    }

    #[inline]
    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        kind
    }

    /// Whether the token that starts at `token_start` has whitespace-like
    /// text on its left.
    fn preceded_by_delimiter(&self) -> bool {
        match self.text[..self.token_start].chars().next_back() {
            None => true,
            Some(c) => is_white_space_like(c) || is_left_delimiter(c),
        }
    }

    /// Whether the token that ends at `pos` has whitespace-like text on its
    /// right.
    fn followed_by_delimiter(&self) -> bool {
        match self.current_char() {
            None => true,
            // `a!.b` makes `!` postfix, `!.b` makes it prefix
            Some('.') if self.token.is_operator() => {
                !self.token_flags.contains(TokenFlags::PRECEDING_WHITESPACE)
            }
            Some(c) => {
                is_white_space_like(c) || is_right_delimiter(c) || self.is_comment_start(self.pos)
            }
        }
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    fn scan_dot(&mut self) -> SyntaxKind {
        if self.byte_at(self.pos + 1) != Some(b'.') {
            self.pos += 1;
            return SyntaxKind::DotToken;
        }
        self.pos += 2;
        while let Some(ch) = self.current_char() {
            if !is_dot_operator_character(ch) || self.is_comment_start(self.pos) {
                break;
            }
            self.pos += 1;
        }
        SyntaxKind::DotOperatorToken
    }

    fn scan_operator(&mut self) -> SyntaxKind {
        self.pos += 1;
        while let Some(ch) = self.current_char() {
            if !is_operator_character(ch) || self.is_comment_start(self.pos) {
                break;
            }
            self.pos += 1;
        }
        SyntaxKind::OperatorToken
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        let rest = &self.text[start + 1..];
        let len = rest
            .find(|c: char| !is_identifier_part(c))
            .unwrap_or(rest.len());
        self.pos = start + 1 + len;
        SyntaxKind::from_keyword(&self.text[start..self.pos]).unwrap_or(SyntaxKind::Identifier)
    }

    fn scan_escaped_identifier(&mut self) -> ParseResult<SyntaxKind> {
        let start = self.pos;
        let rest = &self.text[start + 1..];
        let name_len = rest
            .find(|c: char| !is_identifier_part(c))
            .unwrap_or(rest.len());
        let well_formed = name_len > 0
            && rest.starts_with(is_identifier_start)
            && rest[name_len..].starts_with('`');
        if !well_formed {
            return Err(ParseError::InvalidCharacter {
                character: '`',
                at: self.location_of(start),
            });
        }
        self.pos = start + 1 + name_len + 1;
        self.token_flags |= TokenFlags::ESCAPED_IDENTIFIER;
        Ok(SyntaxKind::Identifier)
    }

    fn scan_string_literal(&mut self) -> ParseResult<SyntaxKind> {
        let start = self.pos;
        self.pos = self.skip_string_body(start)?;
        Ok(SyntaxKind::StringLiteral)
    }

    /// Skip a string literal starting at the opening quote at `start`,
    /// returning the offset just past the closing quote. Interpolations
    /// `\( ... )` may nest further string literals to any depth; the open
    /// literals and interpolations are tracked on an explicit stack.
    fn skip_string_body(&self, start: usize) -> ParseResult<usize> {
        let unterminated = || ParseError::UnterminatedStringLiteral {
            at: self.location_of(start),
        };
        let bytes = self.text.as_bytes();
        // Innermost last: 0 is a literal, n > 0 an interpolation n parens deep.
        let mut frames: Vec<u32> = vec![0];
        let mut pos = start + 1;
        while let Some(&depth) = frames.last() {
            let byte = match bytes.get(pos).copied() {
                None | Some(b'\n' | b'\r') => return Err(unterminated()),
                Some(byte) => byte,
            };
            if depth == 0 {
                match byte {
                    b'"' => {
                        frames.pop();
                        pos += 1;
                    }
                    b'\\' => match bytes.get(pos + 1).copied() {
                        None | Some(b'\n' | b'\r') => return Err(unterminated()),
                        Some(b'(') => {
                            frames.push(1);
                            pos += 2;
                        }
                        Some(_) => pos += 2,
                    },
                    _ => pos += 1,
                }
            } else {
                let top = frames.len() - 1;
                match byte {
                    b'"' => frames.push(0),
                    b'(' => frames[top] += 1,
                    b')' if depth == 1 => {
                        frames.pop();
                    }
                    b')' => frames[top] -= 1,
                    _ => {}
                }
                pos += 1;
            }
        }
        Ok(pos)
    }

    fn scan_number(&mut self) -> SyntaxKind {
        if self.byte_at(self.pos) == Some(b'0') {
            let radix = match self.byte_at(self.pos + 1) {
                Some(b'x') => Some((TokenFlags::HEX_SPECIFIER, is_hex_digit as fn(char) -> bool)),
                Some(b'o') => Some((TokenFlags::OCTAL_SPECIFIER, is_octal_digit as fn(char) -> bool)),
                Some(b'b') => Some((TokenFlags::BINARY_SPECIFIER, is_binary_digit as fn(char) -> bool)),
                _ => None,
            };
            if let Some((flag, is_radix_digit)) = radix {
                self.pos += 2;
                self.token_flags |= flag;
                self.scan_digits(is_radix_digit);
                return SyntaxKind::IntegerLiteral;
            }
        }

        self.scan_digits(is_digit);
        let mut kind = SyntaxKind::IntegerLiteral;

        // `t.0.1` is two tuple indices, not a float
        if self.byte_at(self.pos) == Some(b'.')
            && self.byte_at(self.pos + 1).is_some_and(|b| b.is_ascii_digit())
            && !self.follows_member_dot()
        {
            self.pos += 1;
            self.scan_digits(is_digit);
            kind = SyntaxKind::FloatingPointLiteral;
        }

        if let Some(b'e' | b'E') = self.byte_at(self.pos) {
            let digits_at = match self.byte_at(self.pos + 1) {
                Some(b'+' | b'-') => self.pos + 2,
                _ => self.pos + 1,
            };
            if self.byte_at(digits_at).is_some_and(|b| b.is_ascii_digit()) {
                self.pos = digits_at;
                self.scan_digits(is_digit);
                self.token_flags |= TokenFlags::SCIENTIFIC;
                kind = SyntaxKind::FloatingPointLiteral;
            }
        }
        kind
    }

    fn scan_digits(&mut self, is_valid: fn(char) -> bool) {
        while let Some(b) = self.byte_at(self.pos) {
            if b == b'_' {
                self.token_flags |= TokenFlags::CONTAINS_SEPARATOR;
            } else if !is_valid(b as char) {
                break;
            }
            self.pos += 1;
        }
    }

    /// Whether the current token directly follows a member-access `.`.
    fn follows_member_dot(&self) -> bool {
        let bytes = self.text.as_bytes();
        self.token_start >= 1
            && bytes[self.token_start - 1] == b'.'
            && (self.token_start < 2 || bytes[self.token_start - 2] != b'.')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_stops_before_comment() {
        let mut scanner = Scanner::new("a +/* c */ b");
        scanner.scan().unwrap();
        assert_eq!(scanner.scan().unwrap(), SyntaxKind::OperatorToken);
        assert_eq!(scanner.token_text(), "+");
        assert!(scanner.token_flags().contains(TokenFlags::FOLLOWING_WHITESPACE));
        assert_eq!(scanner.scan().unwrap(), SyntaxKind::Identifier);
        assert_eq!(scanner.comments().len(), 1);
    }

    #[test]
    fn test_split_operator_token() {
        let mut scanner = Scanner::new("A<B?>");
        scanner.scan().unwrap();
        scanner.scan().unwrap();
        scanner.scan().unwrap();
        assert_eq!(scanner.scan().unwrap(), SyntaxKind::OperatorToken);
        assert_eq!(scanner.token_text(), "?>");
        scanner.split_operator_token(1);
        assert_eq!(scanner.token_text(), "?");
        assert_eq!(scanner.scan().unwrap(), SyntaxKind::OperatorToken);
        assert_eq!(scanner.token_text(), ">");
        assert!(scanner.token_flags().operator_fixity() != brace_ast::types::OperatorFixity::Prefix);
    }

    #[test]
    fn test_locations_use_internal_line_map() {
        let scanner = Scanner::new("ab\r\ncd\ne");
        assert_eq!(scanner.location_of(5), SourceLocation::new(2, 2));
        let range = scanner.range_of(4, 8);
        assert_eq!(range.start, SourceLocation::new(2, 1));
        assert_eq!(range.end, SourceLocation::new(3, 2));
    }

    #[test]
    fn test_tuple_index_after_dot_is_integer() {
        let mut scanner = Scanner::new("t.0.1");
        scanner.scan().unwrap();
        scanner.scan().unwrap();
        assert_eq!(scanner.scan().unwrap(), SyntaxKind::IntegerLiteral);
        assert_eq!(scanner.token_text(), "0");
    }

    #[test]
    fn test_look_ahead_restores() {
        let mut scanner = Scanner::new("a b");
        scanner.scan().unwrap();
        let next = scanner.look_ahead(|s| s.scan().map(|_| s.token_text()));
        assert_eq!(next.unwrap(), "b");
        assert_eq!(scanner.token_text(), "a");
    }
}
