//! Token cursor for navigating the token stream.

use canonhash_ir::Span;
use canonhash_lexer::{Token, TokenKind, TokenList};

/// Position within a lexed token list.
///
/// Invariant: the list is non-empty and ends with `Eof`; the cursor never
/// moves past it, and lookahead beyond it keeps returning it.
pub(crate) struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(tokens: &'a TokenList) -> Self {
        Cursor {
            tokens: &tokens.tokens,
            pos: 0,
        }
    }

    #[inline]
    pub(crate) fn current(&self) -> &'a Token {
        self.peek(0)
    }

    #[inline]
    pub(crate) fn current_kind(&self) -> &'a TokenKind {
        &self.current().kind
    }

    #[inline]
    pub(crate) fn current_span(&self) -> Span {
        self.current().span
    }

    /// Token `offset` positions ahead, clamped to the trailing `Eof`.
    pub(crate) fn peek(&self, offset: usize) -> &'a Token {
        let tokens = self.tokens;
        let idx = (self.pos + offset).min(tokens.len() - 1);
        &tokens[idx]
    }

    /// Whether a line terminator precedes the current token.
    #[inline]
    pub(crate) fn newline_before(&self) -> bool {
        self.current().newline_before
    }

    #[inline]
    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Consume the current token and return it.
    pub(crate) fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Check the current token's kind, ignoring any payload.
    #[inline]
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    /// Consume the current token if it matches `kind`.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }
}
