//! Functions, arrow functions and parameter lists.

use canonhash_ir::ast::{ArrowBody, ArrowFunction, Function, Param, Pattern};
use canonhash_ir::StructuralAst;
use canonhash_lexer::TokenKind;
use tracing::trace;

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// Entry point: exactly one function, optionally followed by `;`.
    pub(crate) fn parse_root(&mut self) -> Result<StructuralAst, ParseError> {
        let ast = if self.cursor.check(&TokenKind::Function) || self.at_async_function() {
            let is_async = self.eat_async_prefix();
            StructuralAst::Function(self.parse_function(is_async)?)
        } else if self.at_arrow() {
            StructuralAst::Arrow(self.parse_arrow()?)
        } else {
            return Err(self.error_at(ParseErrorKind::NotAFunction, self.cursor.current_span()));
        };

        self.cursor.eat(&TokenKind::Semicolon);
        if !self.cursor.is_at_end() {
            let token = self.cursor.current();
            let kind = ParseErrorKind::TrailingInput {
                found: token.kind.to_string(),
            };
            return Err(self.error_at(kind, token.span));
        }
        Ok(ast)
    }

    /// `async` directly followed by `function` on the same line.
    pub(crate) fn at_async_function(&self) -> bool {
        let next = self.cursor.peek(1);
        self.cursor.current_kind().is_ident("async")
            && matches!(next.kind, TokenKind::Function)
            && !next.newline_before
    }

    /// Consume an `async` prefix of a function, if present.
    pub(crate) fn eat_async_prefix(&mut self) -> bool {
        if self.at_async_function() {
            self.cursor.advance();
            true
        } else {
            false
        }
    }

    /// `function [*] [name](params) { body }`, positioned at `function`.
    pub(crate) fn parse_function(&mut self, is_async: bool) -> Result<Function, ParseError> {
        self.expect(&TokenKind::Function)?;
        let is_generator = self.cursor.eat(&TokenKind::Star);
        let name = match self.cursor.current_kind() {
            TokenKind::Ident(name) => {
                self.cursor.advance();
                Some(name.clone())
            }
            _ => None,
        };
        trace!(name = ?name, is_async, is_generator, "function");

        let params = self.parse_params()?;
        let body = self.parse_block()?;
        Ok(Function {
            name,
            params,
            body,
            is_async,
            is_generator,
        })
    }

    /// Whether an arrow function (possibly `async`) starts here.
    pub(crate) fn at_arrow(&self) -> bool {
        self.at_async_arrow() || self.arrow_params_at(0)
    }

    fn at_async_arrow(&self) -> bool {
        self.cursor.current_kind().is_ident("async")
            && !self.cursor.peek(1).newline_before
            && self.arrow_params_at(1)
    }

    /// Whether arrow parameters followed by `=>` start `offset` tokens ahead.
    ///
    /// A parenthesized list is scanned to its matching `)`.
    fn arrow_params_at(&self, offset: usize) -> bool {
        match &self.cursor.peek(offset).kind {
            TokenKind::Ident(_) => matches!(self.cursor.peek(offset + 1).kind, TokenKind::FatArrow),
            TokenKind::LParen => {
                let mut depth = 0usize;
                let mut idx = offset;
                loop {
                    match &self.cursor.peek(idx).kind {
                        TokenKind::LParen => depth += 1,
                        TokenKind::RParen => {
                            depth -= 1;
                            if depth == 0 {
                                return matches!(
                                    self.cursor.peek(idx + 1).kind,
                                    TokenKind::FatArrow
                                );
                            }
                        }
                        TokenKind::Eof => return false,
                        _ => {}
                    }
                    idx += 1;
                }
            }
            _ => false,
        }
    }

    /// `[async] params => body`. Callers check [`Self::at_arrow`] first.
    pub(crate) fn parse_arrow(&mut self) -> Result<ArrowFunction, ParseError> {
        let is_async = self.at_async_arrow();
        if is_async {
            self.cursor.advance();
        }

        let params = match self.cursor.current_kind() {
            TokenKind::Ident(name) => {
                self.cursor.advance();
                vec![Param {
                    target: Pattern::Ident(name.clone()),
                    default: None,
                    rest: false,
                }]
            }
            _ => self.parse_params()?,
        };
        self.expect(&TokenKind::FatArrow)?;
        trace!(params = params.len(), is_async, "arrow function");

        let body = if self.cursor.check(&TokenKind::LBrace) {
            ArrowBody::Block(self.parse_block()?)
        } else {
            ArrowBody::Expr(Box::new(self.parse_assignment(false)?))
        };
        Ok(ArrowFunction {
            params,
            body,
            is_async,
        })
    }

    /// `(a, { b } = {}, [c], ...rest)`
    pub(crate) fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        while !self.cursor.check(&TokenKind::RParen) {
            if self.cursor.eat(&TokenKind::Ellipsis) {
                let target = self.parse_binding_pattern()?;
                params.push(Param {
                    target,
                    default: None,
                    rest: true,
                });
                if !self.cursor.check(&TokenKind::RParen) {
                    return Err(
                        self.error_at(ParseErrorKind::RestNotLast, self.cursor.current_span())
                    );
                }
                break;
            }

            let target = self.parse_binding_pattern()?;
            let default = if self.cursor.eat(&TokenKind::Eq) {
                Some(self.parse_assignment(false)?)
            } else {
                None
            };
            params.push(Param {
                target,
                default,
                rest: false,
            });
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(params)
    }
}
