//! Statements.

use canonhash_ir::ast::{
    CatchClause, Declarator, Expr, ForHead, ForInit, Pattern, Stmt, SwitchCase, VarDecl, VarKind,
};
use canonhash_ir::Span;
use canonhash_lexer::TokenKind;
use canonhash_stack::ensure_sufficient_stack;

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// `{ stmt* }`
    pub(crate) fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(&TokenKind::LBrace)?;
        let mut body = Vec::new();
        while !self.cursor.check(&TokenKind::RBrace) && !self.cursor.is_at_end() {
            body.push(self.parse_statement()?);
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(body)
    }

    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<Stmt, ParseError> {
        if self.at_async_function() {
            return self.parse_function_declaration();
        }
        if let Some(kind) = self.match_var_kind() {
            self.cursor.advance();
            let decl = self.parse_var_decl(kind, false)?;
            self.consume_semicolon()?;
            return Ok(Stmt::VarDecl(decl));
        }

        match self.cursor.current_kind() {
            TokenKind::LBrace => Ok(Stmt::Block(self.parse_block()?)),
            TokenKind::Semicolon => {
                self.cursor.advance();
                Ok(Stmt::Empty)
            }
            TokenKind::Function => self.parse_function_declaration(),
            TokenKind::Return => {
                self.cursor.advance();
                let argument = if self.at_statement_end() {
                    None
                } else {
                    Some(self.parse_expression()?)
                };
                self.consume_semicolon()?;
                Ok(Stmt::Return(argument))
            }
            TokenKind::If => self.parse_if(),
            TokenKind::While => {
                self.cursor.advance();
                let test = self.parse_condition()?;
                let body = Box::new(self.parse_statement()?);
                Ok(Stmt::While { test, body })
            }
            TokenKind::Do => {
                self.cursor.advance();
                let body = Box::new(self.parse_statement()?);
                self.expect(&TokenKind::While)?;
                let test = self.parse_condition()?;
                // A `;` after `do ... while (test)` is always optional.
                self.cursor.eat(&TokenKind::Semicolon);
                Ok(Stmt::DoWhile { body, test })
            }
            TokenKind::For => self.parse_for(),
            TokenKind::Break => {
                self.cursor.advance();
                let label = self.parse_jump_label();
                self.consume_semicolon()?;
                Ok(Stmt::Break(label))
            }
            TokenKind::Continue => {
                self.cursor.advance();
                let label = self.parse_jump_label();
                self.consume_semicolon()?;
                Ok(Stmt::Continue(label))
            }
            TokenKind::Throw => {
                self.cursor.advance();
                if self.cursor.newline_before() {
                    return Err(self.error_at(
                        ParseErrorKind::NewlineAfterThrow,
                        self.cursor.current_span(),
                    ));
                }
                let argument = self.parse_expression()?;
                self.consume_semicolon()?;
                Ok(Stmt::Throw(argument))
            }
            TokenKind::Try => self.parse_try(),
            TokenKind::Switch => self.parse_switch(),
            TokenKind::Ident(label) if matches!(self.cursor.peek(1).kind, TokenKind::Colon) => {
                self.cursor.advance();
                self.cursor.advance();
                let body = Box::new(self.parse_statement()?);
                Ok(Stmt::Labeled {
                    label: label.clone(),
                    body,
                })
            }
            _ => {
                let expr = self.parse_expression()?;
                self.consume_semicolon()?;
                Ok(Stmt::Expr(expr))
            }
        }
    }

    /// Whether the statement may end here without an explicit `;`.
    fn at_statement_end(&self) -> bool {
        matches!(
            self.cursor.current_kind(),
            TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
        ) || self.cursor.newline_before()
    }

    /// Consume a `;`, or accept its automatic insertion.
    fn consume_semicolon(&mut self) -> Result<(), ParseError> {
        if self.cursor.eat(&TokenKind::Semicolon) || self.at_statement_end() {
            Ok(())
        } else {
            Err(self.expected("`;`"))
        }
    }

    fn parse_function_declaration(&mut self) -> Result<Stmt, ParseError> {
        let is_async = self.eat_async_prefix();
        let span = self.cursor.current_span();
        let function = self.parse_function(is_async)?;
        if function.name.is_none() {
            return Err(self.error_at(ParseErrorKind::MissingFunctionName, span));
        }
        Ok(Stmt::FunctionDecl(function))
    }

    /// Declarators after `var`/`let`/`const`, which is already consumed.
    fn parse_var_decl(&mut self, kind: VarKind, no_in: bool) -> Result<VarDecl, ParseError> {
        let mut declarators = Vec::new();
        loop {
            let span = self.cursor.current_span();
            let target = self.parse_binding_pattern()?;
            declarators.push(self.parse_declarator_init(kind, target, span, no_in)?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(VarDecl { kind, declarators })
    }

    /// Optional `= init` after a declarator target starting at `span`.
    ///
    /// `const` bindings and destructuring targets need an initializer.
    fn parse_declarator_init(
        &mut self,
        kind: VarKind,
        target: Pattern,
        span: Span,
        no_in: bool,
    ) -> Result<Declarator, ParseError> {
        let init = if self.cursor.eat(&TokenKind::Eq) {
            Some(self.parse_assignment(no_in)?)
        } else if kind == VarKind::Const || target.as_ident().is_none() {
            return Err(self.error_at(ParseErrorKind::MissingInitializer, span));
        } else {
            None
        };
        Ok(Declarator { target, init })
    }

    /// `( expr )` of `if`, `while` and `do ... while`.
    fn parse_condition(&mut self) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let test = self.parse_expression()?;
        self.expect(&TokenKind::RParen)?;
        Ok(test)
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        self.cursor.advance();
        let test = self.parse_condition()?;
        let consequent = Box::new(self.parse_statement()?);
        let alternate = if self.cursor.eat(&TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(Stmt::If {
            test,
            consequent,
            alternate,
        })
    }

    /// Label after `break`/`continue`, only if on the same line.
    fn parse_jump_label(&mut self) -> Option<String> {
        match self.cursor.current_kind() {
            TokenKind::Ident(label) if !self.cursor.newline_before() => {
                self.cursor.advance();
                Some(label.clone())
            }
            _ => None,
        }
    }

    fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        self.cursor.advance();
        self.expect(&TokenKind::LParen)?;

        let init = if let Some(kind) = self.match_var_kind() {
            self.cursor.advance();
            let span = self.cursor.current_span();
            let target = self.parse_binding_pattern()?;
            if self.at_for_in_of() {
                return self.parse_for_in_of(ForHead::Decl(kind, target));
            }
            let mut declarators = vec![self.parse_declarator_init(kind, target, span, true)?];
            while self.cursor.eat(&TokenKind::Comma) {
                let span = self.cursor.current_span();
                let target = self.parse_binding_pattern()?;
                declarators.push(self.parse_declarator_init(kind, target, span, true)?);
            }
            Some(ForInit::Decl(VarDecl { kind, declarators }))
        } else if self.cursor.check(&TokenKind::Semicolon) {
            None
        } else {
            let span = self.cursor.current_span();
            let expr = self.parse_sequence(true)?;
            if self.at_for_in_of() {
                let target = self.expr_to_pattern(expr, span)?;
                return self.parse_for_in_of(ForHead::Target(target));
            }
            Some(ForInit::Expr(expr))
        };

        self.expect(&TokenKind::Semicolon)?;
        let test = self.parse_optional_expression(&TokenKind::Semicolon)?;
        self.expect(&TokenKind::Semicolon)?;
        let update = self.parse_optional_expression(&TokenKind::RParen)?;
        self.expect(&TokenKind::RParen)?;
        let body = Box::new(self.parse_statement()?);
        Ok(Stmt::For {
            init,
            test,
            update,
            body,
        })
    }

    fn at_for_in_of(&self) -> bool {
        self.cursor.check(&TokenKind::In) || self.cursor.current_kind().is_ident("of")
    }

    /// Rest of `for (head in object)` or `for (head of iterable)`, positioned at `in`/`of`.
    fn parse_for_in_of(&mut self, head: ForHead) -> Result<Stmt, ParseError> {
        if self.cursor.eat(&TokenKind::In) {
            let object = self.parse_expression()?;
            self.expect(&TokenKind::RParen)?;
            let body = Box::new(self.parse_statement()?);
            return Ok(Stmt::ForIn { head, object, body });
        }

        self.cursor.advance();
        let iterable = self.parse_assignment(false)?;
        self.expect(&TokenKind::RParen)?;
        let body = Box::new(self.parse_statement()?);
        Ok(Stmt::ForOf {
            head,
            iterable,
            body,
        })
    }

    fn parse_optional_expression(
        &mut self,
        end: &TokenKind,
    ) -> Result<Option<Expr>, ParseError> {
        if self.cursor.check(end) {
            Ok(None)
        } else {
            self.parse_expression().map(Some)
        }
    }

    fn parse_try(&mut self) -> Result<Stmt, ParseError> {
        let span = self.cursor.advance().span;
        let block = self.parse_block()?;

        let handler = if self.cursor.eat(&TokenKind::Catch) {
            let param = if self.cursor.eat(&TokenKind::LParen) {
                let target = self.parse_binding_pattern()?;
                self.expect(&TokenKind::RParen)?;
                Some(target)
            } else {
                None
            };
            let body = self.parse_block()?;
            Some(CatchClause { param, body })
        } else {
            None
        };

        let finalizer = if self.cursor.eat(&TokenKind::Finally) {
            Some(self.parse_block()?)
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return Err(self.error_at(ParseErrorKind::MissingCatchOrFinally, span));
        }
        Ok(Stmt::Try {
            block,
            handler,
            finalizer,
        })
    }

    fn parse_switch(&mut self) -> Result<Stmt, ParseError> {
        self.cursor.advance();
        let discriminant = self.parse_condition()?;
        self.expect(&TokenKind::LBrace)?;

        let mut cases = Vec::new();
        let mut seen_default = false;
        while !self.cursor.eat(&TokenKind::RBrace) {
            let test = match self.cursor.current_kind() {
                TokenKind::Case => {
                    self.cursor.advance();
                    Some(self.parse_expression()?)
                }
                TokenKind::Default => {
                    if seen_default {
                        return Err(self.error_at(
                            ParseErrorKind::DuplicateDefault,
                            self.cursor.current_span(),
                        ));
                    }
                    seen_default = true;
                    self.cursor.advance();
                    None
                }
                _ => return Err(self.expected("`case`, `default` or `}`")),
            };
            self.expect(&TokenKind::Colon)?;

            let mut body = Vec::new();
            while !matches!(
                self.cursor.current_kind(),
                TokenKind::Case | TokenKind::Default | TokenKind::RBrace | TokenKind::Eof
            ) {
                body.push(self.parse_statement()?);
            }
            cases.push(SwitchCase { test, body });
        }
        Ok(Stmt::Switch {
            discriminant,
            cases,
        })
    }
}
