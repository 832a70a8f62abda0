//! Expressions.
//!
//! Arrow functions, `yield`, assignment and the conditional operator sit
//! above a precedence-climbing loop over [`BinaryOp::precedence`]; unary,
//! postfix, `new` and call/member chains sit below it.

use canonhash_ir::ast::{
    AssignOp, BinaryOp, Expr, Function, Pattern, PropKey, Property, UpdateOp,
};
use canonhash_ir::Span;
use canonhash_lexer::{TemplateChunk, TokenKind};
use canonhash_stack::ensure_sufficient_stack;

use super::operators::property_name;
use crate::{ParseError, ParseErrorKind, Parser};

/// Logical operator at the root of an unparenthesized operand.
///
/// `??` may not share an operand with `&&` or `||`.
#[derive(Copy, Clone, PartialEq, Eq)]
enum Logical {
    Plain,
    Coalesce,
    AndOr,
}

impl Logical {
    fn of(op: BinaryOp) -> Self {
        match op {
            BinaryOp::Coalesce => Logical::Coalesce,
            BinaryOp::And | BinaryOp::Or => Logical::AndOr,
            _ => Logical::Plain,
        }
    }

    fn conflicts(self, other: Logical) -> bool {
        matches!(
            (self, other),
            (Logical::Coalesce, Logical::AndOr) | (Logical::AndOr, Logical::Coalesce)
        )
    }
}

impl Parser<'_> {
    /// Full expression, including comma sequences.
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_sequence(false)
    }

    /// Comma sequence. `no_in` keeps `in` from being read as an operator
    /// (the head of a `for` loop).
    pub(crate) fn parse_sequence(&mut self, no_in: bool) -> Result<Expr, ParseError> {
        let first = self.parse_assignment(no_in)?;
        if !self.cursor.check(&TokenKind::Comma) {
            return Ok(first);
        }
        let mut exprs = vec![first];
        while self.cursor.eat(&TokenKind::Comma) {
            exprs.push(self.parse_assignment(no_in)?);
        }
        Ok(Expr::Sequence(exprs))
    }

    pub(crate) fn parse_assignment(&mut self, no_in: bool) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_assignment_inner(no_in))
    }

    fn parse_assignment_inner(&mut self, no_in: bool) -> Result<Expr, ParseError> {
        if self.at_arrow() {
            return Ok(Expr::Arrow(Box::new(self.parse_arrow()?)));
        }
        if self.cursor.check(&TokenKind::Yield) {
            return self.parse_yield(no_in);
        }

        let span = self.cursor.current_span();
        let target = self.parse_conditional(no_in)?;
        let Some(op) = self.match_assign_op() else {
            return Ok(target);
        };
        // Array and object literals only destructure under plain `=`.
        let destructuring = op == AssignOp::Assign
            && matches!(target, Expr::Array(_) | Expr::Object(_));
        if !target.is_assignable() && !destructuring {
            return Err(self.error_at(ParseErrorKind::InvalidAssignmentTarget, span));
        }
        let target = self.expr_to_pattern(target, span)?;
        self.cursor.advance();
        let value = self.parse_assignment(no_in)?;
        Ok(Expr::Assign {
            op,
            target: Box::new(target),
            value: Box::new(value),
        })
    }

    /// `yield`, `yield expr` or `yield* expr`.
    fn parse_yield(&mut self, no_in: bool) -> Result<Expr, ParseError> {
        self.cursor.advance();
        let delegate = !self.cursor.newline_before() && self.cursor.eat(&TokenKind::Star);
        let argument = if delegate || self.starts_operand() {
            Some(Box::new(self.parse_assignment(no_in)?))
        } else {
            None
        };
        Ok(Expr::Yield { argument, delegate })
    }

    /// Whether the current token can begin an operand on the same line.
    fn starts_operand(&self) -> bool {
        !self.cursor.newline_before()
            && !matches!(
                self.cursor.current_kind(),
                TokenKind::RParen
                    | TokenKind::RBracket
                    | TokenKind::RBrace
                    | TokenKind::Comma
                    | TokenKind::Semicolon
                    | TokenKind::Colon
                    | TokenKind::TemplateMiddle(_)
                    | TokenKind::TemplateTail(_)
                    | TokenKind::Eof
            )
    }

    fn parse_conditional(&mut self, no_in: bool) -> Result<Expr, ParseError> {
        let (test, _) = self.parse_binary(1, no_in)?;
        if !self.cursor.eat(&TokenKind::Question) {
            return Ok(test);
        }
        let consequent = self.parse_assignment(false)?;
        self.expect(&TokenKind::Colon)?;
        let alternate = self.parse_assignment(no_in)?;
        Ok(Expr::Conditional {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        })
    }

    /// Precedence climbing: operators binding at least as tight as `min_prec`.
    ///
    /// Also returns the logical operator family at the root of the result,
    /// so callers can reject `a ?? b || c`.
    fn parse_binary(&mut self, min_prec: u8, no_in: bool) -> Result<(Expr, Logical), ParseError> {
        // `-a ** b` is ambiguous and must be written `(-a) ** b`.
        let mut bare_unary = self.match_unary_op().is_some();
        let mut left = self.parse_unary()?;
        let mut left_logical = Logical::Plain;
        while let Some(op) = self.match_binary_op(no_in) {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            let span = self.cursor.advance().span;
            if op == BinaryOp::Exp && bare_unary {
                return Err(self.error_at(ParseErrorKind::UnaryBeforeExponent, span));
            }
            let next_min = if op.is_right_assoc() { prec } else { prec + 1 };
            let (right, right_logical) = self.parse_binary(next_min, no_in)?;

            let logical = Logical::of(op);
            if logical.conflicts(left_logical) || logical.conflicts(right_logical) {
                return Err(self.error_at(ParseErrorKind::MixedCoalesce, span));
            }
            left = binary(op, left, right);
            left_logical = logical;
            bare_unary = false;
        }
        Ok((left, left_logical))
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_unary_inner())
    }

    fn parse_unary_inner(&mut self) -> Result<Expr, ParseError> {
        if let Some(op) = self.match_unary_op() {
            self.cursor.advance();
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
            });
        }
        if let Some(op) = self.match_update_op() {
            let span = self.cursor.advance().span;
            let target = self.parse_unary()?;
            return self.update(op, true, target, span);
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let span = self.cursor.current_span();
        let expr = self.parse_call_member()?;
        if self.cursor.newline_before() {
            return Ok(expr);
        }
        match self.match_update_op() {
            Some(op) => {
                self.cursor.advance();
                self.update(op, false, expr, span)
            }
            None => Ok(expr),
        }
    }

    fn update(&self, op: UpdateOp, prefix: bool, target: Expr, span: Span) -> Result<Expr, ParseError> {
        if !target.is_assignable() {
            return Err(self.error_at(ParseErrorKind::InvalidAssignmentTarget, span));
        }
        Ok(Expr::Update {
            op,
            prefix,
            target: Box::new(target),
        })
    }

    fn parse_call_member(&mut self) -> Result<Expr, ParseError> {
        let base = if self.cursor.check(&TokenKind::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        self.parse_member_chain(base, true)
    }

    /// `new callee[(args)]`; the callee takes member accesses but no calls.
    fn parse_new(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_new_inner())
    }

    fn parse_new_inner(&mut self) -> Result<Expr, ParseError> {
        self.cursor.advance();
        let callee = if self.cursor.check(&TokenKind::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        let callee = self.parse_member_chain(callee, false)?;
        let args = if self.cursor.check(&TokenKind::LParen) {
            self.parse_arguments()?
        } else if self.cursor.check(&TokenKind::QuestionDot) {
            // `new a?.b()` has no meaning; `new a()?.b` is fine.
            return Err(self.error_at(ParseErrorKind::InvalidOptionalChain, self.cursor.current_span()));
        } else {
            Vec::new()
        };
        Ok(Expr::New {
            callee: Box::new(callee),
            args,
        })
    }

    /// Trailing `.name`, `[index]`, tagged templates and, if allowed,
    /// `(args)` and `?.` links.
    ///
    /// A chain with any `?.` link is wrapped in [`Expr::Chain`] once it ends.
    fn parse_member_chain(&mut self, mut expr: Expr, allow_call: bool) -> Result<Expr, ParseError> {
        let mut optional_chain = false;
        loop {
            expr = match self.cursor.current_kind() {
                TokenKind::QuestionDot if allow_call => {
                    self.cursor.advance();
                    optional_chain = true;
                    match self.cursor.current_kind() {
                        TokenKind::LBracket => self.parse_index(expr, true)?,
                        TokenKind::LParen => self.parse_call(expr, true)?,
                        _ => self.parse_member_name(expr, true)?,
                    }
                }
                TokenKind::Dot => {
                    self.cursor.advance();
                    self.parse_member_name(expr, false)?
                }
                TokenKind::LBracket => self.parse_index(expr, false)?,
                TokenKind::LParen if allow_call => self.parse_call(expr, false)?,
                TokenKind::Template(_) | TokenKind::TemplateHead(_) => {
                    if optional_chain {
                        let span = self.cursor.current_span();
                        return Err(self.error_at(ParseErrorKind::InvalidOptionalChain, span));
                    }
                    let (quasis, exprs) = self.parse_template(true)?;
                    Expr::TaggedTemplate {
                        tag: Box::new(expr),
                        quasis,
                        exprs,
                    }
                }
                _ => break,
            };
        }
        if optional_chain {
            expr = Expr::Chain(Box::new(expr));
        }
        Ok(expr)
    }

    /// Property name after `.` or `?.`.
    fn parse_member_name(&mut self, object: Expr, optional: bool) -> Result<Expr, ParseError> {
        let Some(property) = property_name(self.cursor.current_kind()) else {
            return Err(self.expected("a property name"));
        };
        self.cursor.advance();
        Ok(Expr::Member {
            object: Box::new(object),
            property,
            optional,
        })
    }

    fn parse_index(&mut self, object: Expr, optional: bool) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LBracket)?;
        let index = self.parse_expression()?;
        self.expect(&TokenKind::RBracket)?;
        Ok(Expr::Index {
            object: Box::new(object),
            index: Box::new(index),
            optional,
        })
    }

    fn parse_call(&mut self, callee: Expr, optional: bool) -> Result<Expr, ParseError> {
        let args = self.parse_arguments()?;
        Ok(Expr::Call {
            callee: Box::new(callee),
            args,
            optional,
        })
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let mut args = Vec::new();
        while !self.cursor.check(&TokenKind::RParen) {
            args.push(self.parse_element()?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(args)
    }

    /// Array element or call argument: `...expr` or an assignment expression.
    fn parse_element(&mut self) -> Result<Expr, ParseError> {
        if self.cursor.eat(&TokenKind::Ellipsis) {
            return Ok(Expr::Spread(Box::new(self.parse_assignment(false)?)));
        }
        self.parse_assignment(false)
    }

    /// Template pieces and substitutions. Tagged templates keep the raw
    /// text, untagged ones the cooked text.
    fn parse_template(&mut self, raw: bool) -> Result<(Vec<String>, Vec<Expr>), ParseError> {
        let text = |chunk: &TemplateChunk| {
            if raw {
                chunk.raw.clone()
            } else {
                chunk.cooked.clone()
            }
        };

        let head = match self.cursor.current_kind() {
            TokenKind::Template(chunk) => {
                self.cursor.advance();
                return Ok((vec![text(chunk)], Vec::new()));
            }
            TokenKind::TemplateHead(chunk) => chunk,
            _ => return Err(self.expected("a template literal")),
        };
        self.cursor.advance();

        let mut quasis = vec![text(head)];
        let mut exprs = Vec::new();
        loop {
            exprs.push(self.parse_expression()?);
            match self.cursor.current_kind() {
                TokenKind::TemplateMiddle(chunk) => {
                    self.cursor.advance();
                    quasis.push(text(chunk));
                }
                TokenKind::TemplateTail(chunk) => {
                    self.cursor.advance();
                    quasis.push(text(chunk));
                    return Ok((quasis, exprs));
                }
                _ => return Err(self.expected("`}` closing the substitution")),
            }
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let expr = match self.cursor.current_kind() {
            TokenKind::Number(n) => Expr::Number(*n),
            TokenKind::BigInt(digits) => Expr::BigInt(digits.clone()),
            TokenKind::Str(s) => Expr::Str(s.clone()),
            TokenKind::Regex { pattern, flags } => Expr::Regex {
                pattern: pattern.clone(),
                flags: flags.clone(),
            },
            TokenKind::True => Expr::Bool(true),
            TokenKind::False => Expr::Bool(false),
            TokenKind::Null => Expr::Null,
            TokenKind::This => Expr::This,
            TokenKind::Ident(_) if self.at_async_function() => {
                self.cursor.advance();
                return Ok(Expr::Function(Box::new(self.parse_function(true)?)));
            }
            TokenKind::Ident(name) => Expr::Ident(name.clone()),
            TokenKind::Function => {
                return Ok(Expr::Function(Box::new(self.parse_function(false)?)));
            }
            TokenKind::Template(_) | TokenKind::TemplateHead(_) => {
                let (quasis, exprs) = self.parse_template(false)?;
                return Ok(Expr::Template { quasis, exprs });
            }
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.parse_expression()?;
                self.expect(&TokenKind::RParen)?;
                return Ok(inner);
            }
            TokenKind::LBracket => return self.parse_array(),
            TokenKind::LBrace => return self.parse_object(),
            _ => return Err(self.expected("an expression")),
        };
        self.cursor.advance();
        Ok(expr)
    }

    /// `[a, , ...b]`; a comma with no element before it is a hole.
    fn parse_array(&mut self) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LBracket)?;
        let mut elements = Vec::new();
        while !self.cursor.check(&TokenKind::RBracket) {
            if self.cursor.eat(&TokenKind::Comma) {
                elements.push(None);
                continue;
            }
            elements.push(Some(self.parse_element()?));
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBracket)?;
        Ok(Expr::Array(elements))
    }

    fn parse_object(&mut self) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LBrace)?;
        let mut properties = Vec::new();
        while !self.cursor.check(&TokenKind::RBrace) {
            properties.push(self.parse_property()?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(Expr::Object(properties))
    }

    fn parse_property(&mut self) -> Result<Property, ParseError> {
        if self.cursor.eat(&TokenKind::Ellipsis) {
            return Ok(Property::Spread(self.parse_assignment(false)?));
        }
        if self.cursor.eat(&TokenKind::Star) {
            let key = self.parse_property_key()?;
            let function = self.parse_method(false, true)?;
            return Ok(Property::Method { key, function });
        }

        let token = self.cursor.current();
        if self.at_method_modifier() {
            self.cursor.advance();
            if token.kind.is_ident("async") {
                let is_generator = self.cursor.eat(&TokenKind::Star);
                let key = self.parse_property_key()?;
                let function = self.parse_method(true, is_generator)?;
                return Ok(Property::Method { key, function });
            }
            let key = self.parse_property_key()?;
            let function = self.parse_method(false, false)?;
            return Ok(if token.kind.is_ident("get") {
                Property::Getter { key, function }
            } else {
                Property::Setter { key, function }
            });
        }

        let key = self.parse_property_key()?;
        if let TokenKind::Ident(name) = &token.kind {
            match self.cursor.current_kind() {
                TokenKind::Comma | TokenKind::RBrace => {
                    return Ok(Property::Shorthand(name.clone()));
                }
                // `{ a = 1 }` only makes sense once the object is
                // reinterpreted as a pattern; keep it as `a: a = 1`.
                TokenKind::Eq => {
                    self.cursor.advance();
                    let default = self.parse_assignment(false)?;
                    let value = Expr::Assign {
                        op: AssignOp::Assign,
                        target: Box::new(Pattern::Ident(name.clone())),
                        value: Box::new(default),
                    };
                    return Ok(Property::Init { key, value });
                }
                _ => {}
            }
        }
        if self.cursor.check(&TokenKind::LParen) {
            let function = self.parse_method(false, false)?;
            return Ok(Property::Method { key, function });
        }
        self.expect(&TokenKind::Colon)?;
        let value = self.parse_assignment(false)?;
        Ok(Property::Init { key, value })
    }

    /// `get`, `set` or `async` used as a modifier rather than as a key.
    fn at_method_modifier(&self) -> bool {
        let kind = self.cursor.current_kind();
        let next = self.cursor.peek(1);
        let key_follows = matches!(
            next.kind,
            TokenKind::Str(_) | TokenKind::Number(_) | TokenKind::BigInt(_) | TokenKind::LBracket
        ) || property_name(&next.kind).is_some();

        if kind.is_ident("get") || kind.is_ident("set") {
            key_follows
        } else if kind.is_ident("async") {
            !next.newline_before && (key_follows || matches!(next.kind, TokenKind::Star))
        } else {
            false
        }
    }

    /// Object key: a name, string, number, or `[computed]`.
    pub(crate) fn parse_property_key(&mut self) -> Result<PropKey, ParseError> {
        let key = match self.cursor.current_kind() {
            TokenKind::Str(s) => PropKey::Named(s.clone()),
            TokenKind::Number(n) => PropKey::Number(*n),
            TokenKind::BigInt(digits) => PropKey::Named(digits.clone()),
            TokenKind::LBracket => {
                self.cursor.advance();
                let key = self.parse_assignment(false)?;
                self.expect(&TokenKind::RBracket)?;
                return Ok(PropKey::Computed(Box::new(key)));
            }
            kind => match property_name(kind) {
                Some(name) => PropKey::Named(name),
                None => return Err(self.expected("a property key")),
            },
        };
        self.cursor.advance();
        Ok(key)
    }

    /// A method's `(params) { body }` after its key.
    fn parse_method(&mut self, is_async: bool, is_generator: bool) -> Result<Function, ParseError> {
        let params = self.parse_params()?;
        let body = self.parse_block()?;
        Ok(Function {
            name: None,
            params,
            body,
            is_async,
            is_generator,
        })
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}
