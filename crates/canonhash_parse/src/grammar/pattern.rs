//! Binding and assignment patterns.
//!
//! Declarations, parameters and `catch` clauses parse patterns directly.
//! Assignments and `for (... in/of ...)` heads first parse an expression
//! and reinterpret it once the `=`, `in` or `of` shows it was a target.

use canonhash_ir::ast::{AssignOp, Expr, Pattern, PatternProp, PropKey, Property};
use canonhash_ir::Span;
use canonhash_lexer::TokenKind;
use canonhash_stack::ensure_sufficient_stack;

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// An identifier, `{ ... }` or `[ ... ]` binding target.
    pub(crate) fn parse_binding_pattern(&mut self) -> Result<Pattern, ParseError> {
        ensure_sufficient_stack(|| self.parse_binding_pattern_inner())
    }

    fn parse_binding_pattern_inner(&mut self) -> Result<Pattern, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::LBrace => self.parse_object_pattern(),
            TokenKind::LBracket => self.parse_array_pattern(),
            _ => Ok(Pattern::Ident(self.expect_ident("a binding name")?)),
        }
    }

    /// Binding pattern with an optional `= default`.
    fn parse_binding_element(&mut self) -> Result<Pattern, ParseError> {
        let target = self.parse_binding_pattern()?;
        self.parse_pattern_default(target)
    }

    fn parse_pattern_default(&mut self, target: Pattern) -> Result<Pattern, ParseError> {
        if !self.cursor.eat(&TokenKind::Eq) {
            return Ok(target);
        }
        let default = self.parse_assignment(false)?;
        Ok(Pattern::Default {
            target: Box::new(target),
            default: Box::new(default),
        })
    }

    fn parse_array_pattern(&mut self) -> Result<Pattern, ParseError> {
        self.expect(&TokenKind::LBracket)?;
        let mut elements = Vec::new();
        while !self.cursor.check(&TokenKind::RBracket) {
            if self.cursor.eat(&TokenKind::Comma) {
                elements.push(None);
                continue;
            }
            if self.cursor.eat(&TokenKind::Ellipsis) {
                let target = self.parse_binding_pattern()?;
                elements.push(Some(Pattern::Rest(Box::new(target))));
                self.expect_rest_end(&TokenKind::RBracket)?;
                break;
            }
            elements.push(Some(self.parse_binding_element()?));
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBracket)?;
        Ok(Pattern::Array(elements))
    }

    fn parse_object_pattern(&mut self) -> Result<Pattern, ParseError> {
        self.expect(&TokenKind::LBrace)?;
        let mut props = Vec::new();
        while !self.cursor.check(&TokenKind::RBrace) {
            if self.cursor.eat(&TokenKind::Ellipsis) {
                let name = self.expect_ident("a binding name")?;
                props.push(PatternProp::Rest(Pattern::Ident(name)));
                self.expect_rest_end(&TokenKind::RBrace)?;
                break;
            }
            props.push(self.parse_pattern_entry()?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(Pattern::Object(props))
    }

    /// `key: element`, or the shorthand `name` / `name = default`.
    fn parse_pattern_entry(&mut self) -> Result<PatternProp, ParseError> {
        if let TokenKind::Ident(name) = self.cursor.current_kind() {
            if !matches!(self.cursor.peek(1).kind, TokenKind::Colon) {
                self.cursor.advance();
                let value = self.parse_pattern_default(Pattern::Ident(name.clone()))?;
                let key = PropKey::Named(name.clone());
                return Ok(PatternProp::Entry { key, value });
            }
        }
        let key = self.parse_property_key()?;
        self.expect(&TokenKind::Colon)?;
        let value = self.parse_binding_element()?;
        Ok(PatternProp::Entry { key, value })
    }

    /// A rest element must close its pattern.
    fn expect_rest_end(&self, close: &TokenKind) -> Result<(), ParseError> {
        if self.cursor.check(close) {
            Ok(())
        } else {
            Err(self.error_at(ParseErrorKind::RestNotLast, self.cursor.current_span()))
        }
    }

    /// Reinterpret a parsed left-hand side as an assignment target.
    ///
    /// `span` is where the left-hand side starts; every error points there.
    pub(crate) fn expr_to_pattern(&self, expr: Expr, span: Span) -> Result<Pattern, ParseError> {
        ensure_sufficient_stack(|| self.expr_to_pattern_inner(expr, span))
    }

    fn expr_to_pattern_inner(&self, expr: Expr, span: Span) -> Result<Pattern, ParseError> {
        let invalid = || self.error_at(ParseErrorKind::InvalidAssignmentTarget, span);
        match expr {
            Expr::Ident(name) => Ok(Pattern::Ident(name)),
            expr @ (Expr::Member { .. } | Expr::Index { .. }) if expr.is_assignable() => {
                Ok(Pattern::Expr(Box::new(expr)))
            }
            Expr::Array(elements) => {
                let last = elements.len().saturating_sub(1);
                let mut targets = Vec::with_capacity(elements.len());
                for (idx, element) in elements.into_iter().enumerate() {
                    let target = match element {
                        None => None,
                        Some(Expr::Spread(_)) if idx != last => {
                            return Err(self.error_at(ParseErrorKind::RestNotLast, span));
                        }
                        Some(Expr::Spread(inner)) => {
                            Some(Pattern::Rest(Box::new(self.expr_to_pattern(*inner, span)?)))
                        }
                        Some(element) => Some(self.element_to_pattern(element, span)?),
                    };
                    targets.push(target);
                }
                Ok(Pattern::Array(targets))
            }
            Expr::Object(properties) => {
                let last = properties.len().saturating_sub(1);
                let mut props = Vec::with_capacity(properties.len());
                for (idx, property) in properties.into_iter().enumerate() {
                    let prop = match property {
                        Property::Init { key, value } => PatternProp::Entry {
                            key,
                            value: self.element_to_pattern(value, span)?,
                        },
                        Property::Shorthand(name) => PatternProp::Entry {
                            key: PropKey::Named(name.clone()),
                            value: Pattern::Ident(name),
                        },
                        Property::Spread(_) if idx != last => {
                            return Err(self.error_at(ParseErrorKind::RestNotLast, span));
                        }
                        Property::Spread(inner) => {
                            PatternProp::Rest(self.expr_to_pattern(inner, span)?)
                        }
                        Property::Method { .. } | Property::Getter { .. } | Property::Setter { .. } => {
                            return Err(invalid());
                        }
                    };
                    props.push(prop);
                }
                Ok(Pattern::Object(props))
            }
            _ => Err(invalid()),
        }
    }

    /// An element of a destructuring target; `target = value` is a default.
    fn element_to_pattern(&self, expr: Expr, span: Span) -> Result<Pattern, ParseError> {
        match expr {
            Expr::Assign {
                op: AssignOp::Assign,
                target,
                value,
            } => Ok(Pattern::Default {
                target,
                default: value,
            }),
            other => self.expr_to_pattern(other, span),
        }
    }
}
