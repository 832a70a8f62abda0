//! Recursive-descent parser for callable source.
//!
//! Turns the textual form of a callable into the position-free
//! [`StructuralAst`]. The accepted language is JavaScript functions:
//! function expressions and declarations (plain, `async`, generator), arrow
//! functions, and the statements and expressions they contain, including
//! destructuring, templates, regular expressions, optional chaining and
//! object accessors. Classes, `new.target` and module syntax are rejected;
//! `super` and `import` read as plain identifiers.
//!
//! Semicolons are optional the way JavaScript makes them optional: a
//! statement may also end at `}`, at end of input, or before a token on a new
//! line. `return`, `break`, `continue` and postfix `++`/`--` do not continue
//! across a line break.

mod cursor;
mod error;
mod grammar;

use canonhash_ir::{Span, StructuralAst};
use canonhash_lexer::{TokenKind, TokenList};
use tracing::trace;

use crate::cursor::Cursor;
pub use error::{ParseError, ParseErrorKind};

/// Parse `source`, which must consist of exactly one function.
pub fn parse_callable(source: &str) -> Result<StructuralAst, ParseError> {
    let tokens = canonhash_lexer::lex(source).map_err(|err| ParseError::from_lex(err, source))?;
    trace!(bytes = source.len(), tokens = tokens.len(), "parsing callable");
    Parser::new(&tokens, source).parse_root()
}

/// Parser state.
struct Parser<'a> {
    cursor: Cursor<'a>,
    source: &'a str,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a TokenList, source: &'a str) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            source,
        }
    }

    fn error_at(&self, kind: ParseErrorKind, span: Span) -> ParseError {
        ParseError::new(kind, span, self.source)
    }

    /// "expected `what`, found <current token>".
    fn expected(&self, what: &str) -> ParseError {
        let token = self.cursor.current();
        let kind = ParseErrorKind::Expected {
            expected: what.to_owned(),
            found: token.kind.to_string(),
        };
        self.error_at(kind, token.span)
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.cursor.eat(kind) {
            Ok(())
        } else {
            Err(self.expected(&kind.to_string()))
        }
    }

    fn expect_ident(&mut self, what: &str) -> Result<String, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Ident(name) => {
                self.cursor.advance();
                Ok(name.clone())
            }
            _ => Err(self.expected(what)),
        }
    }
}
