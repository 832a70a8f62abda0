//! Parse errors.
//!
//! Every error carries the byte span of the offending token and its 1-based
//! line and column, so it can be shown without the source at hand.

use canonhash_ir::{Location, Span};
use canonhash_lexer::{LexError, LexErrorKind};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error(transparent)]
    Lex(LexErrorKind),
    #[error("expected {expected}, found {found}")]
    Expected { expected: String, found: String },
    #[error("expected a function")]
    NotAFunction,
    #[error("unexpected {found} after the function")]
    TrailingInput { found: String },
    #[error("function declaration requires a name")]
    MissingFunctionName,
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,
    #[error("rest element must be last")]
    RestNotLast,
    #[error("missing initializer in declaration")]
    MissingInitializer,
    #[error("unary operator before `**` needs parentheses")]
    UnaryBeforeExponent,
    #[error("`??` cannot be mixed with `&&` or `||` without parentheses")]
    MixedCoalesce,
    #[error("invalid optional chain")]
    InvalidOptionalChain,
    #[error("line break is not allowed after `throw`")]
    NewlineAfterThrow,
    #[error("`try` needs a `catch` or `finally` block")]
    MissingCatchOrFinally,
    #[error("`switch` has more than one `default` clause")]
    DuplicateDefault,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at {location}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub location: Location,
}

impl ParseError {
    /// Build an error for `span`, resolving its line and column in `source`.
    pub fn new(kind: ParseErrorKind, span: Span, source: &str) -> Self {
        ParseError {
            kind,
            span,
            location: Location::of(source, span.start),
        }
    }

    pub fn from_lex(err: LexError, source: &str) -> Self {
        Self::new(ParseErrorKind::Lex(err.kind), err.span, source)
    }
}
