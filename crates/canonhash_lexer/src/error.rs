//! Lexer errors.

use canonhash_ir::Span;

/// What went wrong while tokenizing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LexErrorKind {
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("unterminated template literal")]
    UnterminatedTemplate,
    #[error("unterminated regular expression literal")]
    UnterminatedRegex,
    #[error("invalid regular expression flags `{0}`")]
    InvalidRegexFlags(String),
    #[error("invalid number literal `{0}`")]
    InvalidNumber(String),
    #[error("invalid escape sequence `{0}`")]
    InvalidEscape(String),
}

/// A lexer error and the byte span it covers.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { kind, span }
    }
}
