//! Tokenizer for callable source text.
//!
//! Produces a flat [`TokenList`] for `canonhash_parse`. Comments and
//! whitespace are dropped here, which is the first half of making callable
//! hashing layout-insensitive; the parser finishes the job by never
//! recording spans in the AST.

mod error;
mod lexer;
mod token;

pub use error::{LexError, LexErrorKind};
pub use lexer::lex;
pub use token::{TemplateChunk, Token, TokenKind, TokenList};
