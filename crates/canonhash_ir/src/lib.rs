//! Shared types for canonhash.
//!
//! - [`ValueArena`] / [`ValueId`] / [`ValueKind`]: the caller's value graph
//! - [`ast`]: position-free structural AST of callable source
//! - [`CanonicalNode`]: the canonicalized tree handed to the serializer
//! - [`Span`] / [`Location`]: source positions, used only for parse errors

pub mod ast;
mod canon;
mod span;
mod value;

pub use ast::StructuralAst;
pub use canon::{CanonicalMap, CanonicalNode};
pub use span::{Location, Span};
pub use value::{Callable, Mapping, ValueArena, ValueError, ValueId, ValueKind};
