//! Canonicalization of value graphs.
//!
//! Three stages turn a [`ValueArena`](canonhash_ir::ValueArena) rooted at a
//! [`ValueId`](canonhash_ir::ValueId) into a byte-exact string:
//!
//! 1. [`canonicalize`] walks the graph with an explicit ancestor stack,
//!    replacing back-edges with `CycleRef` markers and callables with their
//!    structural AST.
//! 2. [`normalize_callable`] / [`normalize_missing`] supply the
//!    representation of callables and absent values.
//! 3. [`serialize`] renders the canonical tree with sorted mapping keys.
//!
//! Every stage borrows its input; none of them touch the caller's graph.

mod config;
mod error;
mod normalize;
mod serialize;
mod walk;

pub use config::{CanonConfig, DEFAULT_MAX_DEPTH};
pub use error::CanonError;
pub use normalize::{normalize_callable, normalize_missing};
pub use serialize::serialize;
pub use walk::canonicalize;
