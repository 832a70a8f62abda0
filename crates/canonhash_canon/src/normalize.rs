//! Representations of callables and absent values.

use canonhash_ir::{CanonicalNode, StructuralAst};
use canonhash_parse::parse_callable;
use tracing::debug;

use crate::CanonError;

/// Reduce callable source to its structural AST.
///
/// Whitespace and comments vanish; names, parameters, literals and statement
/// structure remain. Fails with `MalformedCallable` unless the source is
/// exactly one function.
pub fn normalize_callable(source: &str) -> Result<StructuralAst, CanonError> {
    let ast = parse_callable(source).inspect_err(|err| {
        debug!(%err, bytes = source.len(), "callable source rejected");
    })?;
    Ok(ast)
}

/// Canonical form of an absent value.
pub fn normalize_missing() -> CanonicalNode {
    CanonicalNode::Missing
}
