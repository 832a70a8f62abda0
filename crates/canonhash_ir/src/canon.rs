//! Canonical node tree.
//!
//! The output of graph canonicalization: a plain tree with no shared or
//! cyclic references (back-edges are `CycleRef`), no callables left as
//! source text, and mappings that carry no key order. The serializer decides
//! the order.

use rustc_hash::FxHashMap;

use crate::ast::StructuralAst;

/// Unordered canonical mapping.
pub type CanonicalMap = FxHashMap<String, CanonicalNode>;

#[derive(Clone, Debug, PartialEq)]
pub enum CanonicalNode {
    Null,
    /// Sentinel for an absent value.
    Missing,
    Bool(bool),
    Number(f64),
    String(String),
    Sequence(Vec<CanonicalNode>),
    Mapping(CanonicalMap),
    Callable {
        ast: StructuralAst,
        properties: CanonicalMap,
    },
    /// Back-edge to the ancestor `distance` levels above this position.
    CycleRef {
        distance: u32,
    },
}

impl CanonicalNode {
    /// Number of nodes in this tree, counting `self`.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            match node {
                CanonicalNode::Sequence(items) => pending.extend(items),
                CanonicalNode::Mapping(map) | CanonicalNode::Callable { properties: map, .. } => {
                    pending.extend(map.values());
                }
                CanonicalNode::Null
                | CanonicalNode::Missing
                | CanonicalNode::Bool(_)
                | CanonicalNode::Number(_)
                | CanonicalNode::String(_)
                | CanonicalNode::CycleRef { .. } => {}
            }
        }
        count
    }
}
