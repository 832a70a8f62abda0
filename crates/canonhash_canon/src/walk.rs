//! Graph canonicalization.
//!
//! Depth-first over the value graph with an explicit frame stack instead of
//! recursion. The frame stack is the ancestor chain: `on_stack` maps each open
//! container to its depth, so a child that is already open is a back-edge and
//! becomes `CycleRef { distance }` with the distance counted in frames from
//! the current container. Entries leave `on_stack` when their frame closes;
//! a value reachable along two disjoint branches is therefore expanded in
//! both.

use canonhash_ir::{CanonicalMap, CanonicalNode, StructuralAst, ValueArena, ValueId, ValueKind};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::normalize::{normalize_callable, normalize_missing};
use crate::{CanonConfig, CanonError};

/// Canonicalize the graph rooted at `root`.
///
/// # Panics
/// Panics if `root`, or any id reachable from it, was not allocated by `arena`.
pub fn canonicalize(
    arena: &ValueArena,
    root: ValueId,
    config: &CanonConfig,
) -> Result<CanonicalNode, CanonError> {
    debug!(?root, max_depth = config.max_depth, "canonicalizing value graph");
    let node = Walker::new(arena, config).run(root)?;
    debug!(nodes = node.node_count(), "canonicalized value graph");
    Ok(node)
}

/// An open container and the children converted so far.
struct Frame<'a> {
    id: ValueId,
    shape: Shape<'a>,
    /// Index of the next child to visit.
    next: usize,
}

enum Shape<'a> {
    Sequence {
        items: &'a [ValueId],
        out: Vec<CanonicalNode>,
    },
    Mapping {
        entries: &'a [(String, ValueId)],
        out: CanonicalMap,
    },
    Callable {
        ast: StructuralAst,
        entries: &'a [(String, ValueId)],
        out: CanonicalMap,
    },
}

impl Frame<'_> {
    /// Hand out the next child to visit, if any remain.
    fn next_child(&mut self) -> Option<ValueId> {
        let child = match &self.shape {
            Shape::Sequence { items, .. } => items.get(self.next).copied(),
            Shape::Mapping { entries, .. } | Shape::Callable { entries, .. } => {
                entries.get(self.next).map(|(_, id)| *id)
            }
        }?;
        self.next += 1;
        Some(child)
    }

    /// Store the converted form of the child last handed out by `next_child`.
    fn attach(&mut self, node: CanonicalNode) {
        let slot = self.next - 1;
        match &mut self.shape {
            Shape::Sequence { out, .. } => out.push(node),
            Shape::Mapping { entries, out } | Shape::Callable { entries, out, .. } => {
                out.insert(entries[slot].0.clone(), node);
            }
        }
    }

    fn finish(self) -> CanonicalNode {
        match self.shape {
            Shape::Sequence { out, .. } => CanonicalNode::Sequence(out),
            Shape::Mapping { out, .. } => CanonicalNode::Mapping(out),
            Shape::Callable { ast, out, .. } => CanonicalNode::Callable {
                ast,
                properties: out,
            },
        }
    }
}

struct Walker<'a> {
    arena: &'a ValueArena,
    max_depth: usize,
    stack: Vec<Frame<'a>>,
    /// Open containers and their depth in `stack`.
    on_stack: FxHashMap<ValueId, usize>,
}

impl<'a> Walker<'a> {
    fn new(arena: &'a ValueArena, config: &CanonConfig) -> Self {
        Walker {
            arena,
            max_depth: config.max_depth,
            stack: Vec::new(),
            on_stack: FxHashMap::default(),
        }
    }

    fn run(mut self, root: ValueId) -> Result<CanonicalNode, CanonError> {
        let mut pending = self.enter(root)?;
        loop {
            if let Some(node) = pending.take() {
                let Some(parent) = self.stack.last_mut() else {
                    return Ok(node);
                };
                parent.attach(node);
            }

            let Some(frame) = self.stack.last_mut() else {
                unreachable!("enter() pushes a frame whenever it returns None");
            };
            pending = match frame.next_child() {
                Some(child) => self.enter(child)?,
                None => self.close(),
            };
        }
    }

    /// Convert a scalar (or back-edge) directly; open a frame for a container.
    ///
    /// Returns `None` when a frame was pushed.
    fn enter(&mut self, id: ValueId) -> Result<Option<CanonicalNode>, CanonError> {
        let arena = self.arena;
        let kind = arena.get(id);
        let shape = match kind {
            ValueKind::Null => return Ok(Some(CanonicalNode::Null)),
            ValueKind::Missing => return Ok(Some(normalize_missing())),
            ValueKind::Bool(value) => return Ok(Some(CanonicalNode::Bool(*value))),
            ValueKind::Number(value) => return Ok(Some(CanonicalNode::Number(*value))),
            ValueKind::String(value) => return Ok(Some(CanonicalNode::String(value.clone()))),
            ValueKind::Resource(_) => {
                return Err(CanonError::UnsupportedValueKind { kind: kind.name() });
            }
            ValueKind::Sequence(items) => {
                if let Some(cycle) = self.back_edge(id)? {
                    return Ok(Some(cycle));
                }
                Shape::Sequence {
                    items,
                    out: Vec::with_capacity(items.len()),
                }
            }
            ValueKind::Mapping(mapping) => {
                if let Some(cycle) = self.back_edge(id)? {
                    return Ok(Some(cycle));
                }
                Shape::Mapping {
                    entries: mapping.entries(),
                    out: CanonicalMap::default(),
                }
            }
            ValueKind::Callable(callable) => {
                if let Some(cycle) = self.back_edge(id)? {
                    return Ok(Some(cycle));
                }
                Shape::Callable {
                    ast: normalize_callable(&callable.source)?,
                    entries: callable.properties.entries(),
                    out: CanonicalMap::default(),
                }
            }
        };

        trace!(?id, depth = self.stack.len(), "open container");
        self.on_stack.insert(id, self.stack.len());
        self.stack.push(Frame { id, shape, next: 0 });
        Ok(None)
    }

    /// `CycleRef` if `id` is already open; otherwise check that one more
    /// frame fits under the depth limit.
    fn back_edge(&self, id: ValueId) -> Result<Option<CanonicalNode>, CanonError> {
        if let Some(&depth) = self.on_stack.get(&id) {
            let distance = self.stack.len() - depth;
            trace!(?id, distance, "back-edge");
            return Ok(Some(CanonicalNode::CycleRef {
                distance: u32::try_from(distance).unwrap_or(u32::MAX),
            }));
        }
        if self.stack.len() >= self.max_depth {
            debug!(limit = self.max_depth, "depth limit reached");
            return Err(CanonError::DepthExceeded {
                limit: self.max_depth,
            });
        }
        Ok(None)
    }

    /// Pop the finished top frame and return its node.
    fn close(&mut self) -> Option<CanonicalNode> {
        let frame = self.stack.pop()?;
        self.on_stack.remove(&frame.id);
        trace!(id = ?frame.id, "close container");
        Some(frame.finish())
    }
}

#[cfg(test)]
mod tests;
