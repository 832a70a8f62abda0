//! Input value graph.
//!
//! Values are allocated in a [`ValueArena`] and referenced by [`ValueId`].
//! The id is the identity of a value: a graph is cyclic exactly when some
//! container lists an id that is also one of its ancestors. Cycles are built
//! by allocating the containers first and wiring children afterwards with
//! [`ValueArena::insert`] and [`ValueArena::push`].
//!
//! The hashing pipeline only ever borrows the arena immutably, so hashing can
//! never alter the caller's graph.

#[cfg(feature = "json")]
mod json;

use std::fmt;

use rustc_hash::FxHashMap;

/// Index of a value in a [`ValueArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ValueId(u32);

impl ValueId {
    /// Raw arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueId({})", self.0)
    }
}

/// String-keyed entries with unique keys.
///
/// Entries keep insertion order so callers can inspect what they built;
/// that order never reaches the canonical form. `index` maps each key to its
/// slot in `entries`.
#[derive(Clone, Debug, Default)]
pub struct Mapping {
    entries: Vec<(String, ValueId)>,
    index: FxHashMap<String, usize>,
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key`, replacing the value of an existing entry in place.
    ///
    /// Returns the previous value for the key, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: ValueId) -> Option<ValueId> {
        let key = key.into();
        if let Some(&slot) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[slot].1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    pub fn entries(&self) -> &[(String, ValueId)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, ValueId)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, ValueId)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

/// A callable value: its source text plus any extra own properties.
#[derive(Clone, Debug, PartialEq)]
pub struct Callable {
    pub source: String,
    pub properties: Mapping,
}

impl Callable {
    pub fn new(source: impl Into<String>) -> Self {
        Callable {
            source: source.into(),
            properties: Mapping::new(),
        }
    }
}

/// The kinds of value the pipeline accepts.
#[derive(Clone, Debug, PartialEq)]
pub enum ValueKind {
    Null,
    /// An absent field (JavaScript `undefined`), distinct from `Null`.
    Missing,
    Bool(bool),
    Number(f64),
    String(String),
    Sequence(Vec<ValueId>),
    Mapping(Mapping),
    Callable(Callable),
    /// A live host resource (file handle, socket, ...). Never hashable.
    Resource(String),
}

impl ValueKind {
    /// Short name of the kind, used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Missing => "missing",
            ValueKind::Bool(_) => "bool",
            ValueKind::Number(_) => "number",
            ValueKind::String(_) => "string",
            ValueKind::Sequence(_) => "sequence",
            ValueKind::Mapping(_) => "mapping",
            ValueKind::Callable(_) => "callable",
            ValueKind::Resource(_) => "resource",
        }
    }
}

/// Error raised while wiring a value graph.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("cannot {operation} into {id:?}: value is a {kind}")]
    NotAContainer {
        id: ValueId,
        kind: &'static str,
        operation: &'static str,
    },
}

/// Arena owning every value of a graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValueArena {
    values: Vec<ValueKind>,
}

impl ValueArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a value and return its id.
    ///
    /// # Panics
    /// Panics if the arena already holds `u32::MAX` values.
    pub fn alloc(&mut self, kind: ValueKind) -> ValueId {
        let index = u32::try_from(self.values.len())
            .unwrap_or_else(|_| panic!("value arena exceeded u32::MAX entries"));
        self.values.push(kind);
        ValueId(index)
    }

    /// Look up a value.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    pub fn get(&self, id: ValueId) -> &ValueKind {
        &self.values[id.index()]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn null(&mut self) -> ValueId {
        self.alloc(ValueKind::Null)
    }

    pub fn missing(&mut self) -> ValueId {
        self.alloc(ValueKind::Missing)
    }

    pub fn bool(&mut self, value: bool) -> ValueId {
        self.alloc(ValueKind::Bool(value))
    }

    pub fn number(&mut self, value: f64) -> ValueId {
        self.alloc(ValueKind::Number(value))
    }

    pub fn string(&mut self, value: impl Into<String>) -> ValueId {
        self.alloc(ValueKind::String(value.into()))
    }

    pub fn sequence(&mut self, items: impl IntoIterator<Item = ValueId>) -> ValueId {
        self.alloc(ValueKind::Sequence(items.into_iter().collect()))
    }

    pub fn mapping<K: Into<String>>(
        &mut self,
        entries: impl IntoIterator<Item = (K, ValueId)>,
    ) -> ValueId {
        self.alloc(ValueKind::Mapping(entries.into_iter().collect()))
    }

    /// Allocate a callable with no extra properties.
    pub fn callable(&mut self, source: impl Into<String>) -> ValueId {
        self.alloc(ValueKind::Callable(Callable::new(source)))
    }

    pub fn resource(&mut self, description: impl Into<String>) -> ValueId {
        self.alloc(ValueKind::Resource(description.into()))
    }

    /// Set `key` on a mapping, or attach it as a property of a callable.
    pub fn insert(
        &mut self,
        target: ValueId,
        key: impl Into<String>,
        value: ValueId,
    ) -> Result<Option<ValueId>, ValueError> {
        match &mut self.values[target.index()] {
            ValueKind::Mapping(mapping) => Ok(mapping.insert(key, value)),
            ValueKind::Callable(callable) => Ok(callable.properties.insert(key, value)),
            other => Err(ValueError::NotAContainer {
                id: target,
                kind: other.name(),
                operation: "insert",
            }),
        }
    }

    /// Append an element to a sequence.
    pub fn push(&mut self, target: ValueId, value: ValueId) -> Result<(), ValueError> {
        match &mut self.values[target.index()] {
            ValueKind::Sequence(items) => {
                items.push(value);
                Ok(())
            }
            other => Err(ValueError::NotAContainer {
                id: target,
                kind: other.name(),
                operation: "push",
            }),
        }
    }
}

#[cfg(test)]
mod tests;
