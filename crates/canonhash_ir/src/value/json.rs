//! Ingestion of `serde_json` documents.

use canonhash_stack::ensure_sufficient_stack;
use serde_json::Value as Json;

use super::{ValueArena, ValueId, ValueKind};

impl ValueArena {
    /// Copy a JSON document into the arena and return the id of its root.
    ///
    /// JSON has no cycles, callables or missing values, so every node is
    /// allocated fresh. Numbers go through `f64`, matching how the hash
    /// treats every number.
    pub fn alloc_json(&mut self, json: &Json) -> ValueId {
        ensure_sufficient_stack(|| self.alloc_json_inner(json))
    }

    fn alloc_json_inner(&mut self, json: &Json) -> ValueId {
        match json {
            Json::Null => self.null(),
            Json::Bool(b) => self.bool(*b),
            Json::Number(n) => self.number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => self.string(s.as_str()),
            Json::Array(items) => {
                let ids: Vec<ValueId> = items.iter().map(|item| self.alloc_json(item)).collect();
                self.alloc(ValueKind::Sequence(ids))
            }
            Json::Object(map) => {
                let entries: Vec<(String, ValueId)> = map
                    .iter()
                    .map(|(key, value)| (key.clone(), self.alloc_json(value)))
                    .collect();
                self.mapping(entries)
            }
        }
    }
}
