//! Stable serialization of canonical trees.
//!
//! The output is a pure function of the tree: mapping keys are sorted
//! byte-wise, numbers use their shortest round-trip form, and strings use
//! JSON escaping. Everything that is not plain data (absent values,
//! non-finite numbers, callables, back-edges) renders under a `~` prefix.
//! No ordinary rendering starts with `~`, so user data can never render the
//! same as one of these markers.

mod ast;

use canonhash_ir::{CanonicalMap, CanonicalNode};
use canonhash_stack::ensure_sufficient_stack;

/// Render `node` to its canonical string.
pub fn serialize(node: &CanonicalNode) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &CanonicalNode, out: &mut String) {
    ensure_sufficient_stack(|| match node {
        CanonicalNode::Null => out.push_str("null"),
        CanonicalNode::Missing => out.push_str("~undefined"),
        CanonicalNode::Bool(value) => write_bool(*value, out),
        CanonicalNode::Number(value) => write_number(*value, out),
        CanonicalNode::String(value) => write_string(value, out),
        CanonicalNode::Sequence(items) => {
            out.push('[');
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                write_node(item, out);
            }
            out.push(']');
        }
        CanonicalNode::Mapping(map) => write_mapping(map, out),
        CanonicalNode::Callable {
            ast: tree,
            properties,
        } => {
            out.push_str("~fn(");
            ast::write_ast(tree, out);
            out.push('|');
            write_mapping(properties, out);
            out.push(')');
        }
        CanonicalNode::CycleRef { distance } => {
            out.push_str("~cycle(");
            out.push_str(&distance.to_string());
            out.push(')');
        }
    });
}

fn write_mapping(map: &CanonicalMap, out: &mut String) {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_unstable_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));

    out.push('{');
    for (idx, (key, value)) in entries.into_iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        write_string(key, out);
        out.push(':');
        write_node(value, out);
    }
    out.push('}');
}

pub(crate) fn write_bool(value: bool, out: &mut String) {
    out.push_str(if value { "true" } else { "false" });
}

/// Shortest round-trip decimal; `-0` renders as `0`.
pub(crate) fn write_number(value: f64, out: &mut String) {
    if value.is_nan() {
        out.push_str("~nan");
    } else if value.is_infinite() {
        out.push_str(if value.is_sign_positive() { "~inf" } else { "~-inf" });
    } else if value == 0.0 {
        out.push('0');
    } else {
        out.push_str(&value.to_string());
    }
}

/// JSON string literal, quotes included.
pub(crate) fn write_string(value: &str, out: &mut String) {
    out.push_str(&serde_json::Value::String(value.to_owned()).to_string());
}
