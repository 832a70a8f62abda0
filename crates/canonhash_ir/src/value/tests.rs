use super::*;
use pretty_assertions::assert_eq;

fn lookup(mapping: &Mapping, key: &str) -> Option<ValueId> {
    mapping
        .entries()
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| *v)
}

#[test]
fn alloc_returns_sequential_ids() {
    let mut arena = ValueArena::new();
    let a = arena.null();
    let b = arena.number(1.5);
    assert_eq!(a.index(), 0);
    assert_eq!(b.index(), 1);
    assert_eq!(arena.len(), 2);
    assert_eq!(arena.get(b), &ValueKind::Number(1.5));
}

#[test]
fn mapping_insert_replaces_in_place() {
    let mut arena = ValueArena::new();
    let one = arena.number(1.0);
    let two = arena.number(2.0);
    let three = arena.number(3.0);
    let map = arena.mapping([("a", one), ("b", two)]);

    let previous = arena.insert(map, "a", three);
    assert_eq!(previous, Ok(Some(one)));

    let ValueKind::Mapping(mapping) = arena.get(map) else {
        panic!("expected mapping");
    };
    let keys: Vec<&str> = mapping.entries().iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(lookup(&mapping, "a"), Some(three));
}

#[test]
fn duplicate_keys_collapse_on_construction() {
    let mut arena = ValueArena::new();
    let one = arena.number(1.0);
    let two = arena.number(2.0);
    let map = arena.mapping([("k", one), ("k", two)]);
    let ValueKind::Mapping(mapping) = arena.get(map) else {
        panic!("expected mapping");
    };
    assert_eq!(mapping.len(), 1);
    assert_eq!(lookup(&mapping, "k"), Some(two));
}

#[test]
fn large_mapping_keeps_keys_unique() {
    let mut arena = ValueArena::new();
    let ids: Vec<ValueId> = (0..20_000).map(|n| arena.number(f64::from(n))).collect();
    let mut mapping: Mapping = ids.iter().map(|&id| (format!("k{}", id.index()), id)).collect();
    assert_eq!(mapping.len(), 20_000);

    // Reinserting every key replaces values without adding entries.
    for (n, &id) in ids.iter().rev().enumerate() {
        let key = format!("k{n}");
        assert_eq!(mapping.insert(key, id), Some(ids[n]));
    }
    assert_eq!(mapping.len(), 20_000);
    assert_eq!(mapping.entries()[0], ("k0".to_string(), ids[19_999]));
    assert_eq!(lookup(&mapping, "k19999"), Some(ids[0]));
}

#[test]
fn mapping_equality_follows_entries() {
    let mut arena = ValueArena::new();
    let one = arena.number(1.0);
    let two = arena.number(2.0);
    let mut built = Mapping::new();
    built.insert("a", two);
    built.insert("a", one);
    let direct: Mapping = [("a", one)].into_iter().collect();
    assert_eq!(built, direct);
    assert_ne!(built, [("a", two)].into_iter().collect::<Mapping>());
}

#[test]
fn insert_attaches_callable_properties() {
    let mut arena = ValueArena::new();
    let f = arena.callable("function (a) { return a }");
    let tag = arena.string("tag");
    assert_eq!(arena.insert(f, "label", tag), Ok(None));

    let ValueKind::Callable(callable) = arena.get(f) else {
        panic!("expected callable");
    };
    assert_eq!(lookup(&callable.properties, "label"), Some(tag));
}

#[test]
fn self_reference_is_representable() {
    let mut arena = ValueArena::new();
    let root = arena.mapping::<&str>([]);
    assert_eq!(arena.insert(root, "me", root), Ok(None));
    let ValueKind::Mapping(mapping) = arena.get(root) else {
        panic!("expected mapping");
    };
    assert_eq!(lookup(&mapping, "me"), Some(root));
}

#[test]
fn push_appends_to_sequence() {
    let mut arena = ValueArena::new();
    let seq = arena.sequence([]);
    let item = arena.bool(true);
    assert_eq!(arena.push(seq, item), Ok(()));
    assert_eq!(arena.get(seq), &ValueKind::Sequence(vec![item]));
}

#[test]
fn wiring_into_scalars_fails() {
    let mut arena = ValueArena::new();
    let scalar = arena.string("leaf");
    let other = arena.null();

    let err = arena.insert(scalar, "k", other);
    assert_eq!(
        err,
        Err(ValueError::NotAContainer {
            id: scalar,
            kind: "string",
            operation: "insert",
        })
    );

    let err = arena.push(scalar, other);
    assert!(matches!(
        err,
        Err(ValueError::NotAContainer {
            operation: "push",
            ..
        })
    ));
}

#[test]
fn kind_names() {
    assert_eq!(ValueKind::Missing.name(), "missing");
    assert_eq!(ValueKind::Resource("fd 3".into()).name(), "resource");
}

#[cfg(feature = "json")]
#[test]
fn alloc_json_builds_tree() {
    let json = serde_json::json!({"a": [1, "x", null], "b": {"c": true}});
    let mut arena = ValueArena::new();
    let root = arena.alloc_json(&json);

    let ValueKind::Mapping(mapping) = arena.get(root) else {
        panic!("expected mapping");
    };
    assert_eq!(mapping.len(), 2);
    let Some(a) = lookup(&mapping, "a") else {
        panic!("missing key a");
    };
    let ValueKind::Sequence(items) = arena.get(a) else {
        panic!("expected sequence");
    };
    assert_eq!(arena.get(items[0]), &ValueKind::Number(1.0));
    assert_eq!(arena.get(items[1]), &ValueKind::String("x".into()));
    assert_eq!(arena.get(items[2]), &ValueKind::Null);
}

#[cfg(feature = "json")]
#[test]
fn alloc_json_deep_nesting() {
    let mut json = serde_json::json!(0);
    for _ in 0..20_000 {
        json = serde_json::Value::Array(vec![json]);
    }
    let mut arena = ValueArena::new();
    let root = arena.alloc_json(&json);
    assert_eq!(arena.len(), 20_001);

    let mut id = root;
    let mut depth = 0;
    while let ValueKind::Sequence(items) = arena.get(id) {
        id = items[0];
        depth += 1;
    }
    assert_eq!(depth, 20_000);
    assert_eq!(arena.get(id), &ValueKind::Number(0.0));

    // Dropping a deep `serde_json::Value` recurses; unwind it iteratively.
    while let serde_json::Value::Array(mut items) = json {
        json = items.pop().unwrap_or_default();
    }
}
