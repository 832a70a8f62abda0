use super::*;
use pretty_assertions::assert_eq;

fn canon(arena: &ValueArena, root: ValueId) -> CanonicalNode {
    match canonicalize(arena, root, &CanonConfig::default()) {
        Ok(node) => node,
        Err(err) => panic!("canonicalize failed: {err}"),
    }
}

fn link<T>(result: Result<T, canonhash_ir::ValueError>) {
    if let Err(err) = result {
        panic!("wiring failed: {err}");
    }
}

fn map(entries: Vec<(&str, CanonicalNode)>) -> CanonicalNode {
    CanonicalNode::Mapping(
        entries
            .into_iter()
            .map(|(key, node)| (key.to_owned(), node))
            .collect(),
    )
}

#[test]
fn scalar_root() {
    let mut arena = ValueArena::new();
    let root = arena.string("hi");
    assert_eq!(canon(&arena, root), CanonicalNode::String("hi".to_owned()));
}

#[test]
fn nested_containers() {
    let mut arena = ValueArena::new();
    let one = arena.number(1.0);
    let missing = arena.missing();
    let list = arena.sequence([one, missing]);
    let flag = arena.bool(true);
    let root = arena.mapping([("list", list), ("flag", flag)]);

    assert_eq!(
        canon(&arena, root),
        map(vec![
            (
                "list",
                CanonicalNode::Sequence(vec![CanonicalNode::Number(1.0), CanonicalNode::Missing])
            ),
            ("flag", CanonicalNode::Bool(true)),
        ])
    );
}

#[test]
fn self_reference_has_distance_one() {
    let mut arena = ValueArena::new();
    let root = arena.mapping::<String>([]);
    link(arena.insert(root, "self", root));

    assert_eq!(
        canon(&arena, root),
        map(vec![("self", CanonicalNode::CycleRef { distance: 1 })])
    );
}

#[test]
fn distance_counts_frames_to_the_ancestor() {
    let mut arena = ValueArena::new();
    let a = arena.mapping::<String>([]);
    let b = arena.sequence([]);
    link(arena.insert(a, "b", b));
    link(arena.push(b, a));

    assert_eq!(
        canon(&arena, a),
        map(vec![(
            "b",
            CanonicalNode::Sequence(vec![CanonicalNode::CycleRef { distance: 2 }])
        )])
    );
}

#[test]
fn shared_value_is_expanded_in_each_branch() {
    let mut arena = ValueArena::new();
    let leaf = arena.number(7.0);
    let shared = arena.mapping([("v", leaf)]);
    let root = arena.sequence([shared, shared]);

    let expanded = map(vec![("v", CanonicalNode::Number(7.0))]);
    assert_eq!(
        canon(&arena, root),
        CanonicalNode::Sequence(vec![expanded.clone(), expanded])
    );
}

#[test]
fn callable_properties_and_self_reference() {
    let mut arena = ValueArena::new();
    let f = arena.callable("function (a) { return a }");
    let tag = arena.string("x");
    link(arena.insert(f, "tag", tag));
    link(arena.insert(f, "me", f));

    let CanonicalNode::Callable { ast, properties } = canon(&arena, f) else {
        panic!("expected a callable node");
    };
    assert_eq!(Ok(ast), normalize_callable("function(a){return a}"));
    assert_eq!(
        properties.get("me"),
        Some(&CanonicalNode::CycleRef { distance: 1 })
    );
    assert_eq!(
        properties.get("tag"),
        Some(&CanonicalNode::String("x".to_owned()))
    );
}

#[test]
fn depth_limit() {
    let mut arena = ValueArena::new();
    let mut current = arena.null();
    for _ in 0..10 {
        current = arena.sequence([current]);
    }

    let tight = CanonConfig::with_max_depth(9);
    assert_eq!(
        canonicalize(&arena, current, &tight),
        Err(CanonError::DepthExceeded { limit: 9 })
    );
    let exact = CanonConfig::with_max_depth(10);
    assert!(canonicalize(&arena, current, &exact).is_ok());
}

#[test]
fn long_chain_under_default_limit() {
    let mut arena = ValueArena::new();
    let mut current = arena.number(0.0);
    for _ in 0..1_000 {
        current = arena.mapping([("next", current)]);
    }
    let node = canon(&arena, current);
    assert_eq!(node.node_count(), 1_001);
}

#[test]
fn chain_beyond_default_limit_fails() {
    let mut arena = ValueArena::new();
    let mut current = arena.null();
    for _ in 0..10_000 {
        current = arena.sequence([current]);
    }
    assert_eq!(
        canonicalize(&arena, current, &CanonConfig::default()),
        Err(CanonError::DepthExceeded {
            limit: crate::DEFAULT_MAX_DEPTH
        })
    );
}

#[test]
fn resource_anywhere_is_rejected() {
    let mut arena = ValueArena::new();
    let socket = arena.resource("socket");
    let inner = arena.sequence([socket]);
    let root = arena.mapping([("inner", inner)]);
    assert_eq!(
        canonicalize(&arena, root, &CanonConfig::default()),
        Err(CanonError::UnsupportedValueKind { kind: "resource" })
    );
}

#[test]
fn malformed_callable_is_rejected() {
    let mut arena = ValueArena::new();
    let f = arena.callable("not a function");
    let root = arena.sequence([f]);
    assert!(matches!(
        canonicalize(&arena, root, &CanonConfig::default()),
        Err(CanonError::MalformedCallable(_))
    ));
}

#[test]
fn cyclic_callable_is_not_parsed_twice() {
    let mut arena = ValueArena::new();
    let f = arena.callable("x => x");
    let holder = arena.mapping([("f", f)]);
    link(arena.insert(f, "holder", holder));
    let node = canon(&arena, holder);
    assert_eq!(node.node_count(), 3);
}

#[test]
fn input_graph_is_untouched() {
    let mut arena = ValueArena::new();
    let f = arena.callable("function () { /* c */ return 1 }");
    let missing = arena.missing();
    let root = arena.mapping([("f", f), ("m", missing)]);
    link(arena.insert(root, "loop", root));
    let before = arena.clone();

    let _ = canon(&arena, root);
    assert_eq!(arena, before);
}
