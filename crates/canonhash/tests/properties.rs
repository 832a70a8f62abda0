//! End-to-end hashing properties.

use canonhash::{
    canonical_hash, canonical_hash_hex, canonical_string, canonicalize, hash_canonical,
    CanonicalHasher, Digest, DigestParams, ValueArena, ValueError, ValueId, DIGEST_LEN,
};
use pretty_assertions::{assert_eq, assert_ne};

fn hash(arena: &ValueArena, root: ValueId) -> Digest {
    hash_with(arena, root, &DigestParams::new())
}

fn hash_with(arena: &ValueArena, root: ValueId, params: &DigestParams) -> Digest {
    match canonical_hash(arena, root, params) {
        Ok(digest) => digest,
        Err(err) => panic!("hash failed: {err}"),
    }
}

fn text(arena: &ValueArena, root: ValueId) -> String {
    match canonical_string(arena, root) {
        Ok(text) => text,
        Err(err) => panic!("canonicalization failed: {err}"),
    }
}

fn link<T>(result: Result<T, ValueError>) {
    if let Err(err) = result {
        panic!("wiring failed: {err}");
    }
}

/// A mapping holding one callable under `f`.
fn with_callable(arena: &mut ValueArena, source: &str) -> ValueId {
    let f = arena.callable(source);
    arena.mapping([("f", f)])
}

#[test]
fn example_scenario() {
    let mut arena = ValueArena::new();
    let (two, four, one, three) = (
        arena.number(2.0),
        arena.number(4.0),
        arena.number(1.0),
        arena.number(3.0),
    );
    let string = arena.string("string");
    let fraction = arena.number(0.1111111111);

    let c1 = arena.mapping([("k", one), ("d", three), ("m", string)]);
    let first = arena.mapping([("a", two), ("b", four), ("c", c1), ("f", fraction)]);

    let c2 = arena.mapping([("m", string), ("k", one), ("d", three)]);
    let second = arena.mapping([("f", fraction), ("a", two), ("c", c2), ("b", four)]);

    assert_eq!(hash(&arena, first), hash(&arena, second));
    assert_eq!(
        text(&arena, first),
        r#"{"a":2,"b":4,"c":{"d":3,"k":1,"m":"string"},"f":0.1111111111}"#
    );

    let g = arena.number(1.0);
    link(arena.insert(second, "g", g));
    assert_ne!(hash(&arena, first), hash(&arena, second));
}

#[test]
fn cycle_isomorphism() {
    let mut arena = ValueArena::new();
    let build = |arena: &mut ValueArena| {
        let name = arena.string("node");
        let v = arena.mapping([("name", name)]);
        link(arena.insert(v, "x", v));
        v
    };
    let v = build(&mut arena);
    let w = build(&mut arena);

    assert_ne!(v, w);
    assert_eq!(hash(&arena, v), hash(&arena, w));
    assert_eq!(text(&arena, v), r#"{"name":"node","x":~cycle(1)}"#);
}

#[test]
fn two_node_cycle_hashes_the_same_from_either_end() {
    let mut arena = ValueArena::new();
    let a = arena.mapping::<String>([]);
    let b = arena.mapping::<String>([]);
    link(arena.insert(a, "next", b));
    link(arena.insert(b, "next", a));

    assert_eq!(text(&arena, a), r#"{"next":{"next":~cycle(2)}}"#);
    assert_eq!(hash(&arena, a), hash(&arena, b));
}

#[test]
fn cycle_position_matters() {
    let mut arena = ValueArena::new();
    let near = arena.mapping::<String>([]);
    let inner = arena.mapping([("self", near)]);
    link(arena.insert(near, "child", inner));

    let far = arena.mapping::<String>([]);
    let inner_far = arena.mapping::<String>([]);
    link(arena.insert(inner_far, "self", inner_far));
    link(arena.insert(far, "child", inner_far));

    assert_ne!(hash(&arena, near), hash(&arena, far));
}

#[test]
fn sensitivity() {
    let mut arena = ValueArena::new();
    let one = arena.number(1.0);
    let two = arena.number(2.0);

    let base = arena.mapping([("a", one), ("b", two)]);
    let other_key = arena.mapping([("a", one), ("c", two)]);
    let other_value = arena.mapping([("a", one), ("b", one)]);
    let forward = arena.sequence([one, two]);
    let backward = arena.sequence([two, one]);

    assert_ne!(hash(&arena, base), hash(&arena, other_key));
    assert_ne!(hash(&arena, base), hash(&arena, other_value));
    assert_ne!(hash(&arena, forward), hash(&arena, backward));
}

#[test]
fn scalar_kinds_are_distinct() {
    let mut arena = ValueArena::new();
    let roots = [
        arena.null(),
        arena.missing(),
        arena.bool(false),
        arena.number(0.0),
        arena.string(""),
        arena.string("null"),
        arena.string("~undefined"),
        arena.sequence([]),
        arena.mapping::<String>([]),
    ];
    let digests: Vec<_> = roots.iter().map(|&root| hash(&arena, root)).collect();
    for (i, a) in digests.iter().enumerate() {
        for b in &digests[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn missing_differs_from_null_and_marker_lookalikes() {
    let mut arena = ValueArena::new();
    let missing = arena.missing();
    let null = arena.null();
    let marker = arena.string("~undefined");
    let with_missing = arena.mapping([("v", missing)]);
    let with_null = arena.mapping([("v", null)]);
    let with_marker = arena.mapping([("v", marker)]);
    let keyed_marker = arena.mapping([("~undefined", null)]);

    assert_eq!(text(&arena, with_missing), r#"{"v":~undefined}"#);
    assert_ne!(hash(&arena, with_missing), hash(&arena, with_null));
    assert_ne!(hash(&arena, with_missing), hash(&arena, with_marker));
    assert_ne!(text(&arena, keyed_marker), text(&arena, missing));
}

#[test]
fn negative_zero_is_zero() {
    let mut arena = ValueArena::new();
    let pos = arena.number(0.0);
    let neg = arena.number(-0.0);
    assert_eq!(hash(&arena, pos), hash(&arena, neg));
}

#[test]
fn non_finite_numbers_do_not_collide_with_strings() {
    let mut arena = ValueArena::new();
    let nan = arena.number(f64::NAN);
    let inf = arena.number(f64::INFINITY);
    let neg_inf = arena.number(f64::NEG_INFINITY);
    let text_nan = arena.string("NaN");

    assert_eq!(text(&arena, nan), "~nan");
    assert_eq!(text(&arena, inf), "~inf");
    assert_eq!(text(&arena, neg_inf), "~-inf");
    assert_ne!(hash(&arena, nan), hash(&arena, text_nan));
}

#[test]
fn shared_value_hashes_like_copies() {
    let mut arena = ValueArena::new();
    let one = arena.number(1.0);
    let shared = arena.mapping([("n", one)]);
    let aliased = arena.sequence([shared, shared]);

    let copy_a = arena.mapping([("n", one)]);
    let copy_b = arena.mapping([("n", one)]);
    let copied = arena.sequence([copy_a, copy_b]);

    assert_eq!(hash(&arena, aliased), hash(&arena, copied));
}

#[test]
fn callables_ignore_layout_and_comments() {
    let mut arena = ValueArena::new();
    let tight = with_callable(&mut arena, "function add(a,b){return a+b}");
    let loose = with_callable(
        &mut arena,
        "function add ( a, b ) {\n  // sum\n  return /* both */ a + b;\n}",
    );
    let grouped = with_callable(&mut arena, "function add(a, b) { return (a + b); }");

    assert_eq!(hash(&arena, tight), hash(&arena, loose));
    assert_eq!(hash(&arena, tight), hash(&arena, grouped));
}

#[test]
fn callables_differ_on_logic_or_parameters() {
    let mut arena = ValueArena::new();
    let sources = [
        "function add(a, b) { return a + b; }",
        "function add(a, b) { return a - b; }",
        "function add(b, a) { return a + b; }",
        "function add(a, b, c) { return a + b; }",
        "function add(x, y) { return x + y; }",
        "function plus(a, b) { return a + b; }",
        "(a, b) => a + b",
        "async (a, b) => a + b",
    ];
    let digests: Vec<_> = sources
        .iter()
        .map(|source| {
            let root = with_callable(&mut arena, source);
            hash(&arena, root)
        })
        .collect();

    for (i, a) in digests.iter().enumerate() {
        for (j, b) in digests.iter().enumerate().skip(i + 1) {
            assert_ne!(a, b, "{} vs {}", sources[i], sources[j]);
        }
    }
}

#[test]
fn modern_syntax_hashes_by_structure() {
    let mut arena = ValueArena::new();
    let same = [
        (
            "function ({a, b}) { return `x${a}` + b }",
            "function ( { a , b } ) {\n  return `x${ a }` + b;\n}",
        ),
        (
            "function (a) { return a?.b ?? /x/g.test(a) }",
            "function (a) { return (a ?. b) ?? (/x/g).test(a); }",
        ),
        (
            "function () { return { get x() { return [1,,2] }, y: 10n } }",
            "function () { return { get x () { return [1, , 2]; }, y: 0xan }; }",
        ),
    ];
    for (left, right) in same {
        let l = with_callable(&mut arena, left);
        let r = with_callable(&mut arena, right);
        assert_eq!(hash(&arena, l), hash(&arena, r), "{left} vs {right}");
    }

    let differ = [
        ("function ({a, b}) { return a }", "function ({b, a}) { return a }"),
        ("function (a) { return a?.b }", "function (a) { return a.b }"),
        ("function () { return [1,,2] }", "function () { return [1,2] }"),
        ("function () { return 10n }", "function () { return 10 }"),
        ("function () { return `a` }", "function () { return 'a' }"),
        ("function () { return { get x() {} } }", "function () { return { x() {} } }"),
    ];
    for (left, right) in differ {
        let l = with_callable(&mut arena, left);
        let r = with_callable(&mut arena, right);
        assert_ne!(hash(&arena, l), hash(&arena, r), "{left} vs {right}");
    }
}

#[test]
fn callable_properties_are_hashed() {
    let mut arena = ValueArena::new();
    let source = "function f() { return 1; }";
    let bare = arena.callable(source);
    let tagged = arena.callable(source);
    let other_tag = arena.callable(source);

    let v1 = arena.string("v1");
    let v2 = arena.string("v2");
    link(arena.insert(tagged, "version", v1));
    link(arena.insert(other_tag, "version", v2));

    assert_ne!(hash(&arena, bare), hash(&arena, tagged));
    assert_ne!(hash(&arena, tagged), hash(&arena, other_tag));
}

#[test]
fn callable_with_self_property_is_cycle_safe() {
    let mut arena = ValueArena::new();
    let f = arena.callable("function f() {}");
    link(arena.insert(f, "me", f));
    let g = arena.callable("function f() {}");
    link(arena.insert(g, "me", g));

    assert_eq!(hash(&arena, f), hash(&arena, g));
    assert!(text(&arena, f).ends_with(r#"|{"me":~cycle(1)})"#));
}

#[test]
fn domain_separation() {
    let mut arena = ValueArena::new();
    let one = arena.number(1.0);
    let root = arena.mapping([("a", one)]);

    let plain = hash_with(&arena, root, &DigestParams::new());
    let k1 = hash_with(&arena, root, &DigestParams::new().with_key(*b"k1"));
    let k2 = hash_with(&arena, root, &DigestParams::new().with_key(*b"k2"));
    let s1 = hash_with(&arena, root, &DigestParams::new().with_salt(*b"s1"));
    let s2 = hash_with(&arena, root, &DigestParams::new().with_salt(*b"s2"));
    let p1 = hash_with(&arena, root, &DigestParams::new().with_personal(*b"p1"));
    let p2 = hash_with(&arena, root, &DigestParams::new().with_personal(*b"p2"));

    assert_ne!(k1, k2);
    assert_ne!(s1, s2);
    assert_ne!(p1, p2);
    assert_ne!(plain, k1);
    assert_ne!(plain, s1);
    assert_ne!(plain, p1);
}

#[test]
fn hashing_leaves_the_graph_untouched() {
    let mut arena = ValueArena::new();
    let f = arena.callable("function (x) { return x * 2; }");
    let tag = arena.string("doubler");
    link(arena.insert(f, "tag", tag));
    let missing = arena.missing();
    let root = arena.mapping([("f", f), ("gap", missing)]);
    link(arena.insert(root, "loop", root));

    let before = arena.clone();
    let _ = hash(&arena, root);
    let _ = canonicalize(&arena, root);
    assert_eq!(arena, before);
}

#[test]
fn determinism() {
    let mut arena = ValueArena::new();
    let f = arena.callable("x => x");
    let root = arena.mapping([("f", f)]);
    link(arena.insert(root, "self", root));

    let params = DigestParams::new().with_key(*b"key").with_personal(*b"app");
    let first = hash_with(&arena, root, &params);
    for _ in 0..5 {
        assert_eq!(hash_with(&arena, root, &params), first);
    }
}

#[test]
fn encodings_agree() {
    let mut arena = ValueArena::new();
    let root = arena.string("hello");
    let params = DigestParams::new();

    let digest = hash(&arena, root);
    let hex = match canonical_hash_hex(&arena, root, &params) {
        Ok(hex) => hex,
        Err(err) => panic!("hash failed: {err}"),
    };
    assert_eq!(hex.len(), 2 * DIGEST_LEN);
    assert_eq!(hex, digest.to_hex());

    let node = match canonicalize(&arena, root) {
        Ok(node) => node,
        Err(err) => panic!("canonicalization failed: {err}"),
    };
    assert_eq!(hash_canonical(&node, &params), Ok(digest));
    assert_eq!(CanonicalHasher::default().hash(&arena, root), Ok(digest));
}

#[test]
fn json_documents_hash_by_content() {
    let mut arena = ValueArena::new();
    let first = arena.alloc_json(&serde_json::json!({
        "name": "widget",
        "sizes": [1, 2.5, -3],
        "meta": { "ok": true, "note": null }
    }));
    let second = arena.alloc_json(&serde_json::json!({
        "meta": { "note": null, "ok": true },
        "sizes": [1, 2.5, -3],
        "name": "widget"
    }));

    assert_eq!(hash(&arena, first), hash(&arena, second));
    assert_eq!(
        text(&arena, first),
        r#"{"meta":{"note":null,"ok":true},"name":"widget","sizes":[1,2.5,-3]}"#
    );
}
