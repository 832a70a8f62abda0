//! Failures surface as `HashError` and abort the whole call.

use canonhash::{
    canonical_hash, canonical_string, CanonError, CanonicalHasher, DigestParams, HashConfig,
    HashError, ValueArena, DEFAULT_MAX_DEPTH,
};
use pretty_assertions::assert_eq;

#[test]
fn deep_chain_exceeds_default_depth() {
    let mut arena = ValueArena::new();
    let mut node = arena.null();
    for _ in 0..10_000 {
        node = arena.sequence([node]);
    }

    assert_eq!(
        canonical_hash(&arena, node, &DigestParams::new()),
        Err(HashError::Canon(CanonError::DepthExceeded {
            limit: DEFAULT_MAX_DEPTH
        }))
    );
}

#[test]
fn raised_depth_limit_admits_deeper_graphs() {
    let mut arena = ValueArena::new();
    let mut node = arena.null();
    for _ in 0..200 {
        node = arena.sequence([node]);
    }

    let tight = CanonicalHasher::new(HashConfig::with_max_depth(100));
    let roomy = CanonicalHasher::new(HashConfig::with_max_depth(200));
    assert!(tight.hash(&arena, node).is_err());
    assert!(roomy.hash(&arena, node).is_ok());
}

#[test]
fn cycles_never_hit_the_depth_limit() {
    let mut arena = ValueArena::new();
    let root = arena.sequence([]);
    let inner = arena.sequence([root]);
    let ring = arena.mapping([("inner", inner)]);
    if let Err(err) = arena.push(root, ring) {
        panic!("wiring failed: {err}");
    }

    let hasher = CanonicalHasher::new(HashConfig::with_max_depth(3));
    assert!(hasher.hash(&arena, root).is_ok());
}

#[test]
fn resources_are_unsupported() {
    let mut arena = ValueArena::new();
    let socket = arena.resource("tcp 127.0.0.1:80");
    let root = arena.mapping([("conn", socket)]);

    assert_eq!(
        canonical_string(&arena, root),
        Err(HashError::Canon(CanonError::UnsupportedValueKind {
            kind: "resource"
        }))
    );
}

#[test]
fn malformed_callable_reports_location() {
    let mut arena = ValueArena::new();
    let f = arena.callable("function broken(a, {\n  return a;\n}");
    let root = arena.sequence([f]);

    let err = match canonical_hash(&arena, root, &DigestParams::new()) {
        Ok(digest) => panic!("expected a parse failure, got {digest}"),
        Err(err) => err,
    };
    assert!(matches!(
        err,
        HashError::Canon(CanonError::MalformedCallable(_))
    ));
    let message = err.to_string();
    assert!(message.starts_with("malformed callable: "), "{message}");
    assert!(message.ends_with("at 1:20"), "{message}");
}

#[test]
fn non_function_source_is_malformed() {
    let mut arena = ValueArena::new();
    for source in ["", "1 + 2", "function f() {} extra", "class A {}"] {
        let root = arena.callable(source);
        assert!(
            matches!(
                canonical_string(&arena, root),
                Err(HashError::Canon(CanonError::MalformedCallable(_)))
            ),
            "{source:?}"
        );
    }
}

#[test]
fn oversized_digest_parameters_are_rejected() {
    let mut arena = ValueArena::new();
    let root = arena.null();

    assert_eq!(
        canonical_hash(&arena, root, &DigestParams::new().with_key(vec![1; 65])),
        Err(HashError::InvalidDigestParameters {
            param: "key",
            len: 65,
            max: 64
        })
    );
    assert!(matches!(
        canonical_hash(&arena, root, &DigestParams::new().with_personal(vec![1; 17])),
        Err(HashError::InvalidDigestParameters { param: "personal", .. })
    ));
}
