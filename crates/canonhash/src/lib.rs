//! Deterministic keyed hashing of in-memory value graphs.
//!
//! A value graph (mappings, sequences, scalars, callables, possibly cyclic)
//! is canonicalized into an order-independent tree, rendered to a stable
//! string and digested with keyed BLAKE2b-512:
//!
//! - mapping key order never affects the hash
//! - cycles hash by their shape, not by where they were entered
//! - callables hash by the structure of their source, ignoring layout and
//!   comments, together with any properties attached to them
//!
//! ```
//! use canonhash::{canonical_hash, DigestParams, ValueArena};
//!
//! let mut arena = ValueArena::new();
//! let one = arena.number(1.0);
//! let two = arena.number(2.0);
//! let a = arena.mapping([("x", one), ("y", two)]);
//! let b = arena.mapping([("y", two), ("x", one)]);
//!
//! let params = DigestParams::new().with_personal(*b"my-app");
//! assert_eq!(
//!     canonical_hash(&arena, a, &params)?,
//!     canonical_hash(&arena, b, &params)?,
//! );
//! # Ok::<(), canonhash::HashError>(())
//! ```

mod config;
mod digest;
mod error;
mod hasher;

use std::sync::Once;

pub use canonhash_canon::{serialize, CanonConfig, CanonError, DEFAULT_MAX_DEPTH};
pub use canonhash_ir::{
    Callable, CanonicalMap, CanonicalNode, Mapping, StructuralAst, ValueArena, ValueError,
    ValueId, ValueKind,
};
pub use config::{HashConfig, MAX_DEPTH_ENV};
pub use digest::{digest, Digest, DigestParams, DIGEST_LEN, KEY_MAX, PERSONAL_MAX, SALT_MAX};
pub use error::HashError;
pub use hasher::CanonicalHasher;

/// Digest of the graph rooted at `root`.
pub fn canonical_hash(
    arena: &ValueArena,
    root: ValueId,
    params: &DigestParams,
) -> Result<Digest, HashError> {
    params.validate()?;
    let text = canonical_string(arena, root)?;
    digest(text.as_bytes(), params)
}

/// [`canonical_hash`] as lowercase hex.
pub fn canonical_hash_hex(
    arena: &ValueArena,
    root: ValueId,
    params: &DigestParams,
) -> Result<String, HashError> {
    canonical_hash(arena, root, params).map(|digest| digest.to_hex())
}

/// Canonical tree of the graph rooted at `root`, with default limits.
pub fn canonicalize(arena: &ValueArena, root: ValueId) -> Result<CanonicalNode, HashError> {
    CanonicalHasher::default().canonicalize(arena, root)
}

/// Canonical string of the graph rooted at `root`, with default limits.
pub fn canonical_string(arena: &ValueArena, root: ValueId) -> Result<String, HashError> {
    CanonicalHasher::default().canonical_string(arena, root)
}

/// Digest of an already canonical tree.
pub fn hash_canonical(node: &CanonicalNode, params: &DigestParams) -> Result<Digest, HashError> {
    digest(serialize(node).as_bytes(), params)
}

static TRACING_INIT: Once = Once::new();

/// Initialize a tracing subscriber for debugging.
///
/// Safe to call multiple times; only the first call has an effect.
/// Enable with `RUST_LOG=canonhash=debug` or `RUST_LOG=canonhash_canon=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
