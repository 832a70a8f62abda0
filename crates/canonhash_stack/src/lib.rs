//! Stack growth guard for recursive passes.
//!
//! The graph walk in `canonhash_canon` is iterative, but three passes still
//! recurse over trees whose depth is controlled by the caller: the callable
//! parser, the stable serializer and the structural AST renderer. Each of
//! them wraps its recursive step in [`ensure_sufficient_stack`] so that a
//! legitimately deep input (bounded by the configured depth limit) cannot
//! overflow the thread's stack.
//!
//! On native targets the stack is grown on demand with `stacker`; on
//! `wasm32` the closure is called directly.

/// Grow when less than this much stack remains (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const STACK_SEGMENT: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if the remaining space is below the red zone.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, f)
}

/// `wasm32` manages its own stack; call `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
