//! Canonicalization limits.

/// Default bound on nested containers.
pub const DEFAULT_MAX_DEPTH: usize = 4096;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CanonConfig {
    /// Maximum number of containers open at once along any path from the
    /// root. Entering one more fails with `DepthExceeded`.
    pub max_depth: usize,
}

impl Default for CanonConfig {
    fn default() -> Self {
        CanonConfig {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CanonConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Config with a custom depth limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        CanonConfig { max_depth }
    }
}
