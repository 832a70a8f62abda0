//! Hashing configuration.

use canonhash_canon::CanonConfig;
use tracing::warn;

/// Environment variable overriding the depth limit.
pub const MAX_DEPTH_ENV: &str = "CANONHASH_MAX_DEPTH";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HashConfig {
    pub canon: CanonConfig,
}

impl HashConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Config with a custom bound on nested containers.
    pub fn with_max_depth(max_depth: usize) -> Self {
        HashConfig {
            canon: CanonConfig::with_max_depth(max_depth),
        }
    }

    /// Defaults, overridden by `CANONHASH_MAX_DEPTH` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`Self::from_env`], reading variables through `lookup`.
    ///
    /// A value that is not a positive integer is ignored with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = lookup(MAX_DEPTH_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => config.canon.max_depth = depth,
                _ => warn!(
                    value = %raw,
                    default = config.canon.max_depth,
                    "ignoring invalid {MAX_DEPTH_ENV}"
                ),
            }
        }
        config
    }
}
