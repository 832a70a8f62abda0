//! Configured hashing entry point.

use canonhash_canon::serialize;
use canonhash_ir::{CanonicalNode, ValueArena, ValueId};
use tracing::debug;

use crate::{digest, Digest, DigestParams, HashConfig, HashError};

/// Canonicalizes, serializes and digests value graphs under one
/// configuration and one set of digest parameters.
///
/// Holds no state between calls; one hasher may be shared across threads.
#[derive(Clone, Debug, Default)]
pub struct CanonicalHasher {
    config: HashConfig,
    params: DigestParams,
}

impl CanonicalHasher {
    pub fn new(config: HashConfig) -> Self {
        CanonicalHasher {
            config,
            params: DigestParams::default(),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: DigestParams) -> Self {
        self.params = params;
        self
    }

    pub fn config(&self) -> &HashConfig {
        &self.config
    }

    pub fn params(&self) -> &DigestParams {
        &self.params
    }

    pub fn canonicalize(
        &self,
        arena: &ValueArena,
        root: ValueId,
    ) -> Result<CanonicalNode, HashError> {
        Ok(canonhash_canon::canonicalize(arena, root, &self.config.canon)?)
    }

    /// The exact text that [`Self::hash`] digests.
    pub fn canonical_string(&self, arena: &ValueArena, root: ValueId) -> Result<String, HashError> {
        let node = self.canonicalize(arena, root)?;
        Ok(serialize(&node))
    }

    pub fn hash(&self, arena: &ValueArena, root: ValueId) -> Result<Digest, HashError> {
        // Reject bad parameters before doing any graph work.
        self.params.validate()?;
        let text = self.canonical_string(arena, root)?;
        debug!(canonical_len = text.len(), "hashing canonical string");
        digest(text.as_bytes(), &self.params)
    }

    pub fn hash_hex(&self, arena: &ValueArena, root: ValueId) -> Result<String, HashError> {
        self.hash(arena, root).map(|digest| digest.to_hex())
    }
}
