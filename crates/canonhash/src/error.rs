//! Errors surfaced by the public API.

use canonhash_canon::CanonError;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HashError {
    #[error(transparent)]
    Canon(#[from] CanonError),

    #[error("digest {param} is {len} bytes, at most {max} are allowed")]
    InvalidDigestParameters {
        param: &'static str,
        len: usize,
        max: usize,
    },
}
