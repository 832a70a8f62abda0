//! Canonicalization errors.

use canonhash_parse::ParseError;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CanonError {
    /// A callable's source is not a single well-formed function.
    #[error("malformed callable: {0}")]
    MalformedCallable(#[from] ParseError),

    #[error("value graph nests more than {limit} containers")]
    DepthExceeded { limit: usize },

    #[error("cannot hash a value of kind `{kind}`")]
    UnsupportedValueKind { kind: &'static str },
}
