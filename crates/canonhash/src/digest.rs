//! BLAKE2b-512 digest, keyed when a key is given (RFC 7693).

use std::fmt;

use blake2::digest::core_api::{Block, Buffer, UpdateCore, VariableOutputCore};
use blake2::digest::Output;
use blake2::Blake2bVarCore;
use tracing::debug;

use crate::HashError;

/// Digest size in bytes.
pub const DIGEST_LEN: usize = 64;
/// Longest accepted key.
pub const KEY_MAX: usize = 64;
/// Longest accepted salt.
pub const SALT_MAX: usize = 16;
/// Longest accepted personalization string.
pub const PERSONAL_MAX: usize = 16;

/// Key, salt and personalization for the digest. All default to empty.
///
/// Different parameters separate hash domains: the same value hashed under
/// two parameter sets yields unrelated digests.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DigestParams {
    key: Vec<u8>,
    salt: Vec<u8>,
    personal: Vec<u8>,
}

impl DigestParams {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.key = key.into();
        self
    }

    #[must_use]
    pub fn with_salt(mut self, salt: impl Into<Vec<u8>>) -> Self {
        self.salt = salt.into();
        self
    }

    #[must_use]
    pub fn with_personal(mut self, personal: impl Into<Vec<u8>>) -> Self {
        self.personal = personal.into();
        self
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn personal(&self) -> &[u8] {
        &self.personal
    }

    /// Check every parameter against its BLAKE2b length limit.
    pub fn validate(&self) -> Result<(), HashError> {
        for (param, len, max) in [
            ("key", self.key.len(), KEY_MAX),
            ("salt", self.salt.len(), SALT_MAX),
            ("personal", self.personal.len(), PERSONAL_MAX),
        ] {
            if len > max {
                return Err(HashError::InvalidDigestParameters { param, len, max });
            }
        }
        Ok(())
    }
}

// Lengths only; key material stays out of logs and panic messages.
impl fmt::Debug for DigestParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigestParams")
            .field("key_len", &self.key.len())
            .field("salt_len", &self.salt.len())
            .field("personal_len", &self.personal.len())
            .finish()
    }
}

/// A 64-byte digest.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lowercase hex, 128 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl From<Digest> for [u8; DIGEST_LEN] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

/// BLAKE2b-512 of `bytes` under `params`.
///
/// An empty key means the plain unkeyed hash: no key block is fed to the
/// compression function, so `digest(b"abc", &DigestParams::new())` is the
/// RFC 7693 BLAKE2b-512 of `"abc"`. A non-empty key is zero-padded to one
/// block and processed before the input.
pub fn digest(bytes: &[u8], params: &DigestParams) -> Result<Digest, HashError> {
    params.validate()?;
    debug!(
        input_len = bytes.len(),
        key_len = params.key.len(),
        salt_len = params.salt.len(),
        personal_len = params.personal.len(),
        "computing digest"
    );

    // Limits were checked by `validate`, so the parameter block cannot panic.
    let mut core = Blake2bVarCore::new_with_params(
        &params.salt,
        &params.personal,
        params.key.len(),
        DIGEST_LEN,
    );
    let mut buffer = Buffer::<Blake2bVarCore>::default();
    if !params.key.is_empty() {
        let mut key_block = Block::<Blake2bVarCore>::default();
        key_block[..params.key.len()].copy_from_slice(&params.key);
        buffer.digest_blocks(&key_block, |blocks| core.update_blocks(blocks));
    }
    buffer.digest_blocks(bytes, |blocks| core.update_blocks(blocks));

    let mut full = Output::<Blake2bVarCore>::default();
    core.finalize_variable_core(&mut buffer, &mut full);
    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(&full);
    Ok(Digest(out))
}
