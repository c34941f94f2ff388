//! Canonical, byte-stable encoding (§4.L). `bcs` already gives us
//! length-prefixed, unambiguous encoding with a fixed little-endian
//! integer representation and preserves map insertion order, so callers
//! that need sorted-key determinism (e.g. the config content hash) are
//! expected to build their maps as `BTreeMap` before encoding — `bcs`
//! then emits them in sorted key order for free.

use serde::Serialize;
use sha3::{Digest, Sha3_256};

use crate::errors::CoreError;

/// Encode a value into the canonical byte representation used for
/// hashing, signing, and wire transmission.
pub fn canonical_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, CoreError> {
    bcs::to_bytes(value).map_err(|e| CoreError::Serialization(e.to_string()))
}

/// SHA3-256 over the canonical bytes of a value.
pub fn content_hash<T: Serialize>(value: &T) -> Result<[u8; 32], CoreError> {
    let bytes = canonical_bytes(value)?;
    Ok(hash_bytes(&bytes))
}

/// SHA3-256 over raw bytes, used to compute the event hash that gets
/// signed in the wire protocol (§4.L).
pub fn hash_bytes(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}
