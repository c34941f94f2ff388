//! Signed event envelopes (§4.L): every server-authored event carries a
//! kind, author pubkey, monotonic timestamp, tag set, opaque payload,
//! and a signature over the canonical event hash.

use std::collections::BTreeMap;

use ed25519_dalek::{Signature, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};

use ec4x_common::canonical::{canonical_bytes, hash_bytes};
use ec4x_common::errors::CoreError;

/// Opaque relay-level event kind identifiers (§6).
pub const KIND_GAME_DEFINITION: u32 = 1;
pub const KIND_SLOT_CLAIM: u32 = 2;
pub const KIND_FULL_STATE: u32 = 3;
pub const KIND_DELTA: u32 = 4;
pub const KIND_COMMAND_SUBMIT: u32 = 5;
pub const KIND_MESSAGE: u32 = 6;
pub const KIND_JOIN_ERROR: u32 = 7;

/// The unsigned content of an event, hashed and signed as one unit
/// (§4.L).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventBody {
    pub kind: u32,
    pub author: [u8; 32],
    pub created_at: u64,
    pub tags: BTreeMap<String, String>,
    pub payload: Vec<u8>,
}

/// A signed event: body plus signature over `hash_bytes(canonical(body))`
/// (§4.L).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedEvent {
    pub body: EventBody,
    #[serde(with = "signature_bytes")]
    pub signature: [u8; 64],
}

/// (De)serializes a 64-byte array as a sequence, since serde's derive
/// only supports native array impls up to 32 elements.
mod signature_bytes {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &[u8; 64], serializer: S) -> Result<S::Ok, S::Error> {
        value.as_slice().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 64], D::Error> {
        let bytes: Vec<u8> = Vec::deserialize(deserializer)?;
        <[u8; 64]>::try_from(bytes.as_slice())
            .map_err(|_| serde::de::Error::custom("expected 64-byte signature"))
    }
}

impl SignedEvent {
    /// Sign `body` with `signing_key`, producing a verifiable envelope.
    pub fn sign(body: EventBody, signing_key: &SigningKey) -> Result<Self, CoreError> {
        let digest = event_hash(&body)?;
        let signature = ed25519_dalek::Signer::sign(signing_key, &digest);
        Ok(Self {
            body,
            signature: signature.to_bytes(),
        })
    }

    /// Verify the signature against the declared author's public key.
    /// The caller is responsible for checking that `body.author` matches
    /// a trusted pubkey (e.g. the game's daemon key) before calling this
    /// (§4.L: "clients trust only the author matching the game's daemon
    /// pubkey").
    pub fn verify(&self) -> Result<bool, CoreError> {
        let verifying_key = VerifyingKey::from_bytes(&self.body.author)
            .map_err(|e| CoreError::Serialization(e.to_string()))?;
        let digest = event_hash(&self.body)?;
        let signature = Signature::from_bytes(&self.signature);
        Ok(verifying_key.verify(&digest, &signature).is_ok())
    }
}

fn event_hash(body: &EventBody) -> Result<[u8; 32], CoreError> {
    let bytes = canonical_bytes(body)?;
    Ok(hash_bytes(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    fn sample_body(author: [u8; 32]) -> EventBody {
        EventBody {
            kind: KIND_MESSAGE,
            author,
            created_at: 100,
            tags: BTreeMap::new(),
            payload: b"hello".to_vec(),
        }
    }

    #[test]
    fn sign_then_verify_succeeds() {
        let signing_key = SigningKey::generate(&mut OsRng);
        let author = signing_key.verifying_key().to_bytes();
        let event = SignedEvent::sign(sample_body(author), &signing_key).unwrap();
        assert!(event.verify().unwrap());
    }

    #[test]
    fn tampered_payload_fails_verification() {
        let signing_key = SigningKey::generate(&mut OsRng);
        let author = signing_key.verifying_key().to_bytes();
        let mut event = SignedEvent::sign(sample_body(author), &signing_key).unwrap();
        event.body.payload = b"tampered".to_vec();
        assert!(!event.verify().unwrap());
    }
}
