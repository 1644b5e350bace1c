// Path: crates/types/src/app/identity.rs

//! Defines the canonical `Did` and the single, deterministic function used to
//! derive one from a cryptographic public key.
//!
//! A `Did` is opaque to the gate: it is only ever compared, ordered and used to
//! look up the member's currently active key in an external registry.

use crate::error::CryptoError;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A fixed-length, 32-byte decentralized identifier for a council member.
///
/// The identifier remains constant when the member's keys are rotated. Ordering
/// is unsigned byte-wise lexicographic over the 32 bytes, which is the canonical
/// order used for vote sets.
#[derive(
    Encode,
    Decode,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Debug,
    Default,
    Hash,
)]
pub struct Did(pub [u8; 32]);

impl AsRef<[u8]> for Did {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Did {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl core::fmt::Display for Did {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "did:council:{}", hex::encode(self.0))
    }
}

impl Did {
    /// A short hex prefix for log lines.
    pub fn short(&self) -> String {
        hex::encode(self.0.get(..4).unwrap_or_default())
    }
}

/// Identifies the signature algorithm of a key or a vote.
///
/// This is an open `i32` tag taken from the IANA COSE Algorithms Registry rather
/// than a closed enum, so new schemes can be registered with the verifier
/// without changing the wire format of votes.
#[derive(
    Encode,
    Decode,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    Default,
)]
#[serde(transparent)]
pub struct SignatureSuite(pub i32);

impl SignatureSuite {
    /// Ed25519 (Pure). IANA COSE ID: -8.
    pub const ED25519: Self = Self(-8);

    /// ECDSA over secp256k1 with SHA-256. IANA COSE ID: -47.
    pub const SECP256K1: Self = Self(-47);

    /// A human-readable name for logging.
    pub fn name(&self) -> &'static str {
        match *self {
            Self::ED25519 => "ed25519",
            Self::SECP256K1 => "secp256k1",
            _ => "unknown",
        }
    }
}

impl core::fmt::Display for SignatureSuite {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}({})", self.name(), self.0)
    }
}

/// A scheme-tagged public key, as resolved from the identity registry.
#[derive(Serialize, Deserialize, Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct VerificationKey {
    /// The algorithm this key verifies under.
    pub suite: SignatureSuite,
    /// The raw public key bytes in the suite's canonical encoding.
    pub public_key: Vec<u8>,
}

impl VerificationKey {
    /// Creates a new scheme-tagged key.
    pub fn new(suite: SignatureSuite, public_key: Vec<u8>) -> Self {
        Self { suite, public_key }
    }

    /// Derives the `Did` this key would be registered under.
    pub fn did(&self) -> Result<Did, CryptoError> {
        did_from_key_material(self.suite, &self.public_key)
    }
}

/// A proof that the holder of a member's active key authorizes a move to a new key.
///
/// Both the old and the new key sign the same rotation challenge, which binds the
/// chain id, the member's `Did` and the member's rotation nonce.
#[derive(Serialize, Deserialize, Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct RotationProof {
    /// The key that will become active.
    pub new_key: VerificationKey,
    /// The signature over the challenge made with the currently active key.
    pub old_signature: Vec<u8>,
    /// The signature over the challenge made with the new key.
    pub new_signature: Vec<u8>,
}

const DID_DOMAIN: &[u8] = b"COUNCIL-DID::V1";

/// Derives a canonical, deterministic `Did` from a public key's raw material.
///
/// The preimage is domain separated and includes the suite tag, so the same key
/// bytes under two suites yield two different identities. Ed25519 keys given in
/// libp2p protobuf form are reduced to their raw 32 bytes first.
pub fn did_from_key_material(suite: SignatureSuite, public_key: &[u8]) -> Result<Did, CryptoError> {
    let mut preimage = DID_DOMAIN.to_vec();
    preimage.extend_from_slice(&suite.0.to_be_bytes());

    if suite == SignatureSuite::ED25519 {
        let raw_key = if public_key.len() == 32 {
            public_key.to_vec()
        } else if let Ok(pk) = libp2p::identity::PublicKey::try_decode_protobuf(public_key) {
            pk.try_into_ed25519()
                .map_err(|_| CryptoError::InvalidKey("not an Ed25519 libp2p key".into()))?
                .to_bytes()
                .to_vec()
        } else {
            return Err(CryptoError::InvalidKey("malformed Ed25519 public key".into()));
        };
        preimage.extend_from_slice(&raw_key);
    } else {
        preimage.extend_from_slice(public_key);
    }

    Ok(Did(sha256(&preimage)))
}

/// SHA-256 over `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}
