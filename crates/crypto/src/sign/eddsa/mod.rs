// Path: crates/crypto/src/sign/eddsa/mod.rs
//! Ed25519 signing and verification on top of libp2p's identity keys.

use crate::error::CryptoError;
use council_api::crypto::{SchemeVerifier, Signer};
use council_types::app::{SignatureSuite, VerificationKey};
use libp2p::identity::{ed25519, PublicKey as Libp2pPublicKey};

/// The length of a raw Ed25519 public key.
pub const ED25519_PUBLIC_KEY_LEN: usize = 32;

/// Ed25519 key pair implementation
#[derive(Clone)]
pub struct Ed25519KeyPair(ed25519::Keypair);

impl Ed25519KeyPair {
    /// Creates a key pair from a 32-byte secret seed.
    pub fn from_seed(seed: [u8; 32]) -> Result<Self, CryptoError> {
        let secret = ed25519::SecretKey::try_from_bytes(seed)
            .map_err(|e| CryptoError::InvalidKey(format!("Failed to parse secret key: {}", e)))?;
        Ok(Self(ed25519::Keypair::from(secret)))
    }

    /// The raw 32-byte public key.
    pub fn public_key_bytes(&self) -> [u8; ED25519_PUBLIC_KEY_LEN] {
        self.0.public().to_bytes()
    }

    /// The public key in libp2p's protobuf encoding.
    pub fn public_key_protobuf(&self) -> Vec<u8> {
        Libp2pPublicKey::from(self.0.public()).encode_protobuf()
    }
}

impl Signer for Ed25519KeyPair {
    fn suite(&self) -> SignatureSuite {
        SignatureSuite::ED25519
    }

    fn verification_key(&self) -> VerificationKey {
        VerificationKey::new(SignatureSuite::ED25519, self.public_key_bytes().to_vec())
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        Ok(self.0.sign(message))
    }
}

/// Verifies Ed25519 signatures.
///
/// Accepts raw 32-byte keys and libp2p protobuf-encoded keys. A protobuf key of
/// any other type never verifies here, whatever its signature.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ed25519Verifier;

impl SchemeVerifier for Ed25519Verifier {
    fn suite(&self) -> SignatureSuite {
        SignatureSuite::ED25519
    }

    fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
        if public_key.len() == ED25519_PUBLIC_KEY_LEN {
            return ed25519::PublicKey::try_from_bytes(public_key)
                .map(|pk| pk.verify(message, signature))
                .unwrap_or(false);
        }
        match Libp2pPublicKey::try_decode_protobuf(public_key) {
            Ok(pk) => pk
                .try_into_ed25519()
                .map(|pk| pk.verify(message, signature))
                .unwrap_or(false),
            Err(e) => {
                log::debug!("[Ed25519] undecodable public key: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests;
