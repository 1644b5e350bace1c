// Path: crates/crypto/src/sign/secp256k1/mod.rs
//! ECDSA over secp256k1 (SHA-256 prehash, DER signatures).

use crate::error::CryptoError;
use council_api::crypto::{SchemeVerifier, Signer};
use council_types::app::{SignatureSuite, VerificationKey};
use libp2p::identity::secp256k1;

/// The length of a compressed SEC1 public key.
pub const SECP256K1_PUBLIC_KEY_LEN: usize = 33;

/// secp256k1 key pair implementation
#[derive(Clone)]
pub struct Secp256k1KeyPair(secp256k1::Keypair);

impl Secp256k1KeyPair {
    /// Creates a key pair from a 32-byte secret scalar.
    pub fn from_seed(seed: [u8; 32]) -> Result<Self, CryptoError> {
        let secret = secp256k1::SecretKey::try_from_bytes(seed)
            .map_err(|e| CryptoError::InvalidKey(format!("Failed to parse secret key: {}", e)))?;
        Ok(Self(secp256k1::Keypair::from(secret)))
    }

    /// The compressed 33-byte public key.
    pub fn public_key_bytes(&self) -> [u8; SECP256K1_PUBLIC_KEY_LEN] {
        self.0.public().to_bytes()
    }
}

impl Signer for Secp256k1KeyPair {
    fn suite(&self) -> SignatureSuite {
        SignatureSuite::SECP256K1
    }

    fn verification_key(&self) -> VerificationKey {
        VerificationKey::new(SignatureSuite::SECP256K1, self.public_key_bytes().to_vec())
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        Ok(self.0.secret().sign(message))
    }
}

/// Verifies DER-encoded ECDSA signatures under compressed secp256k1 keys.
#[derive(Debug, Default, Clone, Copy)]
pub struct Secp256k1Verifier;

impl SchemeVerifier for Secp256k1Verifier {
    fn suite(&self) -> SignatureSuite {
        SignatureSuite::SECP256K1
    }

    fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
        match secp256k1::PublicKey::try_from_bytes(public_key) {
            Ok(pk) => pk.verify(message, signature),
            Err(e) => {
                log::debug!("[Secp256k1] undecodable public key: {}", e);
                false
            }
        }
    }
}
