// Path: crates/api/src/crypto/mod.rs
//! Defines unified traits for signature schemes.

use council_types::app::{SignatureSuite, VerificationKey};
use council_types::error::CryptoError;

/// The verification capability of a single signature scheme.
///
/// One implementation exists per suite tag; a verifier is selected by the tag a
/// vote declares, never by inspecting key or signature bytes.
pub trait SchemeVerifier: Send + Sync {
    /// The suite tag this verifier handles.
    fn suite(&self) -> SignatureSuite;

    /// Checks `signature` over `message` under `public_key`.
    ///
    /// Malformed keys or signatures verify as `false`; this is a predicate, not
    /// a parser.
    fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> bool;
}

/// A private key able to produce votes.
pub trait Signer: Send + Sync {
    /// The suite of the produced signatures.
    fn suite(&self) -> SignatureSuite;

    /// The scheme-tagged public key matching this signer.
    fn verification_key(&self) -> VerificationKey;

    /// Signs a message.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

/// A trait for parallelized batch signature verification.
pub trait BatchVerifier: Send + Sync {
    /// Whether votes tagged with `suite` can be verified at all.
    fn supports(&self, suite: SignatureSuite) -> bool;

    /// Verifies a batch of signatures.
    ///
    /// # Arguments
    /// * `items`: A slice of tuples containing (public_key, message, signature, suite).
    ///
    /// # Returns
    /// A vector of booleans indicating the validity of each item in the batch.
    /// The order corresponds to the input slice.
    fn verify_batch(
        &self,
        items: &[(&[u8], &[u8], &[u8], SignatureSuite)],
    ) -> Result<Vec<bool>, CryptoError>;
}
