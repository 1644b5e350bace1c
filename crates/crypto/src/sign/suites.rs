// Path: crates/crypto/src/sign/suites.rs

//! Dispatch from a suite tag to the scheme that verifies it.

use crate::error::CryptoError;
use crate::sign::eddsa::Ed25519Verifier;
use crate::sign::secp256k1::Secp256k1Verifier;
use council_api::crypto::SchemeVerifier;
use council_types::app::SignatureSuite;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A table of enabled signature schemes keyed by suite tag.
#[derive(Clone, Default)]
pub struct SuiteRegistry {
    verifiers: BTreeMap<SignatureSuite, Arc<dyn SchemeVerifier>>,
}

impl fmt::Debug for SuiteRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.verifiers.keys()).finish()
    }
}

impl SuiteRegistry {
    /// A registry with no schemes enabled.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry with Ed25519 and secp256k1 enabled.
    pub fn with_default_suites() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(Ed25519Verifier));
        registry.register(Arc::new(Secp256k1Verifier));
        registry
    }

    /// Enables a scheme, replacing any verifier previously registered for its tag.
    pub fn register(&mut self, verifier: Arc<dyn SchemeVerifier>) {
        self.verifiers.insert(verifier.suite(), verifier);
    }

    /// A copy of this registry keeping only the listed suites.
    pub fn restricted_to(&self, allowed: &[SignatureSuite]) -> Self {
        let verifiers = self
            .verifiers
            .iter()
            .filter(|(suite, _)| allowed.contains(suite))
            .map(|(suite, v)| (*suite, Arc::clone(v)))
            .collect();
        Self { verifiers }
    }

    /// Whether `suite` is enabled.
    pub fn supports(&self, suite: SignatureSuite) -> bool {
        self.verifiers.contains_key(&suite)
    }

    /// The enabled suites in tag order.
    pub fn suites(&self) -> Vec<SignatureSuite> {
        self.verifiers.keys().copied().collect()
    }

    /// Verifies a single signature, distinguishing an unknown suite from a bad signature.
    pub fn verify(
        &self,
        suite: SignatureSuite,
        public_key: &[u8],
        message: &[u8],
        signature: &[u8],
    ) -> Result<(), CryptoError> {
        let verifier = self
            .verifiers
            .get(&suite)
            .ok_or_else(|| CryptoError::Unsupported(suite.to_string()))?;
        if verifier.verify(public_key, message, signature) {
            Ok(())
        } else {
            Err(CryptoError::VerificationFailed)
        }
    }
}
