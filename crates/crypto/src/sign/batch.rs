// Path: crates/crypto/src/sign/batch.rs

use crate::error::CryptoError;
use crate::sign::suites::SuiteRegistry;
use council_api::crypto::BatchVerifier;
use council_types::app::SignatureSuite;
use rayon::prelude::*;

/// A CPU-based batch verifier that uses Rayon for parallelism.
///
/// Each item is an independent, side-effect-free check, so the batch is spread
/// across the thread pool and results are collected back in input order.
#[derive(Debug, Clone)]
pub struct CpuBatchVerifier {
    suites: SuiteRegistry,
}

impl Default for CpuBatchVerifier {
    fn default() -> Self {
        Self::new(SuiteRegistry::with_default_suites())
    }
}

impl CpuBatchVerifier {
    pub fn new(suites: SuiteRegistry) -> Self {
        Self { suites }
    }

    pub fn suites(&self) -> &SuiteRegistry {
        &self.suites
    }
}

impl BatchVerifier for CpuBatchVerifier {
    fn supports(&self, suite: SignatureSuite) -> bool {
        self.suites.supports(suite)
    }

    fn verify_batch(
        &self,
        items: &[(&[u8], &[u8], &[u8], SignatureSuite)],
    ) -> Result<Vec<bool>, CryptoError> {
        let results: Vec<bool> = items
            .par_iter()
            .map(|(pk, msg, sig, suite)| self.suites.verify(*suite, pk, msg, sig).is_ok())
            .collect();
        Ok(results)
    }
}
