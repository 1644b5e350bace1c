// Path: crates/services/src/gate/verifier.rs
//! Per-vote signature checks against the voters' active keys.

use council_api::crypto::BatchVerifier;
use council_types::app::{SignatureSuite, VerificationKey, Vote, VoteVerdict};
use council_types::error::CryptoError;
use std::sync::Arc;

/// Decides, for every vote in a set, whether it counts toward quorum.
///
/// A vote never fails the batch: an unknown identity, a disabled suite, a key
/// of another scheme or a bad signature only produce a discarding verdict.
#[derive(Clone)]
pub struct SignatureVerifier {
    batch: Arc<dyn BatchVerifier>,
    allowed_suites: Vec<SignatureSuite>,
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("allowed_suites", &self.allowed_suites)
            .finish_non_exhaustive()
    }
}

impl SignatureVerifier {
    pub fn new(batch: Arc<dyn BatchVerifier>, allowed_suites: Vec<SignatureSuite>) -> Self {
        Self {
            batch,
            allowed_suites,
        }
    }

    fn enabled(&self, suite: SignatureSuite) -> bool {
        self.allowed_suites.contains(&suite) && self.batch.supports(suite)
    }

    /// The verdict that can be reached without touching the signature, if any.
    fn pre_verdict(&self, vote: &Vote, key: Option<&VerificationKey>) -> Option<VoteVerdict> {
        let Some(key) = key else {
            return Some(VoteVerdict::UnknownIdentity);
        };
        if !self.enabled(vote.suite) {
            return Some(VoteVerdict::UnsupportedSuite);
        }
        // The vote must use the scheme of the voter's active key; a signature
        // under any other scheme cannot be bound to this identity.
        if key.suite != vote.suite {
            return Some(VoteVerdict::SignatureInvalid);
        }
        None
    }

    /// Checks a single vote over `message` against the voter's active key.
    pub fn verify(
        &self,
        vote: &Vote,
        message: &[u8],
        key: Option<&VerificationKey>,
    ) -> Result<VoteVerdict, CryptoError> {
        let keys = [key.cloned()];
        let verdicts = self.verify_all(message, std::slice::from_ref(vote), &keys)?;
        Ok(verdicts
            .into_iter()
            .next()
            .unwrap_or(VoteVerdict::SignatureInvalid))
    }

    /// Checks every vote over `message`; `keys` holds each voter's resolved key
    /// at the same index. The returned verdicts follow the order of `votes`.
    ///
    /// Signatures that survive the cheap checks are verified in one parallel batch.
    pub fn verify_all(
        &self,
        message: &[u8],
        votes: &[Vote],
        keys: &[Option<VerificationKey>],
    ) -> Result<Vec<VoteVerdict>, CryptoError> {
        let mut verdicts: Vec<Option<VoteVerdict>> = votes
            .iter()
            .enumerate()
            .map(|(i, vote)| self.pre_verdict(vote, keys.get(i).and_then(Option::as_ref)))
            .collect();

        let mut pending = Vec::new();
        let mut items: Vec<(&[u8], &[u8], &[u8], SignatureSuite)> = Vec::new();
        for (i, (vote, key)) in votes.iter().zip(keys).enumerate() {
            if let (None, Some(key)) = (verdicts.get(i).copied().flatten(), key) {
                pending.push(i);
                items.push((
                    key.public_key.as_slice(),
                    message,
                    vote.signature.as_slice(),
                    vote.suite,
                ));
            }
        }

        if !items.is_empty() {
            let results = self.batch.verify_batch(&items)?;
            if results.len() != items.len() {
                return Err(CryptoError::OperationFailed(format!(
                    "batch verifier returned {} results for {} items",
                    results.len(),
                    items.len()
                )));
            }
            for (i, ok) in pending.into_iter().zip(results) {
                if let Some(slot) = verdicts.get_mut(i) {
                    *slot = Some(if ok {
                        VoteVerdict::Accepted
                    } else {
                        VoteVerdict::SignatureInvalid
                    });
                }
            }
        }

        Ok(verdicts
            .into_iter()
            .map(|v| v.unwrap_or(VoteVerdict::SignatureInvalid))
            .collect())
    }
}
