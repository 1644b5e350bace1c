//! Deterministic council members for gate tests.

use crate::randomness::TestRng;
use council_api::crypto::Signer;
use council_crypto::sign::eddsa::Ed25519KeyPair;
use council_crypto::sign::secp256k1::Secp256k1KeyPair;
use council_types::app::{Did, VerificationKey, Vote};
use council_types::error::CryptoError;

/// A member identity together with the private key it currently votes with.
pub struct CouncilMember {
    did: Did,
    signer: Box<dyn Signer>,
}

impl std::fmt::Debug for CouncilMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CouncilMember")
            .field("did", &self.did)
            .field("suite", &self.signer.suite())
            .finish()
    }
}

impl CouncilMember {
    fn from_signer(signer: Box<dyn Signer>) -> Result<Self, CryptoError> {
        let did = signer.verification_key().did()?;
        Ok(Self { did, signer })
    }

    /// A member holding an Ed25519 key derived from `seed`.
    pub fn ed25519(seed: [u8; 32]) -> Result<Self, CryptoError> {
        Self::from_signer(Box::new(Ed25519KeyPair::from_seed(seed)?))
    }

    /// A member holding a secp256k1 key derived from `seed`.
    pub fn secp256k1(seed: [u8; 32]) -> Result<Self, CryptoError> {
        Self::from_signer(Box::new(Secp256k1KeyPair::from_seed(seed)?))
    }

    /// The member's identity, fixed at creation.
    pub fn did(&self) -> Did {
        self.did
    }

    /// The member's current verification key.
    pub fn key(&self) -> VerificationKey {
        self.signer.verification_key()
    }

    /// Signs arbitrary bytes with the current key.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.signer.sign(message)
    }

    /// A vote over `message` under the member's own identity.
    pub fn vote(&self, message: &[u8]) -> Result<Vote, CryptoError> {
        self.vote_as(self.did, message)
    }

    /// A vote over `message` signed with this member's key but claiming `voter`.
    pub fn vote_as(&self, voter: Did, message: &[u8]) -> Result<Vote, CryptoError> {
        Ok(Vote::new(voter, self.signer.suite(), self.sign(message)?))
    }

    /// Swaps in a new key while keeping the identity, as after a rotation.
    pub fn replace_signer(&mut self, signer: Box<dyn Signer>) {
        self.signer = signer;
    }
}

/// An ordered group of members, sorted by `Did`.
#[derive(Debug)]
pub struct Council {
    members: Vec<CouncilMember>,
}

impl Council {
    /// `n` Ed25519 members drawn from the default test seed.
    pub fn new_ed25519(n: usize) -> Result<Self, CryptoError> {
        Self::ed25519_from(&mut TestRng::default(), n)
    }

    /// `n` Ed25519 members drawn from `rng`.
    pub fn ed25519_from(rng: &mut TestRng, n: usize) -> Result<Self, CryptoError> {
        let members = (0..n)
            .map(|_| CouncilMember::ed25519(rng.key_seed()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_members(members))
    }

    /// Wraps existing members, sorting them by `Did`.
    pub fn from_members(mut members: Vec<CouncilMember>) -> Self {
        members.sort_by_key(|m| m.did());
        Self { members }
    }

    /// All members in ascending `Did` order.
    pub fn members(&self) -> &[CouncilMember] {
        &self.members
    }

    /// The member at `index`, if any.
    pub fn member(&self, index: usize) -> Option<&CouncilMember> {
        self.members.get(index)
    }

    /// Mutable access to the member at `index`, if any.
    pub fn member_mut(&mut self, index: usize) -> Option<&mut CouncilMember> {
        self.members.get_mut(index)
    }

    /// Every member's `Did`, in ascending order.
    pub fn dids(&self) -> Vec<Did> {
        self.members.iter().map(CouncilMember::did).collect()
    }

    /// The number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the council has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Votes over `message` from the members at `indices`, in the given order.
    pub fn votes(&self, message: &[u8], indices: &[usize]) -> Result<Vec<Vote>, CryptoError> {
        indices
            .iter()
            .filter_map(|i| self.members.get(*i))
            .map(|m| m.vote(message))
            .collect()
    }
}
