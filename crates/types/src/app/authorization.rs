// Path: crates/types/src/app/authorization.rs

//! Proposals, votes and the outcomes of a gated submission.

use crate::app::identity::{sha256, Did, SignatureSuite};
use crate::error::{ErrorCode, GateError};
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// The domain tag prepended to every proposal preimage.
///
/// A signature over a proposal can never be mistaken for a signature over any
/// other message type that does not start with these bytes.
pub const PROPOSAL_DOMAIN: &[u8] = b"COUNCIL-MASTER-PROPOSAL/v1";

/// The gate's monotonic fencing counter.
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
#[serde(transparent)]
pub struct Round(pub u64);

impl Round {
    /// The round that follows this one, or `None` on overflow.
    pub fn next(self) -> Option<Round> {
        self.0.checked_add(1).map(Round)
    }

    /// The little-endian storage encoding.
    pub fn to_le_bytes(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    /// Parses the little-endian storage encoding.
    pub fn from_le_slice(bytes: &[u8]) -> Option<Round> {
        let arr: [u8; 8] = bytes.try_into().ok()?;
        Some(Round(u64::from_le_bytes(arr)))
    }
}

impl From<u64> for Round {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

impl core::fmt::Display for Round {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque, pre-encoded action that only the gate may forward to the engine.
#[derive(Serialize, Deserialize, Encode, Decode, Debug, Clone, PartialEq, Eq, Default)]
pub struct PrivilegedInstruction(pub Vec<u8>);

impl PrivilegedInstruction {
    /// The encoded instruction bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The encoded length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the instruction carries no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for PrivilegedInstruction {
    fn from(v: Vec<u8>) -> Self {
        Self(v)
    }
}

/// An instruction bound to the round it is meant to execute in.
#[derive(Serialize, Deserialize, Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    /// The privileged instruction being authorized.
    pub instruction: PrivilegedInstruction,
    /// The round the signers observed when signing.
    pub round: Round,
}

impl Proposal {
    /// Binds an instruction to a round.
    pub fn new(instruction: PrivilegedInstruction, round: Round) -> Self {
        Self { instruction, round }
    }

    /// Builds the canonical message every council member signs.
    ///
    /// Layout: `PROPOSAL_DOMAIN || chain_id (u32 LE) || SCALE(instruction bytes) || round (u64 LE)`.
    /// The SCALE encoding of the instruction carries a compact length prefix, so
    /// no two (instruction, round) pairs share a preimage.
    pub fn signing_bytes(&self, chain_id: u32) -> Vec<u8> {
        let mut preimage = PROPOSAL_DOMAIN.to_vec();
        preimage.extend_from_slice(&chain_id.to_le_bytes());
        self.instruction.0.encode_to(&mut preimage);
        preimage.extend_from_slice(&self.round.to_le_bytes());
        preimage
    }

    /// SHA-256 of the signing bytes, used to identify a proposal in logs.
    pub fn digest(&self, chain_id: u32) -> [u8; 32] {
        sha256(&self.signing_bytes(chain_id))
    }
}

/// One council member's signature over a proposal.
#[derive(Serialize, Deserialize, Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    /// The identity the vote is claimed to come from.
    pub voter: Did,
    /// The scheme the signature was produced with.
    pub suite: SignatureSuite,
    /// The raw signature bytes.
    pub signature: Vec<u8>,
}

impl Vote {
    /// Creates a vote.
    pub fn new(voter: Did, suite: SignatureSuite, signature: Vec<u8>) -> Self {
        Self {
            voter,
            suite,
            signature,
        }
    }
}

/// A validated set of votes for a single proposal.
///
/// Construction sorts the votes by `Did` and rejects duplicate identities, so
/// every downstream step sees the same canonical order regardless of the order
/// the caller collected the signatures in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteSet {
    votes: Vec<Vote>,
}

impl VoteSet {
    /// Canonicalizes and validates a sequence of votes.
    pub fn new(mut votes: Vec<Vote>) -> Result<Self, GateError> {
        votes.sort_by(|a, b| a.voter.cmp(&b.voter));
        for pair in votes.windows(2) {
            if let [a, b] = pair {
                if a.voter == b.voter {
                    return Err(GateError::DuplicateVoter(a.voter));
                }
            }
        }
        Ok(Self { votes })
    }

    /// The votes in strictly ascending `Did` order.
    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    /// The number of votes.
    pub fn len(&self) -> usize {
        self.votes.len()
    }

    /// Whether the set has no votes.
    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }
}

/// The per-vote result of verification. Only `Accepted` counts toward quorum.
#[derive(Serialize, Deserialize, Encode, Decode, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteVerdict {
    /// The signature verified against the voter's active key.
    Accepted,
    /// The registry has no active key for the voter.
    UnknownIdentity,
    /// The signature did not verify against the voter's active key.
    SignatureInvalid,
    /// The vote's scheme is not enabled on this gate.
    UnsupportedSuite,
    /// The voter is not on the council, whatever key the registry holds for it.
    NotAMember,
}

impl VoteVerdict {
    /// Whether this vote contributes to the quorum count.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// The verdict of one vote, in canonical order.
#[derive(Serialize, Deserialize, Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct TallyEntry {
    /// The claimed voter.
    pub voter: Did,
    /// What verification decided for this vote.
    pub verdict: VoteVerdict,
}

/// The verification report of a submission.
#[derive(Serialize, Deserialize, Encode, Decode, Debug, Clone, PartialEq, Eq, Default)]
pub struct Tally {
    /// One entry per vote in the canonical vote set.
    pub entries: Vec<TallyEntry>,
    /// The number of distinct identities whose vote was accepted.
    pub accepted: u32,
    /// The configured quorum threshold.
    pub required: u32,
}

impl Tally {
    /// Builds a report from per-vote verdicts.
    pub fn new(entries: Vec<TallyEntry>, required: u32) -> Self {
        let accepted = entries.iter().filter(|e| e.verdict.is_accepted()).count();
        Self {
            entries,
            accepted: u32::try_from(accepted).unwrap_or(u32::MAX),
            required,
        }
    }
}

/// Why a well-formed submission was not executed.
#[derive(Serialize, Deserialize, Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The proposal was signed for a round other than the current one.
    StaleRound {
        /// The sequencer's current round.
        expected: Round,
        /// The round the proposal was bound to.
        got: Round,
    },
    /// Fewer votes verified than the threshold requires.
    InsufficientQuorum {
        /// The number of accepted votes.
        accepted: u32,
        /// The configured threshold.
        required: u32,
    },
}

impl ErrorCode for Rejection {
    fn code(&self) -> &'static str {
        match self {
            Self::StaleRound { .. } => "GATE_STALE_ROUND",
            Self::InsufficientQuorum { .. } => "GATE_INSUFFICIENT_QUORUM",
        }
    }
}

impl core::fmt::Display for Rejection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::StaleRound { expected, got } => {
                write!(f, "stale round: expected {}, got {}", expected, got)
            }
            Self::InsufficientQuorum { accepted, required } => {
                write!(f, "insufficient quorum: {} of {} required", accepted, required)
            }
        }
    }
}

/// The decision for a structurally valid submission.
#[derive(Serialize, Deserialize, Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// The instruction was applied and the round advanced.
    Executed {
        /// The round the instruction executed in.
        round: Round,
        /// The round now current.
        next_round: Round,
        /// The verification report.
        tally: Tally,
    },
    /// Nothing was changed.
    Rejected {
        /// Why the submission was not executed.
        reason: Rejection,
        /// The verification report.
        tally: Tally,
    },
}

impl GateOutcome {
    /// Whether the instruction was applied.
    pub fn is_executed(&self) -> bool {
        matches!(self, Self::Executed { .. })
    }

    /// The rejection reason, if any.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Executed { .. } => None,
            Self::Rejected { reason, .. } => Some(reason),
        }
    }

    /// The verification report.
    pub fn tally(&self) -> &Tally {
        match self {
            Self::Executed { tally, .. } | Self::Rejected { tally, .. } => tally,
        }
    }
}

/// The SCALE parameters of the gate's `submit@v1` service method.
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct SubmitParams {
    /// The instruction to execute.
    pub instruction: PrivilegedInstruction,
    /// The round the votes were signed for.
    pub round: Round,
    /// The collected votes, in any order.
    pub votes: Vec<Vote>,
}
