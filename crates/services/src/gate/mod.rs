// Path: crates/services/src/gate/mod.rs
//! The master gate: threshold authorization of privileged instructions.
//!
//! A submission goes through four stages. Structural checks (bounds, duplicate
//! voters) fail with a `GateError`. Key resolution and signature verification
//! happen under a read lock and never fail on a single bad vote. Only council
//! members' votes are looked up at all. The round check, quorum decision and
//! commit happen under the ledger's write lock, so of several submissions
//! racing on one round exactly one can execute. The voters' keys are resolved
//! again under that lock and the votes re-verified if a rotation landed in
//! between.

mod quorum;
mod round;
mod verifier;

pub use quorum::QuorumPolicy;
pub use round::RoundSequencer;
pub use verifier::SignatureVerifier;

use council_api::crypto::BatchVerifier;
use council_api::engine::InstructionEngine;
use council_api::identity::KeyResolver;
use council_api::state::{StateAccess, StateOverlay};
use council_telemetry::{error_metrics, gate_metrics, time::Timer};
use council_types::app::{
    Did, GateOutcome, PrivilegedInstruction, Proposal, Rejection, Round, SubmitParams, Tally,
    TallyEntry, VerificationKey, Vote, VoteSet, VoteVerdict,
};
use council_types::codec;
use council_types::config::GateConfig;
use council_types::error::{ConfigError, ErrorCode, GateError, TransactionError};
use parking_lot::RwLock;
use std::sync::Arc;

/// The threshold authorization gate in front of an `InstructionEngine`.
///
/// `S` is the ledger the gate's round and the engine's effects live in. The
/// ledger is shared through an `Arc<RwLock<S>>` handle so that callers can
/// query it after the fact.
pub struct MasterGate<S: StateAccess> {
    config: GateConfig,
    policy: QuorumPolicy,
    resolver: Arc<dyn KeyResolver>,
    verifier: SignatureVerifier,
    engine: Arc<dyn InstructionEngine>,
    ledger: Arc<RwLock<S>>,
}

impl<S: StateAccess> std::fmt::Debug for MasterGate<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterGate")
            .field("config", &self.config)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

fn verdict_label(verdict: VoteVerdict) -> &'static str {
    match verdict {
        VoteVerdict::Accepted => "accepted",
        VoteVerdict::UnknownIdentity => "unknown_identity",
        VoteVerdict::SignatureInvalid => "signature_invalid",
        VoteVerdict::UnsupportedSuite => "unsupported_suite",
        VoteVerdict::NotAMember => "not_a_member",
    }
}

fn rejection_label(rejection: &Rejection) -> &'static str {
    match rejection {
        Rejection::StaleRound { .. } => "stale_round",
        Rejection::InsufficientQuorum { .. } => "insufficient_quorum",
    }
}

impl<S: StateAccess> MasterGate<S> {
    /// Builds a gate from a validated configuration.
    pub fn new(
        config: GateConfig,
        resolver: Arc<dyn KeyResolver>,
        batch_verifier: Arc<dyn BatchVerifier>,
        engine: Arc<dyn InstructionEngine>,
        ledger: Arc<RwLock<S>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let policy = QuorumPolicy::new(config.threshold)?;
        let verifier = SignatureVerifier::new(batch_verifier, config.allowed_suites.clone());
        Ok(Self {
            config,
            policy,
            resolver,
            verifier,
            engine,
            ledger,
        })
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn policy(&self) -> QuorumPolicy {
        self.policy
    }

    /// The shared ledger handle.
    pub fn ledger(&self) -> &Arc<RwLock<S>> {
        &self.ledger
    }

    /// The round a new proposal must be bound to.
    pub fn current_round(&self) -> Result<Round, GateError> {
        let ledger = self.ledger.read();
        Ok(RoundSequencer::current(&*ledger)?)
    }

    /// The proposal for `instruction` at the current round, ready to be signed
    /// via `Proposal::signing_bytes`.
    pub fn proposal_for(&self, instruction: PrivilegedInstruction) -> Result<Proposal, GateError> {
        Ok(Proposal::new(instruction, self.current_round()?))
    }

    fn check_bounds(&self, instruction: &PrivilegedInstruction, votes: &[Vote]) -> Result<(), GateError> {
        if votes.len() > self.config.max_votes {
            return Err(GateError::TooManyVotes {
                got: votes.len(),
                max: self.config.max_votes,
            });
        }
        if instruction.len() > self.config.max_instruction_bytes {
            return Err(GateError::InstructionTooLarge {
                got: instruction.len(),
                max: self.config.max_instruction_bytes,
            });
        }
        Ok(())
    }

    /// Whether `did` sits on the council.
    pub fn is_member(&self, did: &Did) -> bool {
        self.config.members.contains(did)
    }

    /// The active key of every member in `vote_set`, in canonical order.
    /// Non-members resolve to `None` without a registry lookup.
    fn resolve_keys(
        &self,
        state: &dyn StateAccess,
        vote_set: &VoteSet,
    ) -> Result<Vec<Option<VerificationKey>>, GateError> {
        vote_set
            .votes()
            .iter()
            .map(|vote| {
                if self.is_member(&vote.voter) {
                    self.resolver.resolve_key(state, &vote.voter)
                } else {
                    Ok(None)
                }
            })
            .collect::<Result<_, _>>()
            .map_err(GateError::from)
    }

    fn tally(
        &self,
        message: &[u8],
        vote_set: &VoteSet,
        keys: &[Option<VerificationKey>],
    ) -> Result<Tally, GateError> {
        let verdicts = {
            let _timer = Timer::new(gate_metrics());
            self.verifier.verify_all(message, vote_set.votes(), keys)?
        };

        let entries: Vec<TallyEntry> = vote_set
            .votes()
            .iter()
            .zip(verdicts)
            .map(|(vote, verdict)| TallyEntry {
                voter: vote.voter,
                verdict: if self.is_member(&vote.voter) {
                    verdict
                } else {
                    VoteVerdict::NotAMember
                },
            })
            .collect();
        Ok(Tally::new(entries, self.policy.threshold()))
    }

    fn record_discards(&self, tally: &Tally) {
        for entry in tally.entries.iter().filter(|e| !e.verdict.is_accepted()) {
            log::debug!(
                "[MasterGate] Discarding vote from 0x{}: {:?}",
                entry.voter.short(),
                entry.verdict
            );
            gate_metrics().inc_discarded_votes(verdict_label(entry.verdict));
        }
    }

    /// Decides a submission and, if authorized, executes it.
    ///
    /// `round` is the round the votes were signed for. Structural problems are
    /// returned as `Err`; a valid but unauthorized submission is
    /// `Ok(GateOutcome::Rejected)`. Neither changes the ledger.
    pub fn submit(
        &self,
        instruction: PrivilegedInstruction,
        round: Round,
        votes: Vec<Vote>,
    ) -> Result<GateOutcome, GateError> {
        let result = self.submit_inner(instruction, round, votes);
        match &result {
            Ok(GateOutcome::Executed { .. }) => gate_metrics().inc_submissions("executed"),
            Ok(GateOutcome::Rejected { reason, .. }) => {
                gate_metrics().inc_submissions(rejection_label(reason))
            }
            Err(e) => error_metrics().inc_error("gate", e.code()),
        }
        result
    }

    fn submit_inner(
        &self,
        instruction: PrivilegedInstruction,
        round: Round,
        votes: Vec<Vote>,
    ) -> Result<GateOutcome, GateError> {
        self.check_bounds(&instruction, &votes)?;
        let vote_set = VoteSet::new(votes)?;

        let proposal = Proposal::new(instruction, round);
        let digest = hex::encode(proposal.digest(self.config.chain_id));
        let message = proposal.signing_bytes(self.config.chain_id);

        let keys = {
            let ledger = self.ledger.read();
            self.resolve_keys(&*ledger, &vote_set)?
        };
        let mut tally = self.tally(&message, &vote_set, &keys)?;

        let mut ledger = self.ledger.write();
        let committed_keys = self.resolve_keys(&*ledger, &vote_set)?;
        if committed_keys != keys {
            log::debug!(
                "[MasterGate] Voter keys changed during verification of {}, re-verifying",
                digest
            );
            tally = self.tally(&message, &vote_set, &committed_keys)?;
        }
        self.record_discards(&tally);
        let current = RoundSequencer::current(&*ledger)?;

        if proposal.round != current {
            let reason = Rejection::StaleRound {
                expected: current,
                got: proposal.round,
            };
            tracing::info!(
                target: "gate",
                proposal = %digest,
                accepted = tally.accepted,
                required = tally.required,
                "Rejected: {}",
                reason
            );
            return Ok(GateOutcome::Rejected { reason, tally });
        }

        if !self.policy.is_satisfied(tally.accepted) {
            let reason = Rejection::InsufficientQuorum {
                accepted: tally.accepted,
                required: tally.required,
            };
            tracing::info!(
                target: "gate",
                proposal = %digest,
                round = current.0,
                "Rejected: {}",
                reason
            );
            return Ok(GateOutcome::Rejected { reason, tally });
        }

        let (inserts, deletes) = {
            let mut overlay = StateOverlay::new(&*ledger);
            self.engine
                .apply(&mut overlay, &proposal.instruction)
                .map_err(|e| GateError::Engine(e.to_string()))?;
            RoundSequencer::advance(&mut overlay, current)?;
            overlay.into_ordered_batch()
        };
        ledger.batch_apply(&inserts, &deletes)?;
        let next_round = RoundSequencer::current(&*ledger)?;
        gate_metrics().set_current_round(next_round.0);

        tracing::info!(
            target: "gate",
            proposal = %digest,
            round = current.0,
            next_round = next_round.0,
            accepted = tally.accepted,
            required = tally.required,
            writes = inserts.len() + deletes.len(),
            "Executed privileged instruction"
        );
        Ok(GateOutcome::Executed {
            round: current,
            next_round,
            tally,
        })
    }

    /// Dispatches a SCALE-encoded service call. `submit@v1` takes
    /// `SubmitParams` and returns the SCALE-encoded `GateOutcome`.
    pub fn handle_service_call(
        &self,
        method: &str,
        params: &[u8],
    ) -> Result<Vec<u8>, TransactionError> {
        match method {
            "submit@v1" => {
                let p: SubmitParams =
                    codec::from_bytes_canonical(params).map_err(TransactionError::Deserialization)?;
                let outcome = self.submit(p.instruction, p.round, p.votes)?;
                codec::to_bytes_canonical(&outcome).map_err(TransactionError::Serialization)
            }
            "current_round@v1" => {
                let round = self.current_round()?;
                codec::to_bytes_canonical(&round).map_err(TransactionError::Serialization)
            }
            _ => Err(TransactionError::Unsupported(format!(
                "MasterGate does not support method '{}'",
                method
            ))),
        }
    }
}

#[cfg(test)]
mod tests;
