// Path: crates/services/src/gate/tests/mod.rs
use super::*;
use council_api::state::MemoryState;
use council_crypto::sign::batch::CpuBatchVerifier;
use council_test_utils::{assert_executed, assert_rejected, Council};
use council_types::app::Did;
use council_types::keys::GATE_ROUND_KEY;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A fixed registry snapshot, independent of the ledger.
#[derive(Default)]
struct StaticResolver(BTreeMap<Did, VerificationKey>);

impl KeyResolver for StaticResolver {
    fn resolve_key(
        &self,
        _state: &dyn StateAccess,
        did: &Did,
    ) -> Result<Option<VerificationKey>, council_types::error::StateError> {
        Ok(self.0.get(did).cloned())
    }
}

/// Writes a counter so every execution is observable in the ledger.
#[derive(Default)]
struct CountingEngine {
    calls: AtomicUsize,
}

impl InstructionEngine for CountingEngine {
    fn apply(
        &self,
        state: &mut dyn StateAccess,
        instruction: &PrivilegedInstruction,
    ) -> Result<(), TransactionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        state.insert(b"last", instruction.as_bytes())?;
        Ok(())
    }
}

struct FailingEngine;

impl InstructionEngine for FailingEngine {
    fn apply(
        &self,
        state: &mut dyn StateAccess,
        _instruction: &PrivilegedInstruction,
    ) -> Result<(), TransactionError> {
        state.insert(b"partial", b"write")?;
        Err(TransactionError::Invalid("engine refused".into()))
    }
}

struct Fixture {
    council: Council,
    gate: MasterGate<MemoryState>,
    engine: Arc<CountingEngine>,
}

fn fixture(members: usize, threshold: u32) -> Fixture {
    let council = Council::new_ed25519(members).unwrap();
    let resolver = StaticResolver(
        council
            .members()
            .iter()
            .map(|m| (m.did(), m.key()))
            .collect(),
    );
    let engine = Arc::new(CountingEngine::default());
    let gate = MasterGate::new(
        GateConfig::new(council.dids(), threshold),
        Arc::new(resolver),
        Arc::new(CpuBatchVerifier::default()),
        engine.clone(),
        Arc::new(RwLock::new(MemoryState::new())),
    )
    .unwrap();
    Fixture {
        council,
        gate,
        engine,
    }
}

fn ix(bytes: &[u8]) -> PrivilegedInstruction {
    PrivilegedInstruction(bytes.to_vec())
}

fn signed_votes(f: &Fixture, instruction: &PrivilegedInstruction, indices: &[usize]) -> Vec<Vote> {
    let proposal = f.gate.proposal_for(instruction.clone()).unwrap();
    let message = proposal.signing_bytes(f.gate.config().chain_id);
    f.council.votes(&message, indices).unwrap()
}

#[test]
fn quorum_executes_and_advances_round() {
    let f = fixture(3, 2);
    let instruction = ix(b"set-fee");
    let votes = signed_votes(&f, &instruction, &[0, 2]);

    let outcome = f.gate.submit(instruction, Round(0), votes).unwrap();
    let (round, next_round, tally) = assert_executed!(outcome);
    assert_eq!((round, next_round), (Round(0), Round(1)));
    assert_eq!((tally.accepted, tally.required), (2, 2));
    assert_eq!(f.gate.current_round().unwrap(), Round(1));
    assert_eq!(f.engine.calls.load(Ordering::SeqCst), 1);
    assert_eq!(f.gate.ledger().read().get(b"last").unwrap(), Some(b"set-fee".to_vec()));
}

#[test]
fn below_quorum_is_rejected_without_touching_the_engine() {
    let f = fixture(3, 2);
    let instruction = ix(b"set-fee");
    let votes = signed_votes(&f, &instruction, &[1]);

    let outcome = f.gate.submit(instruction, Round(0), votes).unwrap();
    let tally = assert_rejected!(
        outcome,
        Rejection::InsufficientQuorum { accepted: 1, required: 2 }
    );
    assert_eq!(tally.entries.len(), 1);
    assert_eq!(f.engine.calls.load(Ordering::SeqCst), 0);
    assert!(f.gate.ledger().read().is_empty());
}

#[test]
fn wrong_round_is_stale_even_with_quorum() {
    let f = fixture(3, 2);
    let instruction = ix(b"x");
    let future = Proposal::new(instruction.clone(), Round(5));
    let votes = f
        .council
        .votes(&future.signing_bytes(0), &[0, 1, 2])
        .unwrap();

    let outcome = f.gate.submit(instruction, Round(5), votes).unwrap();
    let tally = assert_rejected!(
        outcome,
        Rejection::StaleRound { expected: Round(0), got: Round(5) }
    );
    assert_eq!(tally.accepted, 3);
    assert_eq!(f.gate.current_round().unwrap(), Round(0));
    assert_eq!(f.engine.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn duplicate_voter_is_structural() {
    let f = fixture(2, 1);
    let instruction = ix(b"x");
    let mut votes = signed_votes(&f, &instruction, &[0]);
    votes.extend(signed_votes(&f, &instruction, &[0]));

    let err = f.gate.submit(instruction, Round(0), votes).unwrap_err();
    assert!(matches!(err, GateError::DuplicateVoter(_)));
    assert_eq!(err.code(), "GATE_DUPLICATE_VOTER");
}

#[test]
fn bounds_are_structural() {
    let council = Council::new_ed25519(3).unwrap();
    let mut config = GateConfig::new(council.dids(), 1);
    config.max_votes = 2;
    config.max_instruction_bytes = 4;
    let gate = MasterGate::new(
        config,
        Arc::new(StaticResolver::default()),
        Arc::new(CpuBatchVerifier::default()),
        Arc::new(CountingEngine::default()),
        Arc::new(RwLock::new(MemoryState::new())),
    )
    .unwrap();

    let votes = council.votes(b"anything", &[0, 1, 2]).unwrap();
    assert!(matches!(
        gate.submit(ix(b"ok"), Round(0), votes),
        Err(GateError::TooManyVotes { got: 3, max: 2 })
    ));
    assert!(matches!(
        gate.submit(ix(b"too long"), Round(0), Vec::new()),
        Err(GateError::InstructionTooLarge { got: 8, max: 4 })
    ));
}

#[test]
fn engine_failure_commits_nothing() {
    let council = Council::new_ed25519(2).unwrap();
    let resolver = StaticResolver(council.members().iter().map(|m| (m.did(), m.key())).collect());
    let gate = MasterGate::new(
        GateConfig::new(council.dids(), 2),
        Arc::new(resolver),
        Arc::new(CpuBatchVerifier::default()),
        Arc::new(FailingEngine),
        Arc::new(RwLock::new(MemoryState::new())),
    )
    .unwrap();

    let instruction = ix(b"boom");
    let message = Proposal::new(instruction.clone(), Round(0)).signing_bytes(0);
    let votes = council.votes(&message, &[0, 1]).unwrap();

    let err = gate.submit(instruction, Round(0), votes).unwrap_err();
    assert!(matches!(err, GateError::Engine(_)));
    assert!(gate.ledger().read().is_empty());
    assert_eq!(gate.current_round().unwrap(), Round(0));
}

#[test]
fn round_overflow_commits_nothing() {
    let f = fixture(3, 2);
    f.gate
        .ledger()
        .write()
        .insert(GATE_ROUND_KEY, &u64::MAX.to_le_bytes())
        .unwrap();
    let instruction = ix(b"last-word");
    let votes = signed_votes(&f, &instruction, &[0, 1, 2]);

    let err = f.gate.submit(instruction, Round(u64::MAX), votes).unwrap_err();
    assert!(matches!(err, GateError::RoundOverflow(Round(u64::MAX))));
    assert_eq!(err.code(), "GATE_ROUND_OVERFLOW");
    // The engine ran against the overlay only.
    assert_eq!(f.engine.calls.load(Ordering::SeqCst), 1);
    assert_eq!(f.gate.ledger().read().get(b"last").unwrap(), None);
    assert_eq!(f.gate.current_round().unwrap(), Round(u64::MAX));
}

#[test]
fn registered_non_member_does_not_count() {
    let council = Council::new_ed25519(3).unwrap();
    let resolver = StaticResolver(council.members().iter().map(|m| (m.did(), m.key())).collect());
    // Only the first two members hold seats; the third is known to the registry.
    let seats: Vec<Did> = council.dids().into_iter().take(2).collect();
    let gate = MasterGate::new(
        GateConfig::new(seats, 2),
        Arc::new(resolver),
        Arc::new(CpuBatchVerifier::default()),
        Arc::new(CountingEngine::default()),
        Arc::new(RwLock::new(MemoryState::new())),
    )
    .unwrap();
    let outsider = council.member(2).unwrap().did();
    assert!(!gate.is_member(&outsider));

    let instruction = ix(b"x");
    let message = Proposal::new(instruction.clone(), Round(0)).signing_bytes(0);
    let votes = council.votes(&message, &[0, 2]).unwrap();
    let outcome = gate.submit(instruction, Round(0), votes).unwrap();
    let tally = assert_rejected!(
        outcome,
        Rejection::InsufficientQuorum { accepted: 1, required: 2 }
    );
    let entry = tally.entries.iter().find(|e| e.voter == outsider).unwrap();
    assert_eq!(entry.verdict, VoteVerdict::NotAMember);
    assert!(gate.ledger().read().is_empty());
}

/// Serves `before` for the first `switch_after` lookups and `after` from then
/// on, as if a rotation committed while the gate was verifying.
struct RotatingResolver {
    before: BTreeMap<Did, VerificationKey>,
    after: BTreeMap<Did, VerificationKey>,
    switch_after: usize,
    lookups: AtomicUsize,
}

impl KeyResolver for RotatingResolver {
    fn resolve_key(
        &self,
        _state: &dyn StateAccess,
        did: &Did,
    ) -> Result<Option<VerificationKey>, council_types::error::StateError> {
        let n = self.lookups.fetch_add(1, Ordering::SeqCst);
        let view = if n < self.switch_after {
            &self.before
        } else {
            &self.after
        };
        Ok(view.get(did).cloned())
    }
}

#[test]
fn rotation_during_verification_is_honoured() {
    let council = Council::new_ed25519(2).unwrap();
    let before: BTreeMap<_, _> = council.members().iter().map(|m| (m.did(), m.key())).collect();
    let mut after = before.clone();
    let rotated = council.member(0).unwrap().did();
    let replacement = Council::ed25519_from(&mut council_test_utils::TestRng::new(71), 1).unwrap();
    after.insert(rotated, replacement.member(0).unwrap().key());

    let gate = MasterGate::new(
        GateConfig::new(council.dids(), 2),
        Arc::new(RotatingResolver {
            before,
            after,
            switch_after: 2,
            lookups: AtomicUsize::new(0),
        }),
        Arc::new(CpuBatchVerifier::default()),
        Arc::new(CountingEngine::default()),
        Arc::new(RwLock::new(MemoryState::new())),
    )
    .unwrap();

    let instruction = ix(b"x");
    let message = Proposal::new(instruction.clone(), Round(0)).signing_bytes(0);
    let votes = council.votes(&message, &[0, 1]).unwrap();
    let outcome = gate.submit(instruction, Round(0), votes).unwrap();

    // The retired key's vote stops counting at commit time.
    let tally = assert_rejected!(
        outcome,
        Rejection::InsufficientQuorum { accepted: 1, required: 2 }
    );
    let entry = tally.entries.iter().find(|e| e.voter == rotated).unwrap();
    assert_eq!(entry.verdict, VoteVerdict::SignatureInvalid);
    assert!(gate.ledger().read().is_empty());
}

#[test]
fn unsound_configs_are_refused() {
    let council = Council::new_ed25519(2).unwrap();
    for config in [
        GateConfig::new(council.dids(), 0),
        GateConfig::new(council.dids(), 3),
        GateConfig::new(Vec::new(), 1),
    ] {
        let result = MasterGate::new(
            config,
            Arc::new(StaticResolver::default()),
            Arc::new(CpuBatchVerifier::default()),
            Arc::new(CountingEngine::default()),
            Arc::new(RwLock::new(MemoryState::new())),
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}

#[test]
fn service_call_roundtrip() {
    let f = fixture(2, 2);
    let instruction = ix(b"via-abi");
    let votes = signed_votes(&f, &instruction, &[1, 0]);
    let params = codec::to_bytes_canonical(&SubmitParams {
        instruction,
        round: Round(0),
        votes,
    })
    .unwrap();

    let out = f.gate.handle_service_call("submit@v1", &params).unwrap();
    let outcome: GateOutcome = codec::from_bytes_canonical(&out).unwrap();
    assert!(outcome.is_executed());

    let out = f.gate.handle_service_call("current_round@v1", &[]).unwrap();
    let round: Round = codec::from_bytes_canonical(&out).unwrap();
    assert_eq!(round, Round(1));

    assert!(matches!(
        f.gate.handle_service_call("submit@v1", &[0xff]),
        Err(TransactionError::Deserialization(_))
    ));
    assert!(matches!(
        f.gate.handle_service_call("nope@v1", &[]),
        Err(TransactionError::Unsupported(_))
    ));
}
