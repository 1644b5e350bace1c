// Path: crates/services/tests/common/mod.rs
#![allow(dead_code)]

use council_api::state::{MemoryState, StateAccess};
use council_crypto::sign::batch::CpuBatchVerifier;
use council_services::{IdentityHub, MasterGate, SlotWrite, SlotWriteEngine};
use council_test_utils::Council;
use council_types::app::{PrivilegedInstruction, Round};
use council_types::config::{GateConfig, MigrationConfig};
use parking_lot::RwLock;
use std::sync::Arc;

/// A gate over an in-memory ledger with every council member registered and
/// seated.
pub struct Harness {
    pub council: Council,
    pub hub: Arc<IdentityHub>,
    pub gate: MasterGate<MemoryState>,
}

pub fn harness(members: usize, threshold: u32) -> Harness {
    let council = Council::new_ed25519(members).unwrap();
    let config = GateConfig::new(council.dids(), threshold);
    harness_with(council, config)
}

pub fn harness_with(council: Council, config: GateConfig) -> Harness {
    council_telemetry::init::init_test_tracing();

    let hub = Arc::new(IdentityHub::new(MigrationConfig {
        chain_id: config.chain_id,
        ..MigrationConfig::default()
    }));
    let mut ledger = MemoryState::new();
    for member in council.members() {
        let did = hub.register(&mut ledger, &member.key()).unwrap();
        assert_eq!(did, member.did());
    }

    let gate = MasterGate::new(
        config,
        hub.clone(),
        Arc::new(CpuBatchVerifier::default()),
        Arc::new(SlotWriteEngine),
        Arc::new(RwLock::new(ledger)),
    )
    .unwrap();
    Harness { council, hub, gate }
}

pub fn slot_write(key: &[u8], value: &[u8]) -> PrivilegedInstruction {
    SlotWrite::new(key, value).to_instruction().unwrap()
}

impl Harness {
    /// The canonical message for `instruction` at the gate's current round.
    pub fn message(&self, instruction: &PrivilegedInstruction) -> Vec<u8> {
        self.gate
            .proposal_for(instruction.clone())
            .unwrap()
            .signing_bytes(self.gate.config().chain_id)
    }

    pub fn round(&self) -> Round {
        self.gate.current_round().unwrap()
    }

    pub fn slot(&self, key: &[u8]) -> Option<Vec<u8>> {
        SlotWriteEngine::read_slot(&*self.gate.ledger().read(), key).unwrap()
    }

    /// A copy of the whole ledger, for before/after comparisons.
    pub fn snapshot(&self) -> MemoryState {
        self.gate.ledger().read().clone()
    }

    pub fn ledger_get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.gate.ledger().read().get(key).unwrap()
    }
}
