// Path: crates/services/src/engine/mod.rs
//! A reference `InstructionEngine` that writes one storage slot per instruction.

use council_api::engine::InstructionEngine;
use council_api::state::StateAccess;
use council_types::app::PrivilegedInstruction;
use council_types::codec;
use council_types::error::{StateError, TransactionError};
use council_types::keys::engine_slot_key;
use parity_scale_codec::{Decode, Encode};

/// The instruction format understood by `SlotWriteEngine`.
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct SlotWrite {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

impl SlotWrite {
    pub fn new(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The SCALE-encoded instruction the gate forwards.
    pub fn to_instruction(&self) -> Result<PrivilegedInstruction, TransactionError> {
        codec::to_bytes_canonical(self)
            .map(PrivilegedInstruction::from)
            .map_err(TransactionError::Serialization)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SlotWriteEngine;

impl SlotWriteEngine {
    /// Reads a slot written by a previously executed instruction.
    pub fn read_slot(state: &dyn StateAccess, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        state.get(&engine_slot_key(key))
    }
}

impl InstructionEngine for SlotWriteEngine {
    fn apply(
        &self,
        state: &mut dyn StateAccess,
        instruction: &PrivilegedInstruction,
    ) -> Result<(), TransactionError> {
        let write: SlotWrite = codec::from_bytes_canonical(instruction.as_bytes())
            .map_err(TransactionError::Deserialization)?;
        if write.key.is_empty() {
            return Err(TransactionError::Invalid("slot key must not be empty".into()));
        }
        state.insert(&engine_slot_key(&write.key), &write.value)?;
        log::debug!(
            "[SlotWriteEngine] slot 0x{} <- {} bytes",
            hex::encode(&write.key),
            write.value.len()
        );
        Ok(())
    }
}
