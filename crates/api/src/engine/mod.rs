// Path: crates/api/src/engine/mod.rs

//! Defines the `InstructionEngine` trait for the underlying state-transition engine.

use crate::state::StateAccess;
use council_types::app::PrivilegedInstruction;
use council_types::error::TransactionError;

/// The state-transition engine privileged instructions are forwarded to.
///
/// The gate hands the engine a staging overlay rather than the ledger itself.
/// Whatever the engine writes is committed together with the round advance, or
/// not at all, so an engine never needs its own rollback logic.
pub trait InstructionEngine: Send + Sync {
    /// Applies `instruction` to `state`.
    ///
    /// Returning an error aborts the execution: the gate drops every staged
    /// write and leaves the round unchanged.
    fn apply(
        &self,
        state: &mut dyn StateAccess,
        instruction: &PrivilegedInstruction,
    ) -> Result<(), TransactionError>;
}
