// Path: crates/services/src/gate/round.rs
//! The round counter that fences every authorization.

use council_api::state::StateAccess;
use council_types::app::Round;
use council_types::error::{GateError, StateError};
use council_types::keys::GATE_ROUND_KEY;

/// Reads and advances the gate's round, stored in the ledger as a
/// little-endian `u64` under `GATE_ROUND_KEY`.
///
/// The counter lives in the same state as the instruction's effects, so its
/// advance is committed in the same batch as the instruction itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoundSequencer;

impl RoundSequencer {
    /// The current round. A ledger that has never executed anything is at round 0.
    pub fn current(state: &dyn StateAccess) -> Result<Round, StateError> {
        match state.get(GATE_ROUND_KEY)? {
            None => Ok(Round(0)),
            Some(bytes) => Round::from_le_slice(&bytes)
                .ok_or_else(|| StateError::InvalidValue("Invalid round bytes".into())),
        }
    }

    /// Moves the round from `expected` to `expected + 1`.
    ///
    /// Fails with `RoundConflict` if the stored round is not `expected`, which
    /// makes the write a compare-and-swap over the counter.
    pub fn advance(state: &mut dyn StateAccess, expected: Round) -> Result<Round, GateError> {
        let found = Self::current(state)?;
        if found != expected {
            return Err(GateError::RoundConflict { expected, found });
        }
        let next = expected.next().ok_or(GateError::RoundOverflow(expected))?;
        state.insert(GATE_ROUND_KEY, &next.to_le_bytes())?;
        Ok(next)
    }
}
