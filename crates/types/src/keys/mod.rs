// Path: crates/types/src/keys/mod.rs
//! Defines constants for well-known state keys.
//!
//! These constants are the single source of truth for where the gate, the
//! identity hub and the reference engine keep their data in the shared ledger.

use crate::app::Did;

/// The state key holding the gate's current round as a little-endian `u64`.
pub const GATE_ROUND_KEY: &[u8] = b"gate::round";

/// The state key prefix for a member's active verification key, keyed by `Did`.
pub const IDENTITY_KEY_PREFIX: &[u8] = b"identity::key::";

/// The state key prefix for a member's key-rotation nonce, keyed by `Did`.
pub const IDENTITY_ROTATION_NONCE_PREFIX: &[u8] = b"identity::rotation_nonce::";

/// The state key prefix for storage slots written by the reference engine.
pub const ENGINE_SLOT_PREFIX: &[u8] = b"engine::slot::";

/// The key under which a member's active verification key is stored.
pub fn identity_key(did: &Did) -> Vec<u8> {
    [IDENTITY_KEY_PREFIX, did.as_ref()].concat()
}

/// The key under which a member's rotation nonce is stored.
pub fn rotation_nonce_key(did: &Did) -> Vec<u8> {
    [IDENTITY_ROTATION_NONCE_PREFIX, did.as_ref()].concat()
}

/// The key of an engine storage slot.
pub fn engine_slot_key(slot: &[u8]) -> Vec<u8> {
    [ENGINE_SLOT_PREFIX, slot].concat()
}
