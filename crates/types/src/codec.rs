// Path: crates/types/src/codec.rs

//! The canonical, deterministic binary codec for everything the gate stores or signs.
//!
//! Thin wrappers around `parity-scale-codec` (SCALE). Stored keys, rotation
//! proofs and service-call parameters all pass through here so that every
//! component agrees on a single byte representation.

use parity_scale_codec::{Decode, DecodeAll, Encode};

/// Encodes a value into its canonical SCALE bytes.
pub fn to_bytes_canonical<T: Encode>(v: &T) -> Result<Vec<u8>, String> {
    Ok(v.encode())
}

/// Decodes a value from canonical SCALE bytes.
///
/// Trailing bytes are an error: a value has exactly one accepted encoding.
pub fn from_bytes_canonical<T: Decode>(b: &[u8]) -> Result<T, String> {
    T::decode_all(&mut &*b).map_err(|e| format!("canonical decode failed: {}", e))
}
