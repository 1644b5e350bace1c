// Path: crates/crypto/src/error.rs
//! Local error types for the `council-crypto` crate.

// Re-export the canonical error type from the API crate.
pub use council_api::error::CryptoError;
