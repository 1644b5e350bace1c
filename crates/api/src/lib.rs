// Path: crates/api/src/lib.rs

//! # Council API Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
#![deny(missing_docs)]
//! # Council API
//!
//! The narrow interfaces through which the gate consumes its external
//! collaborators: the ledger state, the identity registry, the per-scheme
//! signature primitives and the underlying state-transition engine.

/// Unified traits for signature schemes, signers and batch verification.
pub mod crypto;
/// The `InstructionEngine` trait for the underlying state-transition engine.
pub mod engine;
/// Re-exports all core error types from the central `council-types` crate.
pub mod error;
/// The `KeyResolver` trait for decoupled identity lookups.
pub mod identity;
/// Key-value state access, a copy-on-write overlay and an in-memory ledger.
pub mod state;

/// A curated set of the most commonly used traits.
pub mod prelude {
    pub use crate::crypto::{BatchVerifier, SchemeVerifier, Signer};
    pub use crate::engine::InstructionEngine;
    pub use crate::identity::KeyResolver;
    pub use crate::state::StateAccess;
}
