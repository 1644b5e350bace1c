// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::indexing_slicing
    )
)]

//! # Council Types
//!
//! The foundational library for the council authorization gate, containing the
//! data model shared by every other crate in the workspace.
//!
//! ## Architectural Role
//!
//! As the base crate, `council-types` has minimal dependencies and is itself a
//! dependency of every other crate. It provides the canonical definitions of
//! `Did`, `SignatureSuite`, `Round`, `Proposal`, `VoteSet`, the gate outcomes,
//! and the error enums, so that two parties encoding the same proposal always
//! produce the same bytes.

/// A top-level, crate-wide `Result` type alias with a default error type.
pub type Result<T, E = crate::error::GateError> = std::result::Result<T, E>;

/// Identity, proposal, vote and outcome data structures.
pub mod app;
/// The canonical, deterministic binary codec for consensus-critical data.
pub mod codec;
/// Configuration structures for the gate and the identity hub.
pub mod config;
/// A unified set of all error types used across the workspace.
pub mod error;
/// Constants for well-known state keys.
pub mod keys;
