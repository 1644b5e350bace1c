// Path: crates/types/src/app/mod.rs

//! Core application-level data structures for the authorization gate.

/// Proposal encoding, votes, vote sets and submission outcomes.
pub mod authorization;
/// The canonical `Did`, signature suites and verification keys.
pub mod identity;

pub use authorization::*;
pub use identity::*;
