// Path: crates/services/src/lib.rs
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::indexing_slicing
    )
)]

//! # Council Services
//!
//! The master gate that authorizes privileged instructions by threshold vote,
//! the identity hub it resolves voters' keys from, and a reference engine the
//! authorized instructions can be forwarded to.

pub mod engine;
pub mod gate;
pub mod identity;

pub use engine::{SlotWrite, SlotWriteEngine};
pub use gate::{MasterGate, QuorumPolicy, RoundSequencer, SignatureVerifier};
pub use identity::IdentityHub;
