// Path: crates/test_utils/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Council Test Utilities
//!
//! Deterministic council members, seeded randomness and assertion macros for
//! testing the authorization gate.

pub mod assertions;
pub mod council;
pub mod randomness;

pub use council::{Council, CouncilMember};
pub use council_types;
pub use randomness::TestRng;
