// Path: crates/crypto/src/lib.rs
//! # Council Crypto Crate Lints
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
        clippy::indexing_slicing
    )
)]
//! # Council Cryptography
//!
//! Signature scheme implementations for the council gate: Ed25519 and ECDSA
//! over secp256k1, a registry that dispatches on the suite tag, and a
//! rayon-parallel batch verifier.

pub mod error;
pub mod sign;
