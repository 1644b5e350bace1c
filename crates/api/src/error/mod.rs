// Path: crates/api/src/error/mod.rs
// Re-export all core error types from the types crate.
pub use council_types::error::{
    ConfigError, CryptoError, ErrorCode, GateError, StateError, TransactionError,
};
pub use council_types::Result;
