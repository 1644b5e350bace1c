// Path: crates/types/src/error/mod.rs
//! Core error types for the council gate.

use crate::app::{Did, Round};
use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors related to the ledger state the gate reads and writes.
#[derive(Error, Debug)]
pub enum StateError {
    /// A stored value could not be decoded or re-encoded.
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl ErrorCode for StateError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidValue(_) => "STATE_INVALID_VALUE",
        }
    }
}

/// Errors from cryptographic primitives.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// The signature failed cryptographic verification.
    #[error("Signature verification failed")]
    VerificationFailed,
    /// The provided key material is malformed or invalid for the specified algorithm.
    #[error("Invalid cryptographic key: {0}")]
    InvalidKey(String),
    /// The requested suite is not registered with the verifier.
    #[error("Unsupported signature suite: {0}")]
    Unsupported(String),
    /// A generic failure in an underlying cryptographic library.
    #[error("Cryptographic operation failed: {0}")]
    OperationFailed(String),
}

impl ErrorCode for CryptoError {
    fn code(&self) -> &'static str {
        match self {
            Self::VerificationFailed => "CRYPTO_VERIFICATION_FAILED",
            Self::InvalidKey(_) => "CRYPTO_INVALID_KEY",
            Self::Unsupported(_) => "CRYPTO_UNSUPPORTED",
            Self::OperationFailed(_) => "CRYPTO_OPERATION_FAILED",
        }
    }
}

/// Structural failures of a gate submission.
///
/// These mean "the request was malformed or the gate could not decide". They are
/// deliberately separate from [`crate::app::Rejection`], which reports a valid
/// request that was not authorized.
#[derive(Error, Debug)]
pub enum GateError {
    /// The same identity appears more than once in the vote set.
    #[error("Duplicate voter in vote set: {0}")]
    DuplicateVoter(Did),
    /// The vote set exceeds the configured maximum.
    #[error("Too many votes: got {got}, maximum is {max}")]
    TooManyVotes {
        /// The number of votes submitted.
        got: usize,
        /// The configured maximum.
        max: usize,
    },
    /// The instruction exceeds the configured maximum size.
    #[error("Instruction too large: {got} bytes, maximum is {max}")]
    InstructionTooLarge {
        /// The instruction size in bytes.
        got: usize,
        /// The configured maximum.
        max: usize,
    },
    /// The round counter cannot be advanced any further.
    #[error("Round counter overflow at {0}")]
    RoundOverflow(Round),
    /// The round changed between the fencing check and the commit.
    #[error("Round conflict: expected {expected}, found {found}")]
    RoundConflict {
        /// The round the commit was fenced on.
        expected: Round,
        /// The round found in the staged state.
        found: Round,
    },
    /// The underlying engine refused the instruction; nothing was committed.
    #[error("Engine failed to apply instruction: {0}")]
    Engine(String),
    /// The batch verifier failed as a whole.
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),
    /// An error occurred while accessing the ledger state.
    #[error("State error: {0}")]
    State(#[from] StateError),
}

impl ErrorCode for GateError {
    fn code(&self) -> &'static str {
        match self {
            Self::DuplicateVoter(_) => "GATE_DUPLICATE_VOTER",
            Self::TooManyVotes { .. } => "GATE_TOO_MANY_VOTES",
            Self::InstructionTooLarge { .. } => "GATE_INSTRUCTION_TOO_LARGE",
            Self::RoundOverflow(_) => "GATE_ROUND_OVERFLOW",
            Self::RoundConflict { .. } => "GATE_ROUND_CONFLICT",
            Self::Engine(_) => "GATE_ENGINE_FAILED",
            Self::Crypto(_) => "GATE_CRYPTO_ERROR",
            Self::State(_) => "GATE_STATE_ERROR",
        }
    }
}

/// Errors related to service-call processing.
#[derive(Error, Debug)]
pub enum TransactionError {
    /// An error occurred during serialization.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// An error occurred during deserialization.
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    /// The call is invalid for a service-specific reason.
    #[error("Invalid transaction: {0}")]
    Invalid(String),
    /// An error originating from the gate.
    #[error("Gate error: {0}")]
    Gate(#[from] GateError),
    /// An error originating from the state manager.
    #[error("State error: {0}")]
    State(#[from] StateError),
    /// The signature failed cryptographic verification.
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
    /// The requested method is not supported by the service.
    #[error("Unsupported method: {0}")]
    Unsupported(String),
}

impl ErrorCode for TransactionError {
    fn code(&self) -> &'static str {
        match self {
            Self::Serialization(_) => "TX_SERIALIZATION_ERROR",
            Self::Deserialization(_) => "TX_DESERIALIZATION_ERROR",
            Self::Invalid(_) => "TX_INVALID",
            Self::Gate(_) => "TX_GATE_ERROR",
            Self::State(_) => "TX_STATE_ERROR",
            Self::InvalidSignature(_) => "TX_INVALID_SIGNATURE",
            Self::Unsupported(_) => "TX_UNSUPPORTED",
        }
    }
}

impl From<CryptoError> for TransactionError {
    fn from(e: CryptoError) -> Self {
        TransactionError::Invalid(format!("Cryptographic operation failed: {}", e))
    }
}

impl From<parity_scale_codec::Error> for TransactionError {
    fn from(e: parity_scale_codec::Error) -> Self {
        TransactionError::Deserialization(e.to_string())
    }
}

/// Errors raised while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file: {0}")]
    Io(String),
    /// The configuration could not be parsed.
    #[error("Failed to parse config: {0}")]
    Parse(String),
    /// A field holds a value the gate cannot operate with.
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "CONFIG_IO_ERROR",
            Self::Parse(_) => "CONFIG_PARSE_ERROR",
            Self::Invalid(_) => "CONFIG_INVALID",
        }
    }
}
