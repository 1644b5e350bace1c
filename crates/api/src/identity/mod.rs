// Path: crates/api/src/identity/mod.rs

//! Defines the `KeyResolver` trait for decoupled identity lookups.

use crate::state::StateAccess;
use council_types::app::{Did, VerificationKey};
use council_types::error::StateError;

/// A read-only view of the identity registry.
///
/// The gate resolves every voter's key through this trait and never writes to
/// the registry. Rotations happen elsewhere and take effect on the next lookup.
pub trait KeyResolver: Send + Sync {
    /// Returns the member's currently active key, or `None` if the identity has
    /// no registered key.
    fn resolve_key(
        &self,
        state: &dyn StateAccess,
        did: &Did,
    ) -> Result<Option<VerificationKey>, StateError>;
}
