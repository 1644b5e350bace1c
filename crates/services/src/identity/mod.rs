// Path: crates/services/src/identity/mod.rs
use council_api::identity::KeyResolver;
use council_api::state::StateAccess;
use council_crypto::sign::suites::SuiteRegistry;
use council_types::app::{sha256, Did, RotationProof, VerificationKey};
use council_types::codec;
use council_types::config::MigrationConfig;
use council_types::error::{StateError, TransactionError};
use council_types::keys::{identity_key, rotation_nonce_key};
use parity_scale_codec::{Decode, Encode};

const ROTATION_DOMAIN: &[u8] = b"COUNCIL-KEY-ROTATE/v1";

/// The state-backed registry of each member's active verification key.
///
/// A member's `Did` is derived from the key it first registers with and stays
/// fixed across rotations. The gate only reads this registry, through
/// `KeyResolver`, so a rotation is visible to the very next submission.
#[derive(Debug, Clone)]
pub struct IdentityHub {
    pub config: MigrationConfig,
    suites: SuiteRegistry,
}

// --- Helper structs for deserializing service-call parameters ---
#[derive(Encode, Decode)]
pub struct RegisterParams {
    pub key: VerificationKey,
}

#[derive(Encode, Decode)]
pub struct RotateKeyParams {
    pub did: Did,
    pub proof: RotationProof,
}

impl IdentityHub {
    pub fn new(config: MigrationConfig) -> Self {
        Self::with_suites(config, SuiteRegistry::with_default_suites())
    }

    pub fn with_suites(config: MigrationConfig, suites: SuiteRegistry) -> Self {
        Self { config, suites }
    }

    fn load_key(
        &self,
        state: &dyn StateAccess,
        did: &Did,
    ) -> Result<Option<VerificationKey>, StateError> {
        match state.get(&identity_key(did))? {
            None => Ok(None),
            Some(bytes) => codec::from_bytes_canonical(&bytes)
                .map(Some)
                .map_err(StateError::InvalidValue),
        }
    }

    /// The rotation nonce of `did`. An identity that never rotated is at 0.
    fn load_nonce(&self, state: &dyn StateAccess, did: &Did) -> Result<u64, StateError> {
        match state.get(&rotation_nonce_key(did))? {
            None => Ok(0),
            Some(bytes) => <[u8; 8]>::try_from(bytes.as_slice())
                .map(u64::from_le_bytes)
                .map_err(|_| StateError::InvalidValue("Invalid rotation nonce bytes".into())),
        }
    }

    fn save_key(
        &self,
        state: &mut dyn StateAccess,
        did: &Did,
        key: &VerificationKey,
    ) -> Result<(), StateError> {
        let bytes = codec::to_bytes_canonical(key).map_err(StateError::InvalidValue)?;
        state.insert(&identity_key(did), &bytes)
    }

    fn ensure_suite_allowed(&self, key: &VerificationKey) -> Result<(), TransactionError> {
        if !self.config.allowed_target_suites.contains(&key.suite) || !self.suites.supports(key.suite)
        {
            return Err(TransactionError::Invalid(format!(
                "Signature suite {} not allowed by chain policy",
                key.suite
            )));
        }
        Ok(())
    }

    /// Registers a new member and returns the `Did` derived from its key.
    pub fn register(
        &self,
        state: &mut dyn StateAccess,
        key: &VerificationKey,
    ) -> Result<Did, TransactionError> {
        self.ensure_suite_allowed(key)?;
        let did = key.did()?;
        if self.load_key(state, &did)?.is_some() {
            return Err(TransactionError::Invalid(format!(
                "Identity {} is already registered",
                did
            )));
        }
        self.save_key(state, &did, key)?;
        log::info!(
            "[IdentityHub] Registered 0x{} with suite {}",
            did.short(),
            key.suite
        );
        Ok(did)
    }

    /// The message both keys of a rotation must sign. It changes after every
    /// successful rotation, so a proof can be used once.
    pub fn rotation_challenge(
        &self,
        state: &dyn StateAccess,
        did: &Did,
    ) -> Result<[u8; 32], StateError> {
        let nonce = self.load_nonce(state, did)?;
        let mut preimage = ROTATION_DOMAIN.to_vec();
        preimage.extend_from_slice(&self.config.chain_id.to_le_bytes());
        preimage.extend_from_slice(did.as_ref());
        preimage.extend_from_slice(&nonce.to_le_bytes());
        Ok(sha256(&preimage))
    }

    /// Replaces a member's active key.
    pub fn rotate(
        &self,
        state: &mut dyn StateAccess,
        did: &Did,
        proof: &RotationProof,
    ) -> Result<(), TransactionError> {
        self.ensure_suite_allowed(&proof.new_key)?;
        let active = self.load_key(state, did)?.ok_or_else(|| {
            TransactionError::Invalid("No active key to rotate from".to_string())
        })?;

        if !self.config.allow_suite_change && proof.new_key.suite != active.suite {
            return Err(TransactionError::Invalid(
                "Changing signature suite is forbidden by policy".to_string(),
            ));
        }
        if proof.new_key == active {
            return Err(TransactionError::Invalid(
                "New key is identical to the active key".to_string(),
            ));
        }

        let challenge = self.rotation_challenge(state, did)?;
        self.suites
            .verify(active.suite, &active.public_key, &challenge, &proof.old_signature)
            .map_err(|e| TransactionError::InvalidSignature(format!("old key: {}", e)))?;
        self.suites
            .verify(
                proof.new_key.suite,
                &proof.new_key.public_key,
                &challenge,
                &proof.new_signature,
            )
            .map_err(|e| TransactionError::InvalidSignature(format!("new key: {}", e)))?;

        self.save_key(state, did, &proof.new_key)?;
        let next_nonce = self.load_nonce(state, did)?.saturating_add(1);
        state.insert(&rotation_nonce_key(did), &next_nonce.to_le_bytes())?;

        log::info!(
            "[IdentityHub] Rotated 0x{}: {} -> {}",
            did.short(),
            active.suite,
            proof.new_key.suite
        );
        Ok(())
    }

    /// Dispatches a SCALE-encoded service call. `register@v1` returns the
    /// SCALE-encoded `Did`; `rotate_key@v1` returns nothing.
    pub fn handle_service_call(
        &self,
        state: &mut dyn StateAccess,
        method: &str,
        params: &[u8],
    ) -> Result<Vec<u8>, TransactionError> {
        match method {
            "register@v1" => {
                let p: RegisterParams =
                    codec::from_bytes_canonical(params).map_err(TransactionError::Deserialization)?;
                let did = self.register(state, &p.key)?;
                codec::to_bytes_canonical(&did).map_err(TransactionError::Serialization)
            }
            "rotate_key@v1" => {
                let p: RotateKeyParams =
                    codec::from_bytes_canonical(params).map_err(TransactionError::Deserialization)?;
                self.rotate(state, &p.did, &p.proof)?;
                Ok(Vec::new())
            }
            _ => Err(TransactionError::Unsupported(format!(
                "IdentityHub does not support method '{}'",
                method
            ))),
        }
    }
}

impl KeyResolver for IdentityHub {
    fn resolve_key(
        &self,
        state: &dyn StateAccess,
        did: &Did,
    ) -> Result<Option<VerificationKey>, StateError> {
        self.load_key(state, did)
    }
}

#[cfg(test)]
mod tests;
