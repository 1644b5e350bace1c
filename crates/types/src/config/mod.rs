// Path: crates/types/src/config/mod.rs

//! Configuration structures for the gate and the identity hub.

use crate::app::{Did, SignatureSuite};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Configuration for the `MasterGate`.
///
/// ```toml
/// chain_id = 7
/// threshold = 2
/// members = [
///     "5a1c...e0",
///     "9f03...4b",
///     "did:council:c2d7...19",
/// ]
/// max_votes = 16
/// max_instruction_bytes = 4096
/// allowed_suites = [-8, -47]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Bound into every proposal preimage to prevent cross-chain replay.
    #[serde(default)]
    pub chain_id: u32,
    /// The minimum number of accepted votes required to execute.
    pub threshold: u32,
    /// The council. Votes from any other identity never count, even if the
    /// registry holds a key for it.
    #[serde(with = "members_hex")]
    pub members: BTreeSet<Did>,
    /// The largest vote set the gate will look at.
    #[serde(default = "default_max_votes")]
    pub max_votes: usize,
    /// The largest instruction the gate will forward.
    #[serde(default = "default_max_instruction_bytes")]
    pub max_instruction_bytes: usize,
    /// The suites votes may be signed with.
    #[serde(default = "default_allowed_suites")]
    pub allowed_suites: Vec<SignatureSuite>,
}

fn default_max_votes() -> usize {
    64
}
fn default_max_instruction_bytes() -> usize {
    64 * 1024
}
fn default_allowed_suites() -> Vec<SignatureSuite> {
    vec![SignatureSuite::ED25519, SignatureSuite::SECP256K1]
}

mod members_hex {
    use super::*;
    use serde::de::Error as _;
    use serde::{Deserializer, Serializer};

    const DID_PREFIX: &str = "did:council:";

    pub fn serialize<S: Serializer>(members: &BTreeSet<Did>, s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(members.iter().map(|did| hex::encode(did.0)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<BTreeSet<Did>, D::Error> {
        let raw: Vec<String> = Deserialize::deserialize(d)?;
        let mut members = BTreeSet::new();
        for entry in &raw {
            let digits = entry.strip_prefix(DID_PREFIX).unwrap_or(entry.as_str());
            let bytes: [u8; 32] = hex::decode(digits)
                .map_err(D::Error::custom)?
                .try_into()
                .map_err(|_| D::Error::custom(format!("member {} is not 32 bytes", entry)))?;
            if !members.insert(Did(bytes)) {
                return Err(D::Error::custom(format!("member {} listed twice", entry)));
            }
        }
        Ok(members)
    }
}

impl GateConfig {
    /// A configuration for `members` with the given threshold and defaults
    /// elsewhere.
    pub fn new(members: impl IntoIterator<Item = Did>, threshold: u32) -> Self {
        Self {
            chain_id: 0,
            threshold,
            members: members.into_iter().collect(),
            max_votes: default_max_votes(),
            max_instruction_bytes: default_max_instruction_bytes(),
            allowed_suites: default_allowed_suites(),
        }
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&raw)
    }

    /// Rejects configurations under which the gate cannot make sound decisions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threshold == 0 {
            return Err(ConfigError::Invalid(
                "threshold must be at least 1; a zero threshold authorizes empty vote sets".into(),
            ));
        }
        if self.max_votes == 0 {
            return Err(ConfigError::Invalid("max_votes must be at least 1".into()));
        }
        if usize::try_from(self.threshold).map_or(true, |t| t > self.max_votes) {
            return Err(ConfigError::Invalid(format!(
                "threshold {} can never be met with max_votes {}",
                self.threshold, self.max_votes
            )));
        }
        if usize::try_from(self.threshold).map_or(true, |t| t > self.members.len()) {
            return Err(ConfigError::Invalid(format!(
                "threshold {} exceeds the council size {}",
                self.threshold,
                self.members.len()
            )));
        }
        if self.allowed_suites.is_empty() {
            return Err(ConfigError::Invalid("allowed_suites must not be empty".into()));
        }
        Ok(())
    }
}

/// Configuration for the IdentityHub service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MigrationConfig {
    /// A list of signature suites that members may register or rotate to.
    pub allowed_target_suites: Vec<SignatureSuite>,
    /// If false, a rotation must keep the member's current suite.
    #[serde(default)]
    pub allow_suite_change: bool,
    /// Bound into rotation challenges to prevent cross-chain replay.
    #[serde(default)]
    pub chain_id: u32,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            allowed_target_suites: default_allowed_suites(),
            allow_suite_change: true,
            chain_id: 0,
        }
    }
}
