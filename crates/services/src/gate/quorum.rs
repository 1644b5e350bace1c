// Path: crates/services/src/gate/quorum.rs
//! The quorum rule: a fixed threshold of accepted votes.

use council_types::error::ConfigError;

/// The minimum number of independently valid votes an instruction needs.
///
/// The threshold is injected configuration. It is never derived from the size
/// of the council and never changed by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuorumPolicy {
    threshold: u32,
}

impl QuorumPolicy {
    pub fn new(threshold: u32) -> Result<Self, ConfigError> {
        if threshold == 0 {
            return Err(ConfigError::Invalid(
                "quorum threshold must be at least 1".into(),
            ));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Over-satisfaction has the same effect as exact satisfaction.
    pub fn is_satisfied(&self, accepted: u32) -> bool {
        accepted >= self.threshold
    }
}
