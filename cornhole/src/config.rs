//! Bracket configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Alphabet join codes are drawn from
pub const JOIN_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default roster cap (two starters plus one substitute)
pub const DEFAULT_ROSTER_CAP: usize = 3;

/// Default join code length
pub const DEFAULT_JOIN_CODE_LENGTH: usize = 6;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("roster cap must be at least 1")]
    RosterCapZero,

    #[error("join code length must be between 4 and 16, got {0}")]
    JoinCodeLength(usize),
}

/// Bracket configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketConfig {
    /// Maximum players on a roster, including joins
    pub roster_cap: usize,

    /// Length of generated join codes
    pub join_code_length: usize,
}

impl Default for BracketConfig {
    fn default() -> Self {
        Self {
            roster_cap: DEFAULT_ROSTER_CAP,
            join_code_length: DEFAULT_JOIN_CODE_LENGTH,
        }
    }
}

impl BracketConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roster_cap == 0 {
            return Err(ConfigError::RosterCapZero);
        }

        if !(4..=16).contains(&self.join_code_length) {
            return Err(ConfigError::JoinCodeLength(self.join_code_length));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BracketConfig::default();
        assert_eq!(config.roster_cap, 3);
        assert_eq!(config.join_code_length, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_roster_cap_rejected() {
        let config = BracketConfig {
            roster_cap: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::RosterCapZero));
    }

    #[test]
    fn test_join_code_length_bounds() {
        for len in [0, 3, 17] {
            let config = BracketConfig {
                join_code_length: len,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ConfigError::JoinCodeLength(len)));
        }
    }
}
