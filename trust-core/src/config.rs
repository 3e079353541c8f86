//! Trust engine configuration
//!
//! Plain configuration structs with defaults matching the production
//! values, environment overrides under the `TRUST_` prefix, and explicit
//! validation.

use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{TrustError, TrustResult};

/// Settlement and reward parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustConfig {
    /// Minimum verifier count before settlement is considered (quorum)
    pub min_verifiers: u32,
    /// Points awarded to the author of a correct prediction
    pub correct_points: i64,
    /// Points delta for the author of an incorrect prediction (negative)
    pub incorrect_points: i64,
    /// Flat bonus paid to each verifier who voted with the majority
    pub verifier_bonus: i64,
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            min_verifiers: 3,
            correct_points: 50,
            incorrect_points: -30,
            verifier_bonus: 10,
        }
    }
}

impl TrustConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    ///
    /// Environment variables:
    /// - `TRUST_MIN_VERIFIERS`
    /// - `TRUST_CORRECT_POINTS`
    /// - `TRUST_INCORRECT_POINTS`
    /// - `TRUST_VERIFIER_BONUS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_verifiers: env_parse("TRUST_MIN_VERIFIERS").unwrap_or(defaults.min_verifiers),
            correct_points: env_parse("TRUST_CORRECT_POINTS").unwrap_or(defaults.correct_points),
            incorrect_points: env_parse("TRUST_INCORRECT_POINTS")
                .unwrap_or(defaults.incorrect_points),
            verifier_bonus: env_parse("TRUST_VERIFIER_BONUS").unwrap_or(defaults.verifier_bonus),
        }
    }

    /// Validate parameter sanity
    pub fn validate(&self) -> TrustResult<()> {
        if self.min_verifiers < 1 {
            return Err(TrustError::Configuration(
                "min_verifiers must be at least 1".to_string(),
            ));
        }
        if self.correct_points <= 0 {
            return Err(TrustError::Configuration(
                "correct_points must be positive".to_string(),
            ));
        }
        if self.verifier_bonus < 0 {
            return Err(TrustError::Configuration(
                "verifier_bonus must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Migration stub parameters.
///
/// The chain integration is a stub: `blockchain_enabled` stays false and the
/// handle fields are carried only so the service can be constructed with its
/// future wiring in place instead of reaching for ambient globals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Whether a real chain connection is configured (always false here)
    pub blockchain_enabled: bool,
    /// RPC endpoint for the future chain connection
    pub rpc_url: Option<String>,
    /// Address of the future soulbound-token contract
    pub contract_address: Option<String>,
    /// Minimum trust level required to migrate
    pub min_trust_level: u8,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            blockchain_enabled: false,
            rpc_url: None,
            contract_address: None,
            min_trust_level: 2,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}
