//! Verification entity
//!
//! One verification per (prediction, verifier) pair. Immutable after
//! creation; the verifier's trust level is snapshotted at submission time
//! as a historical record and never re-derived.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{PredictionId, VerificationId, WalletAddress};
use crate::error::TrustError;

/// A single user's judgment on a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationResult {
    Correct,
    Incorrect,
}

impl VerificationResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
        }
    }
}

impl std::fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VerificationResult {
    type Err = TrustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "correct" => Ok(Self::Correct),
            "incorrect" => Ok(Self::Incorrect),
            other => Err(TrustError::Validation(format!(
                "result must be 'correct' or 'incorrect', got '{}'",
                other
            ))),
        }
    }
}

/// Recorded verification of a prediction by one wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub id: VerificationId,
    pub prediction_id: PredictionId,
    pub verifier_wallet: WalletAddress,
    pub result: VerificationResult,
    /// Verifier's trust level at the moment of verification
    pub verifier_trust_level: u8,
    pub created_at: DateTime<Utc>,
}

impl Verification {
    pub fn new(
        prediction_id: PredictionId,
        verifier_wallet: WalletAddress,
        result: VerificationResult,
        verifier_trust_level: u8,
    ) -> Self {
        Self {
            id: VerificationId::generate(),
            prediction_id,
            verifier_wallet,
            result,
            verifier_trust_level,
            created_at: Utc::now(),
        }
    }
}
