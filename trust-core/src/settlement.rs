//! Settlement policy
//!
//! Pure decision logic for finalizing a prediction:
//! 1. Quorum check against the configured minimum verifier count
//! 2. Majority decision by strict vote comparison
//! 3. Author point delta and winning side for verifier bonuses
//!
//! Applying the decision (status transition, ledger writes, bonuses) is the
//! engine's job; nothing here touches storage.

use serde::{Deserialize, Serialize};

use crate::config::TrustConfig;
use crate::types::{Prediction, PredictionStatus, VerificationResult};

/// What a settlement will apply, decided from a prediction snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementDecision {
    /// Terminal status the prediction settles to
    pub status: PredictionStatus,
    /// The verification result that voted with the majority
    pub winning_result: VerificationResult,
    /// Point delta for the prediction's author
    pub author_delta: i64,
}

/// Quorum and majority rules for prediction settlement.
///
/// The majority test is a strict `correct_votes > incorrect_votes`, so a
/// tie settles as `incorrect`.
#[derive(Debug, Clone, Copy)]
pub struct SettlementPolicy {
    config: TrustConfig,
}

impl SettlementPolicy {
    pub fn new(config: TrustConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrustConfig {
        &self.config
    }

    /// Flat bonus for each majority-side verifier
    pub fn verifier_bonus(&self) -> i64 {
        self.config.verifier_bonus
    }

    /// True once enough verifiers have voted for settlement to proceed
    pub fn quorum_reached(&self, total_verifiers: u32) -> bool {
        total_verifiers >= self.config.min_verifiers
    }

    /// Decide whether a prediction settles, and how.
    ///
    /// Returns `None` when the prediction is already settled or quorum has
    /// not been reached; the caller treats that as a no-op.
    pub fn evaluate(&self, prediction: &Prediction) -> Option<SettlementDecision> {
        if prediction.is_settled() {
            return None;
        }
        if !self.quorum_reached(prediction.total_verifiers) {
            return None;
        }

        let is_correct = prediction.correct_votes > prediction.incorrect_votes;
        let (status, winning_result, author_delta) = if is_correct {
            (
                PredictionStatus::Correct,
                VerificationResult::Correct,
                self.config.correct_points,
            )
        } else {
            (
                PredictionStatus::Incorrect,
                VerificationResult::Incorrect,
                self.config.incorrect_points,
            )
        };

        Some(SettlementDecision {
            status,
            winning_result,
            author_delta,
        })
    }
}
