//! Prediction entity and lifecycle status

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ParentRef, PredictionId, VerificationResult, WalletAddress};

/// Prediction lifecycle status.
///
/// `pending -> correct` and `pending -> incorrect` are the only transitions;
/// both targets are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionStatus {
    Pending,
    Correct,
    Incorrect,
}

impl PredictionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
        }
    }

    /// True once the prediction has left `pending`
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// The verification result that agrees with this settled status
    pub fn winning_result(&self) -> Option<VerificationResult> {
        match self {
            Self::Pending => None,
            Self::Correct => Some(VerificationResult::Correct),
            Self::Incorrect => Some(VerificationResult::Incorrect),
        }
    }
}

impl Default for PredictionStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl std::fmt::Display for PredictionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A flagged claim subject to crowd verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub id: PredictionId,
    /// Free-text claim
    pub content: String,
    pub author_wallet: WalletAddress,
    /// Post or comment this prediction is attached to, if any
    pub parent: ParentRef,
    /// Optional deadline; informational only, settlement ignores it
    pub deadline: Option<DateTime<Utc>>,
    pub status: PredictionStatus,
    pub correct_votes: u32,
    pub incorrect_votes: u32,
    /// Always `correct_votes + incorrect_votes`
    pub total_verifiers: u32,
    pub created_at: DateTime<Utc>,
    /// Set exactly once, when the prediction is settled
    pub finalized_at: Option<DateTime<Utc>>,
}

impl Prediction {
    /// Create a new pending prediction with zero vote counters
    pub fn new(
        id: PredictionId,
        content: impl Into<String>,
        author_wallet: WalletAddress,
        parent: ParentRef,
        deadline: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            content: content.into(),
            author_wallet,
            parent,
            deadline,
            status: PredictionStatus::Pending,
            correct_votes: 0,
            incorrect_votes: 0,
            total_verifiers: 0,
            created_at: Utc::now(),
            finalized_at: None,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.status.is_settled()
    }

    /// Record one verification vote in the tally
    pub fn record_vote(&mut self, result: VerificationResult) {
        match result {
            VerificationResult::Correct => self.correct_votes += 1,
            VerificationResult::Incorrect => self.incorrect_votes += 1,
        }
        self.total_verifiers += 1;
    }

    /// Transition out of `pending`. Callers must have checked the status
    /// under the same lock or transaction that applies the ledger updates.
    pub fn finalize(&mut self, status: PredictionStatus, at: DateTime<Utc>) {
        self.status = status;
        self.finalized_at = Some(at);
    }
}
