//! Storage layer
//!
//! Repository abstraction for trust accounts, predictions and
//! verifications.
//!
//! # Atomicity contract
//!
//! Every trait method that touches more than one entity is a single atomic
//! unit: a concurrent reader never observes a partially applied update, and
//! two writers racing on the same unique operation (duplicate verification,
//! double settlement) get exactly one success. The three multi-entity units
//! are:
//! - [`TrustStorage::insert_prediction`]: prediction row + author pending count
//! - [`TrustStorage::record_verification`]: uniqueness check + row + vote tally
//! - [`TrustStorage::settle_prediction`]: conditional status transition +
//!   author delta + verifier bonuses, all or nothing

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use trust_core::{
    Prediction, PredictionId, PredictionStatus, TrustAccount, TrustResult, Verification,
    VerificationResult, WalletAddress,
};

/// Filter for prediction listings
#[derive(Debug, Clone, Default)]
pub struct PredictionFilter {
    /// Only predictions by this author
    pub author: Option<WalletAddress>,
    /// Only predictions in this status
    pub status: Option<PredictionStatus>,
    /// Maximum number of results, newest first
    pub limit: Option<usize>,
}

impl PredictionFilter {
    pub fn by_author(wallet: WalletAddress) -> Self {
        Self {
            author: Some(wallet),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: PredictionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Settled/total prediction tally for one author
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionTally {
    pub total: u32,
    pub correct: u32,
    pub incorrect: u32,
}

impl PredictionTally {
    /// Settled predictions in the tally
    pub fn settled(&self) -> u32 {
        self.correct + self.incorrect
    }
}

/// Everything one settlement applies in a single unit
#[derive(Debug, Clone)]
pub struct SettlementWrite {
    pub prediction_id: PredictionId,
    /// Terminal status; must not be `Pending`
    pub new_status: PredictionStatus,
    pub finalized_at: DateTime<Utc>,
    /// Point delta for the prediction's author
    pub author_delta: i64,
    /// Outcome tag for the author's counters
    pub author_outcome: VerificationResult,
    /// Flat bonus per majority-side verifier
    pub bonuses: Vec<(WalletAddress, i64)>,
}

/// Storage statistics
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StorageStats {
    pub total_accounts: u64,
    pub total_predictions: u64,
    pub pending_predictions: u64,
    pub settled_predictions: u64,
    pub total_verifications: u64,
}

/// Backing store for the trust engine.
///
/// The engine components are the only writers: the ledger owns accounts,
/// the prediction store owns prediction rows, the collector owns
/// verifications, and only the settlement engine moves a prediction out of
/// `pending`.
#[async_trait]
pub trait TrustStorage: Send + Sync {
    // ==================== Account operations ====================

    /// Fetch an account if it exists
    async fn get_account(&self, wallet: &WalletAddress) -> TrustResult<Option<TrustAccount>>;

    /// Fetch an account, creating it with defaults on first reference
    async fn get_or_create_account(&self, wallet: &WalletAddress) -> TrustResult<TrustAccount>;

    /// Apply a point delta to one account as an atomic read-modify-write.
    ///
    /// Creates the account if absent. Clamps the total at zero, recomputes
    /// the level, bumps the outcome counter and optionally resolves one
    /// pending prediction. Concurrent deltas for the same wallet serialize.
    async fn apply_trust_delta(
        &self,
        wallet: &WalletAddress,
        delta: i64,
        outcome: Option<VerificationResult>,
        resolves_pending: bool,
    ) -> TrustResult<TrustAccount>;

    // ==================== Prediction operations ====================

    /// Insert a new prediction and increment the author's pending count,
    /// creating the author's account if absent. One atomic unit.
    async fn insert_prediction(&self, prediction: Prediction) -> TrustResult<Prediction>;

    /// Fetch a prediction
    async fn get_prediction(&self, id: &PredictionId) -> TrustResult<Option<Prediction>>;

    /// Fetch a prediction together with all its verifications
    async fn get_prediction_with_verifications(
        &self,
        id: &PredictionId,
    ) -> TrustResult<Option<(Prediction, Vec<Verification>)>>;

    /// List predictions matching a filter, newest first
    async fn list_predictions(&self, filter: &PredictionFilter) -> TrustResult<Vec<Prediction>>;

    /// Tally total/correct/incorrect predictions for one author
    async fn prediction_tally(&self, author: &WalletAddress) -> TrustResult<PredictionTally>;

    // ==================== Verification operations ====================

    /// Record a verification and bump the prediction's vote tally.
    ///
    /// Re-checks all preconditions under the same guard that performs the
    /// insert, so of two racing duplicates exactly one succeeds:
    /// - `PredictionNotFound` if the prediction is missing
    /// - `SelfVerificationForbidden` if the verifier authored it
    /// - `PredictionAlreadySettled` if it has left `pending`
    /// - `DuplicateVerification` if this wallet already verified it
    async fn record_verification(&self, verification: Verification)
        -> TrustResult<Verification>;

    /// Fetch one wallet's verification of a prediction, if any
    async fn get_verification(
        &self,
        prediction_id: &PredictionId,
        wallet: &WalletAddress,
    ) -> TrustResult<Option<Verification>>;

    /// All verifications for a prediction
    async fn list_verifications(
        &self,
        prediction_id: &PredictionId,
    ) -> TrustResult<Vec<Verification>>;

    /// Number of verifications submitted by one wallet
    async fn count_verifications_by(&self, wallet: &WalletAddress) -> TrustResult<u64>;

    // ==================== Settlement ====================

    /// Apply one settlement as a single all-or-nothing unit.
    ///
    /// Compare-and-set on the prediction's status: returns `Ok(false)`
    /// without writing anything when the prediction is no longer `pending`
    /// (a concurrent settlement won the race). On success the status
    /// transition, the author's ledger update and every verifier bonus
    /// commit together.
    async fn settle_prediction(&self, write: &SettlementWrite) -> TrustResult<bool>;

    // ==================== Statistics ====================

    /// Aggregate store statistics
    async fn stats(&self) -> TrustResult<StorageStats>;
}
