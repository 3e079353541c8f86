//! Trust service facade
//!
//! Wires the ledger, prediction store, verification collector, settlement
//! engine and migration stub over one shared storage handle, and exposes
//! the operations the surrounding API layer calls. The HTTP surface itself
//! lives outside this crate.

mod builder;

pub use builder::TrustServiceBuilder;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use trust_core::{
    ParentRef, Prediction, PredictionId, TrustAccount, TrustConfig, TrustResult, Verification,
    VerificationResult, WalletAddress,
};

use crate::ledger::{TrustLedger, TrustStats};
use crate::migration::{MigrationEligibility, MigrationOutcome, MigrationService};
use crate::predictions::PredictionStore;
use crate::settlement::SettlementEngine;
use crate::storage::{PredictionFilter, StorageStats, TrustStorage};
use crate::verifications::VerificationCollector;

/// Entry point for external collaborators
pub struct TrustService {
    pub(crate) config: TrustConfig,
    pub(crate) storage: Arc<dyn TrustStorage>,
    pub(crate) ledger: TrustLedger,
    pub(crate) predictions: PredictionStore,
    pub(crate) verifications: VerificationCollector,
    pub(crate) settlement: SettlementEngine,
    pub(crate) migration: MigrationService,
}

impl TrustService {
    /// Start building a service
    pub fn builder() -> TrustServiceBuilder {
        TrustServiceBuilder::new()
    }

    pub fn config(&self) -> &TrustConfig {
        &self.config
    }

    /// Create a prediction attached to a post, a comment, or nothing
    pub async fn create_prediction(
        &self,
        content: impl Into<String>,
        author_wallet: WalletAddress,
        parent: ParentRef,
        deadline: Option<DateTime<Utc>>,
    ) -> TrustResult<Prediction> {
        self.predictions
            .create(content, author_wallet, parent, deadline)
            .await
    }

    /// Fetch a prediction
    pub async fn get_prediction(&self, id: &PredictionId) -> TrustResult<Prediction> {
        self.predictions.get(id).await
    }

    /// List predictions, newest first
    pub async fn list_predictions(
        &self,
        filter: &PredictionFilter,
    ) -> TrustResult<Vec<Prediction>> {
        self.predictions.list(filter).await
    }

    /// Record a verification and attempt settlement
    pub async fn add_verification(
        &self,
        prediction_id: &PredictionId,
        verifier_wallet: WalletAddress,
        result: VerificationResult,
    ) -> TrustResult<Verification> {
        self.verifications
            .add(prediction_id, verifier_wallet, result)
            .await
    }

    /// One wallet's verification of a prediction, if any
    pub async fn user_verification(
        &self,
        prediction_id: &PredictionId,
        wallet: &WalletAddress,
    ) -> TrustResult<Option<Verification>> {
        self.verifications.user_verification(prediction_id, wallet).await
    }

    /// Fetch or lazily create a wallet's trust account
    pub async fn get_or_create_trust(&self, wallet: &WalletAddress) -> TrustResult<TrustAccount> {
        self.ledger.get_or_create(wallet).await
    }

    /// Trust statistics for a wallet
    pub async fn get_trust_stats(&self, wallet: &WalletAddress) -> TrustResult<TrustStats> {
        self.ledger.stats(wallet).await
    }

    /// SBT migration eligibility for a wallet
    pub async fn migration_eligibility(
        &self,
        wallet: &WalletAddress,
    ) -> TrustResult<MigrationEligibility> {
        self.migration.eligibility(wallet).await
    }

    /// Request an SBT migration (stub: records and parks the request)
    pub async fn request_migration(&self, wallet: &WalletAddress) -> TrustResult<MigrationOutcome> {
        self.migration.request_migration(wallet).await
    }

    /// Direct settlement attempt; normally driven by `add_verification`
    pub async fn try_finalize(
        &self,
        prediction_id: &PredictionId,
    ) -> TrustResult<Option<crate::settlement::SettlementOutcome>> {
        self.settlement.try_finalize(prediction_id).await
    }

    /// Aggregate storage statistics
    pub async fn storage_stats(&self) -> TrustResult<StorageStats> {
        self.storage.stats().await
    }
}
