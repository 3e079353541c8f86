//! Verification Collector
//!
//! Records one verification per (prediction, verifier) pair and triggers
//! settlement after every accepted verification. Finalization is attempted
//! on write, never on a timer.

use std::sync::Arc;

use trust_core::{
    PredictionId, TrustError, TrustResult, Verification, VerificationResult, WalletAddress,
};

use crate::settlement::SettlementEngine;
use crate::storage::TrustStorage;

/// Verification collector service
#[derive(Clone)]
pub struct VerificationCollector {
    storage: Arc<dyn TrustStorage>,
    settlement: SettlementEngine,
}

impl VerificationCollector {
    pub fn new(storage: Arc<dyn TrustStorage>, settlement: SettlementEngine) -> Self {
        Self {
            storage,
            settlement,
        }
    }

    /// Record a verification.
    ///
    /// Fails with a distinct error per precondition:
    /// - [`TrustError::PredictionNotFound`]: no such prediction
    /// - [`TrustError::SelfVerificationForbidden`]: verifier authored it
    /// - [`TrustError::PredictionAlreadySettled`]: no longer `pending`
    /// - [`TrustError::DuplicateVerification`]: this wallet already voted
    ///
    /// On success the verifier's account exists (created lazily, no point
    /// change), the verification carries a snapshot of the verifier's
    /// current trust level, the prediction's tally is bumped atomically with
    /// the insert, and settlement is attempted unconditionally.
    pub async fn add(
        &self,
        prediction_id: &PredictionId,
        verifier_wallet: WalletAddress,
        result: VerificationResult,
    ) -> TrustResult<Verification> {
        // Fail-fast checks; the storage layer re-checks all of these under
        // the write guard that performs the insert.
        let prediction = self
            .storage
            .get_prediction(prediction_id)
            .await?
            .ok_or_else(|| TrustError::PredictionNotFound {
                id: prediction_id.clone(),
            })?;

        if prediction.author_wallet == verifier_wallet {
            return Err(TrustError::SelfVerificationForbidden {
                wallet: verifier_wallet,
            });
        }
        if prediction.is_settled() {
            return Err(TrustError::PredictionAlreadySettled {
                id: prediction_id.clone(),
                status: prediction.status,
            });
        }

        // Snapshot of the verifier's trust level at verification time.
        let verifier_account = self.storage.get_or_create_account(&verifier_wallet).await?;

        let verification = Verification::new(
            prediction_id.clone(),
            verifier_wallet,
            result,
            verifier_account.trust_level,
        );
        let verification = self.storage.record_verification(verification).await?;

        tracing::debug!(
            prediction_id = %prediction_id,
            verifier = %verification.verifier_wallet,
            result = %verification.result,
            "Verification recorded"
        );

        // Trigger-on-write: every verification attempts finalization.
        self.settlement.try_finalize(prediction_id).await?;

        Ok(verification)
    }

    /// One wallet's verification of a prediction, if it has voted
    pub async fn user_verification(
        &self,
        prediction_id: &PredictionId,
        wallet: &WalletAddress,
    ) -> TrustResult<Option<Verification>> {
        self.storage.get_verification(prediction_id, wallet).await
    }

    /// All verifications recorded for a prediction
    pub async fn list(&self, prediction_id: &PredictionId) -> TrustResult<Vec<Verification>> {
        self.storage.list_verifications(prediction_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStorage;
    use trust_core::{
        ParentRef, Prediction, SettlementPolicy, TrustConfig,
    };

    async fn setup() -> (Arc<MemoryStorage>, VerificationCollector, PredictionId) {
        let storage = Arc::new(MemoryStorage::new());
        let settlement = SettlementEngine::new(
            storage.clone(),
            SettlementPolicy::new(TrustConfig::default()),
        );
        let collector = VerificationCollector::new(storage.clone(), settlement);

        let prediction = Prediction::new(
            PredictionId::new("pred:1"),
            "claim",
            WalletAddress::new("0xauthor"),
            ParentRef::None,
            None,
        );
        let id = prediction.id.clone();
        storage.insert_prediction(prediction).await.unwrap();

        (storage, collector, id)
    }

    #[tokio::test]
    async fn test_add_records_snapshot_and_tally() {
        let (storage, collector, id) = setup().await;

        let verification = collector
            .add(&id, WalletAddress::new("0xv1"), VerificationResult::Correct)
            .await
            .unwrap();
        assert_eq!(verification.verifier_trust_level, 1);

        let prediction = storage.get_prediction(&id).await.unwrap().unwrap();
        assert_eq!(prediction.correct_votes, 1);
        assert_eq!(prediction.total_verifiers, 1);
    }

    #[tokio::test]
    async fn test_unknown_prediction_rejected() {
        let (_, collector, _) = setup().await;
        let err = collector
            .add(
                &PredictionId::new("pred:nope"),
                WalletAddress::new("0xv1"),
                VerificationResult::Correct,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, TrustError::PredictionNotFound { .. }));
    }

    #[tokio::test]
    async fn test_author_cannot_verify_own_prediction() {
        let (_, collector, id) = setup().await;
        let err = collector
            .add(
                &id,
                WalletAddress::new("0xauthor"),
                VerificationResult::Correct,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, TrustError::SelfVerificationForbidden { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_rejected() {
        let (_, collector, id) = setup().await;
        collector
            .add(&id, WalletAddress::new("0xv1"), VerificationResult::Correct)
            .await
            .unwrap();
        let err = collector
            .add(&id, WalletAddress::new("0xv1"), VerificationResult::Correct)
            .await
            .unwrap_err();
        assert!(matches!(err, TrustError::DuplicateVerification { .. }));
    }

    #[tokio::test]
    async fn test_quorum_crossing_settles() {
        let (storage, collector, id) = setup().await;

        collector
            .add(&id, WalletAddress::new("0xv1"), VerificationResult::Correct)
            .await
            .unwrap();
        collector
            .add(&id, WalletAddress::new("0xv2"), VerificationResult::Correct)
            .await
            .unwrap();

        // Still pending below quorum.
        assert!(!storage.get_prediction(&id).await.unwrap().unwrap().is_settled());

        collector
            .add(&id, WalletAddress::new("0xv3"), VerificationResult::Incorrect)
            .await
            .unwrap();

        let prediction = storage.get_prediction(&id).await.unwrap().unwrap();
        assert!(prediction.is_settled());
        assert!(prediction.finalized_at.is_some());
    }

    #[tokio::test]
    async fn test_settled_prediction_rejects_further_votes() {
        let (_, collector, id) = setup().await;
        for wallet in ["0xv1", "0xv2", "0xv3"] {
            collector
                .add(&id, WalletAddress::new(wallet), VerificationResult::Correct)
                .await
                .unwrap();
        }

        let err = collector
            .add(&id, WalletAddress::new("0xv4"), VerificationResult::Correct)
            .await
            .unwrap_err();
        assert!(matches!(err, TrustError::PredictionAlreadySettled { .. }));
    }
}
