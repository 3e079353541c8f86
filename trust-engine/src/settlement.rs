//! Settlement Engine
//!
//! The core state machine: decides after each verification whether a
//! prediction has reached quorum, computes the majority outcome, updates
//! the author's ledger entry and pays bonuses to majority-side verifiers —
//! as one atomic storage unit.
//!
//! `try_finalize` is idempotent and safe under races: the decision is
//! computed from a snapshot, then applied through a conditional write that
//! only succeeds while the prediction is still `pending`. Of two racing
//! finalization attempts exactly one transitions the status; the other sees
//! a lost compare-and-set and becomes a no-op.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use chrono::Utc;
use trust_core::{
    PredictionId, PredictionStatus, SettlementPolicy, TrustResult, WalletAddress,
};

use crate::storage::{SettlementWrite, TrustStorage};

/// Result of a completed settlement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementOutcome {
    pub prediction_id: PredictionId,
    pub status: PredictionStatus,
    pub author_wallet: WalletAddress,
    /// Point delta applied to the author
    pub author_delta: i64,
    /// Majority-side verifiers who received the bonus
    pub verifiers_paid: Vec<WalletAddress>,
}

/// Settlement engine service
#[derive(Clone)]
pub struct SettlementEngine {
    storage: Arc<dyn TrustStorage>,
    policy: SettlementPolicy,
}

impl SettlementEngine {
    pub fn new(storage: Arc<dyn TrustStorage>, policy: SettlementPolicy) -> Self {
        Self { storage, policy }
    }

    pub fn policy(&self) -> &SettlementPolicy {
        &self.policy
    }

    /// Attempt to finalize a prediction.
    ///
    /// No-op (`Ok(None)`) when the prediction is already settled, quorum
    /// has not been reached, or a concurrent attempt settled it first.
    /// A storage failure aborts the whole operation with nothing written;
    /// the prediction stays `pending` and the next verification retries.
    pub async fn try_finalize(
        &self,
        prediction_id: &PredictionId,
    ) -> TrustResult<Option<SettlementOutcome>> {
        let Some((prediction, verifications)) = self
            .storage
            .get_prediction_with_verifications(prediction_id)
            .await?
        else {
            return Ok(None);
        };

        let Some(decision) = self.policy.evaluate(&prediction) else {
            return Ok(None);
        };

        let winners: Vec<WalletAddress> = verifications
            .iter()
            .filter(|v| v.result == decision.winning_result)
            .map(|v| v.verifier_wallet.clone())
            .collect();

        let bonus = self.policy.verifier_bonus();
        let write = SettlementWrite {
            prediction_id: prediction_id.clone(),
            new_status: decision.status,
            finalized_at: Utc::now(),
            author_delta: decision.author_delta,
            author_outcome: decision.winning_result,
            bonuses: winners.iter().map(|w| (w.clone(), bonus)).collect(),
        };

        if !self.storage.settle_prediction(&write).await? {
            // Lost the race to a concurrent finalization.
            tracing::debug!(
                prediction_id = %prediction_id,
                "Settlement skipped, prediction already finalized"
            );
            return Ok(None);
        }

        tracing::info!(
            prediction_id = %prediction_id,
            status = %decision.status,
            author = %prediction.author_wallet,
            author_delta = decision.author_delta,
            verifiers_paid = winners.len(),
            "Prediction settled"
        );

        Ok(Some(SettlementOutcome {
            prediction_id: prediction_id.clone(),
            status: decision.status,
            author_wallet: prediction.author_wallet,
            author_delta: decision.author_delta,
            verifiers_paid: winners,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStorage;
    use trust_core::{
        ParentRef, Prediction, TrustConfig, Verification, VerificationResult,
    };

    async fn setup(votes: &[(&str, VerificationResult)]) -> (Arc<MemoryStorage>, SettlementEngine, PredictionId) {
        let storage = Arc::new(MemoryStorage::new());
        let engine = SettlementEngine::new(
            storage.clone(),
            SettlementPolicy::new(TrustConfig::default()),
        );

        let prediction = Prediction::new(
            PredictionId::new("pred:1"),
            "claim",
            WalletAddress::new("0xauthor"),
            ParentRef::None,
            None,
        );
        let id = prediction.id.clone();
        storage.insert_prediction(prediction).await.unwrap();

        for (wallet, result) in votes {
            storage
                .record_verification(Verification::new(
                    id.clone(),
                    WalletAddress::new(*wallet),
                    *result,
                    1,
                ))
                .await
                .unwrap();
        }

        (storage, engine, id)
    }

    #[tokio::test]
    async fn test_below_quorum_no_op() {
        let (_, engine, id) = setup(&[
            ("0xv1", VerificationResult::Correct),
            ("0xv2", VerificationResult::Correct),
        ])
        .await;

        assert!(engine.try_finalize(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_majority_correct_pays_winners() {
        let (storage, engine, id) = setup(&[
            ("0xv1", VerificationResult::Correct),
            ("0xv2", VerificationResult::Correct),
            ("0xv3", VerificationResult::Incorrect),
        ])
        .await;

        let outcome = engine.try_finalize(&id).await.unwrap().unwrap();
        assert_eq!(outcome.status, PredictionStatus::Correct);
        assert_eq!(outcome.author_delta, 50);
        assert_eq!(outcome.verifiers_paid.len(), 2);

        let author = storage
            .get_account(&WalletAddress::new("0xauthor"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(author.total_points, 50);
        assert_eq!(author.correct_count, 1);
        assert_eq!(author.pending_count, 0);

        let winner = storage
            .get_account(&WalletAddress::new("0xv1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(winner.total_points, 10);

        let loser = storage
            .get_account(&WalletAddress::new("0xv3"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loser.total_points, 0);
    }

    #[tokio::test]
    async fn test_double_finalize_is_idempotent() {
        let (storage, engine, id) = setup(&[
            ("0xv1", VerificationResult::Correct),
            ("0xv2", VerificationResult::Correct),
            ("0xv3", VerificationResult::Correct),
        ])
        .await;

        assert!(engine.try_finalize(&id).await.unwrap().is_some());
        assert!(engine.try_finalize(&id).await.unwrap().is_none());
        assert!(engine.try_finalize(&id).await.unwrap().is_none());

        // Points applied exactly once.
        let author = storage
            .get_account(&WalletAddress::new("0xauthor"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(author.total_points, 50);
        assert_eq!(author.correct_count, 1);
    }

    #[tokio::test]
    async fn test_missing_prediction_is_no_op() {
        let storage = Arc::new(MemoryStorage::new());
        let engine = SettlementEngine::new(
            storage,
            SettlementPolicy::new(TrustConfig::default()),
        );
        let result = engine
            .try_finalize(&PredictionId::new("pred:missing"))
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
