//! In-memory storage implementation
//!
//! Thread-safe in-memory backend, used for tests and development. The whole
//! store lives behind a single `RwLock`, so every trait method commits under
//! one write guard, the in-memory equivalent of a database transaction.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use trust_core::{
    Prediction, PredictionId, TrustAccount, TrustError, TrustResult, Verification,
    VerificationId, VerificationResult, WalletAddress,
};

use super::{
    PredictionFilter, PredictionTally, SettlementWrite, StorageStats, TrustStorage,
};

#[derive(Debug, Default)]
struct ForumState {
    accounts: HashMap<WalletAddress, TrustAccount>,
    predictions: HashMap<PredictionId, Prediction>,
    verifications: HashMap<VerificationId, Verification>,
    // Uniqueness index: at most one verification per (prediction, verifier)
    verifier_index: HashMap<(PredictionId, WalletAddress), VerificationId>,
    by_prediction: HashMap<PredictionId, Vec<VerificationId>>,
}

impl ForumState {
    fn account_entry(&mut self, wallet: &WalletAddress) -> &mut TrustAccount {
        self.accounts
            .entry(wallet.clone())
            .or_insert_with(|| TrustAccount::new(wallet.clone()))
    }
}

/// In-memory store guarded by a single `RwLock`
#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: RwLock<ForumState>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all data (test helper)
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        *state = ForumState::default();
    }
}

#[async_trait]
impl TrustStorage for MemoryStorage {
    // ==================== Account operations ====================

    async fn get_account(&self, wallet: &WalletAddress) -> TrustResult<Option<TrustAccount>> {
        let state = self.state.read().await;
        Ok(state.accounts.get(wallet).cloned())
    }

    async fn get_or_create_account(&self, wallet: &WalletAddress) -> TrustResult<TrustAccount> {
        let mut state = self.state.write().await;
        Ok(state.account_entry(wallet).clone())
    }

    async fn apply_trust_delta(
        &self,
        wallet: &WalletAddress,
        delta: i64,
        outcome: Option<VerificationResult>,
        resolves_pending: bool,
    ) -> TrustResult<TrustAccount> {
        let mut state = self.state.write().await;
        let account = state.account_entry(wallet);
        account.apply_delta(delta, outcome, resolves_pending);
        Ok(account.clone())
    }

    // ==================== Prediction operations ====================

    async fn insert_prediction(&self, prediction: Prediction) -> TrustResult<Prediction> {
        let mut state = self.state.write().await;
        state.account_entry(&prediction.author_wallet).add_pending();
        state
            .predictions
            .insert(prediction.id.clone(), prediction.clone());
        Ok(prediction)
    }

    async fn get_prediction(&self, id: &PredictionId) -> TrustResult<Option<Prediction>> {
        let state = self.state.read().await;
        Ok(state.predictions.get(id).cloned())
    }

    async fn get_prediction_with_verifications(
        &self,
        id: &PredictionId,
    ) -> TrustResult<Option<(Prediction, Vec<Verification>)>> {
        let state = self.state.read().await;
        let Some(prediction) = state.predictions.get(id).cloned() else {
            return Ok(None);
        };
        let verifications = state
            .by_prediction
            .get(id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|vid| state.verifications.get(vid).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(Some((prediction, verifications)))
    }

    async fn list_predictions(&self, filter: &PredictionFilter) -> TrustResult<Vec<Prediction>> {
        let state = self.state.read().await;
        let mut matches: Vec<Prediction> = state
            .predictions
            .values()
            .filter(|p| {
                filter
                    .author
                    .as_ref()
                    .map_or(true, |w| &p.author_wallet == w)
            })
            .filter(|p| filter.status.map_or(true, |s| p.status == s))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = filter.limit {
            matches.truncate(limit);
        }
        Ok(matches)
    }

    async fn prediction_tally(&self, author: &WalletAddress) -> TrustResult<PredictionTally> {
        let state = self.state.read().await;
        let mut tally = PredictionTally::default();
        for prediction in state.predictions.values() {
            if &prediction.author_wallet != author {
                continue;
            }
            tally.total += 1;
            match prediction.status {
                trust_core::PredictionStatus::Correct => tally.correct += 1,
                trust_core::PredictionStatus::Incorrect => tally.incorrect += 1,
                trust_core::PredictionStatus::Pending => {}
            }
        }
        Ok(tally)
    }

    // ==================== Verification operations ====================

    async fn record_verification(
        &self,
        verification: Verification,
    ) -> TrustResult<Verification> {
        let mut state = self.state.write().await;

        // All preconditions re-checked under the write guard.
        let prediction = state
            .predictions
            .get(&verification.prediction_id)
            .ok_or_else(|| TrustError::PredictionNotFound {
                id: verification.prediction_id.clone(),
            })?;

        if prediction.author_wallet == verification.verifier_wallet {
            return Err(TrustError::SelfVerificationForbidden {
                wallet: verification.verifier_wallet,
            });
        }
        if prediction.is_settled() {
            return Err(TrustError::PredictionAlreadySettled {
                id: verification.prediction_id,
                status: prediction.status,
            });
        }

        let key = (
            verification.prediction_id.clone(),
            verification.verifier_wallet.clone(),
        );
        if state.verifier_index.contains_key(&key) {
            return Err(TrustError::DuplicateVerification {
                id: verification.prediction_id,
                wallet: verification.verifier_wallet,
            });
        }

        // Lazy account for the verifier; no point change yet.
        state.account_entry(&verification.verifier_wallet);

        if let Some(prediction) = state.predictions.get_mut(&verification.prediction_id) {
            prediction.record_vote(verification.result);
        }

        state.verifier_index.insert(key, verification.id.clone());
        state
            .by_prediction
            .entry(verification.prediction_id.clone())
            .or_default()
            .push(verification.id.clone());
        state
            .verifications
            .insert(verification.id.clone(), verification.clone());

        Ok(verification)
    }

    async fn get_verification(
        &self,
        prediction_id: &PredictionId,
        wallet: &WalletAddress,
    ) -> TrustResult<Option<Verification>> {
        let state = self.state.read().await;
        let key = (prediction_id.clone(), wallet.clone());
        Ok(state
            .verifier_index
            .get(&key)
            .and_then(|vid| state.verifications.get(vid))
            .cloned())
    }

    async fn list_verifications(
        &self,
        prediction_id: &PredictionId,
    ) -> TrustResult<Vec<Verification>> {
        let state = self.state.read().await;
        Ok(state
            .by_prediction
            .get(prediction_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|vid| state.verifications.get(vid).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn count_verifications_by(&self, wallet: &WalletAddress) -> TrustResult<u64> {
        let state = self.state.read().await;
        Ok(state
            .verifications
            .values()
            .filter(|v| &v.verifier_wallet == wallet)
            .count() as u64)
    }

    // ==================== Settlement ====================

    async fn settle_prediction(&self, write: &SettlementWrite) -> TrustResult<bool> {
        let mut state = self.state.write().await;

        let prediction = state
            .predictions
            .get_mut(&write.prediction_id)
            .ok_or_else(|| TrustError::PredictionNotFound {
                id: write.prediction_id.clone(),
            })?;

        // Conditional update: only one settlement may transition the status.
        if prediction.is_settled() {
            return Ok(false);
        }

        let author = prediction.author_wallet.clone();
        prediction.finalize(write.new_status, write.finalized_at);

        state.account_entry(&author).apply_delta(
            write.author_delta,
            Some(write.author_outcome),
            true,
        );

        for (wallet, bonus) in &write.bonuses {
            state.account_entry(wallet).apply_delta(*bonus, None, false);
        }

        Ok(true)
    }

    // ==================== Statistics ====================

    async fn stats(&self) -> TrustResult<StorageStats> {
        let state = self.state.read().await;
        let settled = state
            .predictions
            .values()
            .filter(|p| p.is_settled())
            .count() as u64;
        Ok(StorageStats {
            total_accounts: state.accounts.len() as u64,
            total_predictions: state.predictions.len() as u64,
            pending_predictions: state.predictions.len() as u64 - settled,
            settled_predictions: settled,
            total_verifications: state.verifications.len() as u64,
        })
    }
}
