//! Trust Ledger
//!
//! Sole owner of trust account mutations. Accounts are created lazily on
//! first reference and never deleted; every delta goes through the storage
//! layer's atomic read-modify-write so concurrent updates for the same
//! wallet serialize instead of losing writes.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use trust_core::{TrustAccount, TrustResult, VerificationResult, WalletAddress};

use crate::storage::TrustStorage;

/// Trust account statistics for one wallet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustStats {
    pub account: TrustAccount,
    /// All predictions authored by this wallet, settled or not
    pub total_predictions: u32,
    /// All verifications this wallet has submitted
    pub total_verifications: u64,
    /// Percentage of settled predictions that were correct; `None` until
    /// at least one prediction has settled
    pub accuracy: Option<u8>,
}

/// Trust Ledger service
#[derive(Clone)]
pub struct TrustLedger {
    storage: Arc<dyn TrustStorage>,
}

impl TrustLedger {
    pub fn new(storage: Arc<dyn TrustStorage>) -> Self {
        Self { storage }
    }

    /// Fetch a wallet's account, creating it with defaults on first use
    pub async fn get_or_create(&self, wallet: &WalletAddress) -> TrustResult<TrustAccount> {
        self.storage.get_or_create_account(wallet).await
    }

    /// Apply a point delta to one wallet.
    ///
    /// `outcome` tags the delta as the resolution of one of the wallet's
    /// predictions; `resolves_pending` decrements its pending counter.
    pub async fn apply_delta(
        &self,
        wallet: &WalletAddress,
        delta: i64,
        outcome: Option<VerificationResult>,
        resolves_pending: bool,
    ) -> TrustResult<TrustAccount> {
        let before = self.storage.get_account(wallet).await?;
        let account = self
            .storage
            .apply_trust_delta(wallet, delta, outcome, resolves_pending)
            .await?;

        let old_level = before.map(|a| a.trust_level).unwrap_or(1);
        if account.trust_level != old_level {
            tracing::info!(
                wallet = %wallet,
                old_level,
                new_level = account.trust_level,
                total_points = account.total_points,
                "Trust level changed"
            );
        }

        Ok(account)
    }

    /// Trust statistics for one wallet.
    ///
    /// Accuracy is derived from the settled-prediction tally for the wallet,
    /// rounded to a whole percentage; `None` while nothing has settled.
    pub async fn stats(&self, wallet: &WalletAddress) -> TrustResult<TrustStats> {
        let account = self.get_or_create(wallet).await?;
        let tally = self.storage.prediction_tally(wallet).await?;
        let total_verifications = self.storage.count_verifications_by(wallet).await?;

        let settled = tally.settled();
        let accuracy = if settled > 0 {
            Some(((tally.correct as f64 / settled as f64) * 100.0).round() as u8)
        } else {
            None
        };

        Ok(TrustStats {
            account,
            total_predictions: tally.total,
            total_verifications,
            accuracy,
        })
    }
}
