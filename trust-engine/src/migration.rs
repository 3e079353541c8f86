//! SBT migration stub
//!
//! Reports whether a wallet's reputation is eligible to migrate to an
//! on-chain soulbound token and records simulated migration requests. No
//! chain is ever called: the service carries its configuration (enabled
//! flag, contract handle) explicitly so real wiring can be injected later,
//! and with the chain disabled every request parks as `Pending`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use trust_core::{MigrationConfig, TrustAccount, TrustResult, WalletAddress};

use crate::ledger::TrustLedger;

/// Migration state of a wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationStatus {
    /// No migration requested
    None,
    /// Request recorded, waiting for the chain integration
    Pending,
    /// Token minted on chain (unreachable while the stub is chain-less)
    Migrated,
}

/// Eligibility report for one wallet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationEligibility {
    pub can_migrate: bool,
    pub account: TrustAccount,
}

/// A recorded migration request with the reputation snapshot it would carry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationRequest {
    pub wallet: WalletAddress,
    pub total_points: i64,
    pub trust_level: u8,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub requested_at: DateTime<Utc>,
    pub status: MigrationStatus,
}

/// Outcome of a migration attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationOutcome {
    pub success: bool,
    pub status: MigrationStatus,
    pub tx_hash: Option<String>,
    pub message: Option<String>,
}

/// SBT migration service.
///
/// Constructed explicitly with its dependencies; never a process-wide
/// singleton.
pub struct MigrationService {
    ledger: TrustLedger,
    config: MigrationConfig,
    requests: Arc<RwLock<HashMap<WalletAddress, MigrationRequest>>>,
}

impl MigrationService {
    pub fn new(ledger: TrustLedger, config: MigrationConfig) -> Self {
        Self {
            ledger,
            config,
            requests: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// Eligibility: minimum trust level reached and at least one settled
    /// prediction on record.
    pub async fn eligibility(&self, wallet: &WalletAddress) -> TrustResult<MigrationEligibility> {
        let account = self.ledger.get_or_create(wallet).await?;
        let can_migrate =
            account.trust_level >= self.config.min_trust_level && account.settled_count() >= 1;
        Ok(MigrationEligibility {
            can_migrate,
            account,
        })
    }

    /// Migration state of a wallet (`None` until a request is recorded)
    pub async fn status(&self, wallet: &WalletAddress) -> MigrationStatus {
        self.requests
            .read()
            .await
            .get(wallet)
            .map(|r| r.status)
            .unwrap_or(MigrationStatus::None)
    }

    /// Request a migration.
    ///
    /// With the chain disabled the request is recorded with a reputation
    /// snapshot and parked as `Pending`; nothing is minted.
    pub async fn request_migration(&self, wallet: &WalletAddress) -> TrustResult<MigrationOutcome> {
        let eligibility = self.eligibility(wallet).await?;
        if !eligibility.can_migrate {
            return Ok(MigrationOutcome {
                success: false,
                status: MigrationStatus::None,
                tx_hash: None,
                message: Some(format!(
                    "migration requires trust level {} and at least one settled prediction",
                    self.config.min_trust_level
                )),
            });
        }

        if !self.config.blockchain_enabled {
            let account = &eligibility.account;
            let request = MigrationRequest {
                wallet: wallet.clone(),
                total_points: account.total_points,
                trust_level: account.trust_level,
                correct_count: account.correct_count,
                incorrect_count: account.incorrect_count,
                requested_at: Utc::now(),
                status: MigrationStatus::Pending,
            };
            self.requests.write().await.insert(wallet.clone(), request);

            tracing::info!(wallet = %wallet, "Migration request recorded, chain integration pending");

            return Ok(MigrationOutcome {
                success: false,
                status: MigrationStatus::Pending,
                tx_hash: None,
                message: Some("blockchain migration is not yet enabled; request recorded".to_string()),
            });
        }

        // Unreachable while the stub ships with blockchain_enabled == false;
        // the real mint-and-sync flow plugs in here.
        Ok(MigrationOutcome {
            success: false,
            status: MigrationStatus::None,
            tx_hash: None,
            message: Some("chain integration is not implemented".to_string()),
        })
    }

    /// Push the current reputation snapshot to an already-minted token.
    /// Always refused while the chain integration is disabled.
    pub async fn sync_to_chain(&self, wallet: &WalletAddress) -> TrustResult<MigrationOutcome> {
        let status = self.status(wallet).await;
        Ok(MigrationOutcome {
            success: false,
            status,
            tx_hash: None,
            message: Some("blockchain connection is not enabled".to_string()),
        })
    }
}
