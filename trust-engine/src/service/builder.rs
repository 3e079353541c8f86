//! Trust service builder

use std::sync::Arc;

use trust_core::{MigrationConfig, SettlementPolicy, TrustConfig, TrustError, TrustResult};

use crate::ledger::TrustLedger;
use crate::migration::MigrationService;
use crate::predictions::PredictionStore;
use crate::settlement::SettlementEngine;
use crate::storage::TrustStorage;
use crate::verifications::VerificationCollector;

use super::TrustService;

/// Builder for [`TrustService`]. Storage is required; configuration falls
/// back to defaults.
pub struct TrustServiceBuilder {
    storage: Option<Arc<dyn TrustStorage>>,
    config: Option<TrustConfig>,
    migration_config: Option<MigrationConfig>,
}

impl TrustServiceBuilder {
    pub fn new() -> Self {
        Self {
            storage: None,
            config: None,
            migration_config: None,
        }
    }

    pub fn storage(mut self, storage: Arc<dyn TrustStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn config(mut self, config: TrustConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn migration_config(mut self, config: MigrationConfig) -> Self {
        self.migration_config = Some(config);
        self
    }

    /// Build the service, validating configuration
    pub fn build(self) -> TrustResult<TrustService> {
        let storage = self
            .storage
            .ok_or_else(|| TrustError::Configuration("storage is required".to_string()))?;
        let config = self.config.unwrap_or_default();
        config.validate()?;
        let migration_config = self.migration_config.unwrap_or_default();

        let policy = SettlementPolicy::new(config);
        let ledger = TrustLedger::new(storage.clone());
        let predictions = PredictionStore::new(storage.clone());
        let settlement = SettlementEngine::new(storage.clone(), policy);
        let verifications = VerificationCollector::new(storage.clone(), settlement.clone());
        let migration = MigrationService::new(ledger.clone(), migration_config);

        Ok(TrustService {
            config,
            storage,
            ledger,
            predictions,
            verifications,
            settlement,
            migration,
        })
    }
}

impl Default for TrustServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
