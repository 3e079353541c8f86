//! Trust Engine - Verification Collection and Prediction Settlement
//!
//! Async engine for the forum trust system. Wallet-identified users tag
//! posts or comments as predictions; other users verify them; once a quorum
//! of verifiers has voted, the prediction settles by majority and the
//! reputation ledger updates atomically.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  API layer (out of scope)                │
//! ├──────────────────────────────────────────────────────────┤
//! │  TrustService facade                                     │
//! │  ┌───────────┬────────────────┬────────────────────────┐ │
//! │  │ Prediction│  Verification  │   Settlement Engine    │ │
//! │  │   Store   │   Collector    │  (quorum / majority /  │ │
//! │  │           │                │   atomic payout)       │ │
//! │  ├───────────┴───────┬────────┴────────────────────────┤ │
//! │  │    Trust Ledger   │        Migration stub           │ │
//! │  └───────────────────┴─────────────────────────────────┘ │
//! ├──────────────────────────────────────────────────────────┤
//! │  TrustStorage trait  →  MemoryStorage                    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Concurrency
//!
//! Request handlers run concurrently with no background scheduler.
//! Settlement is triggered synchronously after every verification and stays
//! correct under races through a conditional status write: only the attempt
//! that wins the compare-and-set applies ledger updates, every other
//! attempt is a no-op. All multi-entity mutations are single atomic storage
//! units.
//!
//! # Logging
//!
//! Structured `tracing` fields throughout: `prediction_id`, `wallet`,
//! `status`, `author_delta`. Settlements log at INFO, per-verification flow
//! at DEBUG.

pub mod ledger;
pub mod migration;
pub mod predictions;
pub mod service;
pub mod settlement;
pub mod storage;
pub mod verifications;

pub use ledger::{TrustLedger, TrustStats};
pub use migration::{
    MigrationEligibility, MigrationOutcome, MigrationRequest, MigrationService, MigrationStatus,
};
pub use predictions::PredictionStore;
pub use service::{TrustService, TrustServiceBuilder};
pub use settlement::{SettlementEngine, SettlementOutcome};
pub use storage::memory::MemoryStorage;
pub use storage::{
    PredictionFilter, PredictionTally, SettlementWrite, StorageStats, TrustStorage,
};
pub use verifications::VerificationCollector;

// Re-export the domain crate for convenience
pub use trust_core;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
