//! Trust Engine Error Types
//!
//! Error taxonomy for the trust and settlement core:
//! - Not-found errors (missing prediction or account)
//! - Conflict errors (duplicate verification, self-verification,
//!   already-settled prediction) — caller mistakes, never retried
//! - Validation errors (malformed input)
//! - Storage errors (opaque backing-store failures)

use thiserror::Error;

use crate::types::{PredictionId, PredictionStatus, WalletAddress};

/// Trust engine result type
pub type TrustResult<T> = Result<T, TrustError>;

/// Trust engine error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrustError {
    /// Referenced prediction does not exist
    #[error("Prediction not found: {id}")]
    PredictionNotFound { id: PredictionId },

    /// Referenced trust account does not exist
    #[error("Trust account not found: {wallet}")]
    AccountNotFound { wallet: WalletAddress },

    /// A wallet attempted to verify its own prediction
    #[error("Wallet {wallet} cannot verify its own prediction")]
    SelfVerificationForbidden { wallet: WalletAddress },

    /// The prediction has already been settled
    #[error("Prediction {id} is already settled as {status}")]
    PredictionAlreadySettled {
        id: PredictionId,
        status: PredictionStatus,
    },

    /// A verification from this wallet already exists for this prediction
    #[error("Wallet {wallet} has already verified prediction {id}")]
    DuplicateVerification {
        id: PredictionId,
        wallet: WalletAddress,
    },

    /// Malformed input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Service wiring error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Backing store failure, opaque to the core
    #[error("Storage error: {0}")]
    Storage(String),
}

impl TrustError {
    /// True for errors caused by a conflicting concurrent or repeated
    /// request rather than bad input or infrastructure failure.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            TrustError::SelfVerificationForbidden { .. }
                | TrustError::PredictionAlreadySettled { .. }
                | TrustError::DuplicateVerification { .. }
        )
    }

    /// True when the referenced entity is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TrustError::PredictionNotFound { .. } | TrustError::AccountNotFound { .. }
        )
    }
}
