//! Trust Core - Domain Logic for Prediction Settlement
//!
//! Pure domain layer for a community forum's trust system: wallet-identified
//! users tag posts or comments as predictions, other users verify them as
//! correct or incorrect, and settled outcomes feed a per-wallet reputation
//! score.
//!
//! This crate holds everything that can be expressed without storage or
//! async:
//! - **Entities**: [`TrustAccount`], [`Prediction`], [`Verification`],
//!   identifier newtypes, [`ParentRef`]
//! - **Trust levels**: the points-to-level step function in [`levels`]
//! - **Settlement policy**: quorum and majority decision in [`SettlementPolicy`]
//! - **Configuration**: [`TrustConfig`] / [`MigrationConfig`]
//! - **Errors**: the [`TrustError`] taxonomy shared with the engine
//!
//! # Invariants
//!
//! | Invariant | Enforced by |
//! |-----------|-------------|
//! | `trust_level == level_from_points(total_points)` | `TrustAccount::apply_delta` recomputes on every mutation |
//! | `total_points >= 0` | delta application clamps at zero |
//! | `total_verifiers == correct_votes + incorrect_votes` | `Prediction::record_vote` is the only tally writer |
//! | `pending -> {correct, incorrect}` only, terminal | `SettlementPolicy::evaluate` refuses settled input; the engine's conditional write does the rest |

pub mod config;
pub mod error;
pub mod levels;
pub mod settlement;
pub mod types;

pub use config::{MigrationConfig, TrustConfig};
pub use error::{TrustError, TrustResult};
pub use levels::{level_from_points, level_min_points, level_title};
pub use settlement::{SettlementDecision, SettlementPolicy};
pub use types::{
    CommentId, ParentRef, PostId, Prediction, PredictionId, PredictionStatus, TrustAccount,
    Verification, VerificationId, VerificationResult, WalletAddress,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_reexports_compose() {
        let account = TrustAccount::new(WalletAddress::new("0xabc"));
        assert_eq!(account.trust_level, level_from_points(account.total_points));
    }
}
