//! Trust account entity
//!
//! One row per wallet. Created lazily on first reference, never deleted.
//! The trust level is always recomputed from the point total; no code path
//! sets it independently.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{VerificationResult, WalletAddress};
use crate::levels::level_from_points;

/// Per-wallet trust balance and settlement counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustAccount {
    /// Owning wallet
    pub wallet: WalletAddress,
    /// Accumulated points, clamped at zero
    pub total_points: i64,
    /// Tier derived from `total_points`, in 1..=5
    pub trust_level: u8,
    /// Predictions by this wallet settled as correct
    pub correct_count: u32,
    /// Predictions by this wallet settled as incorrect
    pub incorrect_count: u32,
    /// Predictions by this wallet still awaiting settlement
    pub pending_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TrustAccount {
    /// Create a fresh account with zero points at level 1
    pub fn new(wallet: WalletAddress) -> Self {
        let now = Utc::now();
        Self {
            wallet,
            total_points: 0,
            trust_level: level_from_points(0),
            correct_count: 0,
            incorrect_count: 0,
            pending_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a point delta in one read-modify-write step.
    ///
    /// The point total is clamped at zero and the level recomputed from the
    /// new total. `outcome`, when present, tags the delta as the resolution
    /// of one of this wallet's predictions and bumps the matching counter.
    /// `resolves_pending` decrements `pending_count`, floored at zero.
    ///
    /// Callers must hold whatever lock or transaction makes the step atomic
    /// with respect to other writers of the same wallet.
    pub fn apply_delta(
        &mut self,
        delta: i64,
        outcome: Option<VerificationResult>,
        resolves_pending: bool,
    ) {
        self.total_points = (self.total_points + delta).max(0);
        self.trust_level = level_from_points(self.total_points);

        match outcome {
            Some(VerificationResult::Correct) => self.correct_count += 1,
            Some(VerificationResult::Incorrect) => self.incorrect_count += 1,
            None => {}
        }

        if resolves_pending {
            self.pending_count = self.pending_count.saturating_sub(1);
        }

        self.updated_at = Utc::now();
    }

    /// Register a newly created pending prediction by this wallet
    pub fn add_pending(&mut self) {
        self.pending_count += 1;
        self.updated_at = Utc::now();
    }

    /// Number of settled predictions by this wallet
    pub fn settled_count(&self) -> u32 {
        self.correct_count + self.incorrect_count
    }
}
