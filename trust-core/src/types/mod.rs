//! Core entity and identifier types

mod account;
mod ids;
mod prediction;
mod verification;

pub use account::TrustAccount;
pub use ids::{CommentId, PostId, PredictionId, VerificationId, WalletAddress};
pub use prediction::{Prediction, PredictionStatus};
pub use verification::{Verification, VerificationResult};

use serde::{Deserialize, Serialize};

/// What a prediction is attached to.
///
/// Replaces the pair of independently nullable post/comment references with
/// a tagged union, so the both-set case cannot be represented. Free-standing
/// predictions (`None`) remain legal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ParentRef {
    Post(PostId),
    Comment(CommentId),
    #[default]
    None,
}

impl ParentRef {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn post_id(&self) -> Option<&PostId> {
        match self {
            Self::Post(id) => Some(id),
            _ => None,
        }
    }

    pub fn comment_id(&self) -> Option<&CommentId> {
        match self {
            Self::Comment(id) => Some(id),
            _ => None,
        }
    }
}
