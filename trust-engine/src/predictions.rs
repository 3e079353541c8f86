//! Prediction Store
//!
//! Creates and reads prediction records. Creation ensures the author's
//! trust account exists and increments its pending counter in the same
//! storage unit. Status transitions are reserved to the settlement engine;
//! no operation here mutates a prediction's status.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use trust_core::{
    ParentRef, Prediction, PredictionId, TrustError, TrustResult, WalletAddress,
};

use crate::storage::{PredictionFilter, TrustStorage};

/// Prediction store service
#[derive(Clone)]
pub struct PredictionStore {
    storage: Arc<dyn TrustStorage>,
}

impl PredictionStore {
    pub fn new(storage: Arc<dyn TrustStorage>) -> Self {
        Self { storage }
    }

    /// Create a new pending prediction.
    ///
    /// Side effect: the author's account is created if absent and its
    /// pending count incremented, atomically with the insert.
    pub async fn create(
        &self,
        content: impl Into<String>,
        author_wallet: WalletAddress,
        parent: ParentRef,
        deadline: Option<DateTime<Utc>>,
    ) -> TrustResult<Prediction> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(TrustError::Validation(
                "prediction content must not be empty".to_string(),
            ));
        }
        if author_wallet.is_empty() {
            return Err(TrustError::Validation(
                "author wallet must not be empty".to_string(),
            ));
        }

        let prediction = Prediction::new(
            PredictionId::generate(),
            content,
            author_wallet,
            parent,
            deadline,
        );
        let prediction = self.storage.insert_prediction(prediction).await?;

        tracing::debug!(
            prediction_id = %prediction.id,
            author = %prediction.author_wallet,
            "Prediction created"
        );

        Ok(prediction)
    }

    /// Fetch a prediction; `PredictionNotFound` when missing
    pub async fn get(&self, id: &PredictionId) -> TrustResult<Prediction> {
        self.storage
            .get_prediction(id)
            .await?
            .ok_or_else(|| TrustError::PredictionNotFound { id: id.clone() })
    }

    /// List predictions matching a filter, newest first
    pub async fn list(&self, filter: &PredictionFilter) -> TrustResult<Vec<Prediction>> {
        self.storage.list_predictions(filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStorage;
    use trust_core::{PostId, PredictionStatus};

    fn store() -> (Arc<MemoryStorage>, PredictionStore) {
        let storage = Arc::new(MemoryStorage::new());
        (storage.clone(), PredictionStore::new(storage))
    }

    #[tokio::test]
    async fn test_create_initializes_pending() {
        let (_, store) = store();
        let prediction = store
            .create(
                "BTC above 100k by March",
                WalletAddress::new("0xauthor"),
                ParentRef::Post(PostId::new("post:1")),
                None,
            )
            .await
            .unwrap();

        assert_eq!(prediction.status, PredictionStatus::Pending);
        assert_eq!(prediction.total_verifiers, 0);
        assert_eq!(prediction.parent.post_id().unwrap().as_str(), "post:1");
    }

    #[tokio::test]
    async fn test_create_ensures_author_account() {
        let (storage, store) = store();
        store
            .create("claim", WalletAddress::new("0xauthor"), ParentRef::None, None)
            .await
            .unwrap();

        let account = storage
            .get_account(&WalletAddress::new("0xauthor"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(account.pending_count, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_content() {
        let (_, store) = store();
        let err = store
            .create("   ", WalletAddress::new("0xauthor"), ParentRef::None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, TrustError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let (_, store) = store();
        let err = store.get(&PredictionId::new("pred:missing")).await.unwrap_err();
        assert!(matches!(err, TrustError::PredictionNotFound { .. }));
    }
}
