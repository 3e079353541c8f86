//! Races through the service facade
//!
//! Conflicting writers must resolve to exactly one winner with every point
//! applied exactly once.

use std::sync::Arc;

use trust_core::{ParentRef, PredictionStatus, TrustConfig, VerificationResult, WalletAddress};
use trust_engine::{MemoryStorage, TrustLedger, TrustService, TrustStorage};

fn service() -> Arc<TrustService> {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
    let service = TrustService::builder()
        .storage(Arc::new(MemoryStorage::new()))
        .config(TrustConfig::default())
        .build()
        .expect("service builds");
    Arc::new(service)
}

/// Two tasks submit the same wallet's verification concurrently; exactly
/// one lands, and the vote counts reflect a single vote.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_duplicate_verifications() {
    let service = service();
    let prediction = service
        .create_prediction("claim", WalletAddress::new("author"), ParentRef::None, None)
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..2 {
        let service = service.clone();
        let id = prediction.id.clone();
        handles.push(tokio::spawn(async move {
            service
                .add_verification(&id, WalletAddress::new("v1"), VerificationResult::Correct)
                .await
        }));
    }

    let mut successes = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(err) => {
                assert!(err.is_conflict(), "unexpected error: {err}");
                conflicts += 1;
            }
        }
    }
    assert_eq!(successes, 1);
    assert_eq!(conflicts, 1);

    let after = service.get_prediction(&prediction.id).await.unwrap();
    assert_eq!(after.total_verifiers, 1);
    assert_eq!(after.correct_votes, 1);
}

/// Many distinct verifiers race past the quorum threshold; the prediction
/// settles exactly once and the author is paid exactly once.
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn racing_verifications_settle_once() {
    let service = service();
    let author = WalletAddress::new("author");
    let prediction = service
        .create_prediction("claim", author.clone(), ParentRef::None, None)
        .await
        .unwrap();

    let mut handles = Vec::new();
    for i in 0..8 {
        let service = service.clone();
        let id = prediction.id.clone();
        handles.push(tokio::spawn(async move {
            service
                .add_verification(
                    &id,
                    WalletAddress::new(format!("v{i}")),
                    VerificationResult::Correct,
                )
                .await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            // Late arrivals bounce off the settled prediction.
            Err(err) => assert!(err.is_conflict(), "unexpected error: {err}"),
        }
    }
    assert!(successes >= 3, "quorum never formed: {successes} successes");

    let settled = service.get_prediction(&prediction.id).await.unwrap();
    assert_eq!(settled.status, PredictionStatus::Correct);

    // Author reward applied exactly once regardless of how the race played
    // out.
    let account = service.get_or_create_trust(&author).await.unwrap();
    assert_eq!(account.total_points, 50);
    assert_eq!(account.correct_count, 1);
    assert_eq!(account.pending_count, 0);

    // Each winning verifier is paid the bonus at most once.
    for i in 0..8 {
        let verifier = service
            .get_or_create_trust(&WalletAddress::new(format!("v{i}")))
            .await
            .unwrap();
        assert!(verifier.total_points == 0 || verifier.total_points == 10);
    }
}

/// Concurrent deltas against a single wallet are all applied; none are
/// lost to interleaving.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_deltas_do_not_lose_updates() {
    let storage: Arc<dyn TrustStorage> = Arc::new(MemoryStorage::new());
    let ledger = TrustLedger::new(storage);
    let wallet = WalletAddress::new("hot");

    let mut handles = Vec::new();
    for _ in 0..20 {
        let ledger = ledger.clone();
        let wallet = wallet.clone();
        handles.push(tokio::spawn(async move {
            ledger.apply_delta(&wallet, 10, None, false).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let account = ledger.get_or_create(&wallet).await.unwrap();
    assert_eq!(account.total_points, 200);
    assert_eq!(account.trust_level, 2);
}
