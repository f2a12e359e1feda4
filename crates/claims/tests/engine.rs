//! Claim engine and ledger behaviour against the in-memory store.

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use cardclaim_claims::{
    ClaimEngine, ClaimError, ClaimOutcome, Ledger, MemoryStore, StaticCatalog, Store, WriteGate,
};
use cardclaim_core::clock::ManualClock;
use cardclaim_core::cooldown::{CooldownPolicy, DEFAULT_COOLDOWN_SECS};
use cardclaim_core::error::CoreError;
use cardclaim_core::messages;
use cardclaim_db::models::card::Card;
use cardclaim_db::models::user::NewUser;

const START: i64 = 1_700_000_000;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn card(id: i64, points: i64) -> Card {
    Card {
        id,
        name: format!("Card {id}"),
        rarity: (if points >= 50 { "Epic" } else { "Common" }).to_string(),
        points,
        image: format!("card_{id}.png"),
    }
}

struct Harness {
    store: Arc<MemoryStore>,
    clock: Arc<ManualClock>,
    engine: Arc<ClaimEngine>,
    ledger: Ledger,
}

fn harness_with(
    cards: Vec<Card>,
    catalog: Vec<Card>,
    policy: CooldownPolicy,
    gate: WriteGate,
) -> Harness {
    let store = Arc::new(MemoryStore::with_gate(cards, gate));
    let clock = Arc::new(ManualClock::new(START));
    let engine = Arc::new(ClaimEngine::new(
        store.clone(),
        Arc::new(StaticCatalog::new(catalog)),
        clock.clone(),
        policy,
    ));
    let ledger = Ledger::new(store.clone());
    Harness {
        store,
        clock,
        engine,
        ledger,
    }
}

fn harness(cards: Vec<Card>, policy: CooldownPolicy) -> Harness {
    harness_with(cards.clone(), cards, policy, WriteGate::default())
}

fn ann() -> NewUser {
    NewUser::new(1).with_first_name("Ann")
}

// ---------------------------------------------------------------------------
// Eligibility
// ---------------------------------------------------------------------------

#[tokio::test]
async fn first_claim_is_always_eligible() {
    let h = harness(vec![card(1, 10)], CooldownPolicy::default());

    let outcome = h.engine.claim(&ann()).await.unwrap();

    assert_matches!(outcome, ClaimOutcome::Granted(award) => {
        assert_eq!(award.card.id, 1);
        assert_eq!(award.total_points, 10);
    });
    let user = h.store.user(1).await.unwrap();
    assert_eq!(user.last_claim_at, START);
}

#[tokio::test]
async fn claim_inside_cooldown_changes_nothing() {
    let h = harness(vec![card(1, 10)], CooldownPolicy::default());
    h.engine.claim(&ann()).await.unwrap();
    let before = h.store.user(1).await.unwrap();

    h.clock.advance(1000);
    let outcome = h.engine.claim(&ann()).await.unwrap();

    assert_eq!(
        outcome,
        ClaimOutcome::Cooldown {
            remaining_secs: DEFAULT_COOLDOWN_SECS - 1000,
            window_secs: DEFAULT_COOLDOWN_SECS,
        }
    );
    assert_eq!(h.store.user(1).await.unwrap(), before);
    assert_eq!(h.store.holding_count(1, 1).await, Some(1));
}

#[tokio::test]
async fn stamped_user_inside_window_is_rejected() {
    let h = harness(vec![card(1, 10)], CooldownPolicy::default());
    {
        let guard = h.store.gate().enter().await.unwrap();
        h.store.upsert_user(&guard, &ann()).await.unwrap();
        h.store
            .set_last_claim_at(&guard, 1, START - 1000)
            .await
            .unwrap();
    }

    let outcome = h.engine.claim(&ann()).await.unwrap();

    assert_matches!(outcome, ClaimOutcome::Cooldown { remaining_secs: 800, .. });
    assert_eq!(h.store.total_points(1).await.unwrap(), 0);
    assert_eq!(h.store.last_claim_at(1).await.unwrap(), START - 1000);
    assert!(h.store.list_holdings(1).await.unwrap().is_empty());
}

#[tokio::test]
async fn claim_after_window_is_granted() {
    let h = harness(vec![card(1, 10)], CooldownPolicy::default());
    h.engine.claim(&ann()).await.unwrap();

    h.clock.advance(DEFAULT_COOLDOWN_SECS);
    let outcome = h.engine.claim(&ann()).await.unwrap();

    assert!(outcome.is_granted());
    assert_eq!(h.store.total_points(1).await.unwrap(), 20);
    assert_eq!(
        h.store.last_claim_at(1).await.unwrap(),
        START + DEFAULT_COOLDOWN_SECS
    );
}

#[tokio::test]
async fn empty_catalog_is_a_rejection_not_an_error() {
    let h = harness(Vec::new(), CooldownPolicy::default());

    let outcome = h.engine.claim(&ann()).await.unwrap();

    assert_eq!(outcome, ClaimOutcome::EmptyCatalog);
    assert_eq!(outcome.message(), messages::EMPTY_CATALOG);
    // The user is registered but the cooldown never started.
    let user = h.store.user(1).await.unwrap();
    assert_eq!(user.last_claim_at, 0);
    assert_eq!(user.total_points, 0);
}

// ---------------------------------------------------------------------------
// Ledger invariants
// ---------------------------------------------------------------------------

#[tokio::test]
async fn points_are_conserved_across_claims() {
    let cards = vec![card(1, 1), card(2, 7), card(3, 50)];
    let h = harness(cards, CooldownPolicy::new(0).unwrap());

    let mut awarded = 0;
    for _ in 0..25 {
        h.clock.advance(1);
        match h.engine.claim(&ann()).await.unwrap() {
            ClaimOutcome::Granted(award) => {
                awarded += award.card.points;
                assert_eq!(award.total_points, awarded);
            }
            other => panic!("expected a grant, got {other:?}"),
        }
    }

    assert_eq!(h.store.total_points(1).await.unwrap(), awarded);
    let counted: i64 = h
        .store
        .list_holdings(1)
        .await
        .unwrap()
        .iter()
        .map(|e| e.count)
        .sum();
    assert_eq!(counted, 25);
}

#[tokio::test]
async fn same_card_twice_accumulates_one_holding() {
    let h = harness(vec![card(4, 5)], CooldownPolicy::new(0).unwrap());

    h.engine.claim(&ann()).await.unwrap();
    h.clock.advance(1);
    h.engine.claim(&ann()).await.unwrap();

    assert_eq!(h.store.holding_count(1, 4).await, Some(2));
    let collection = h.ledger.collection(1).await.unwrap();
    assert_eq!(collection.entries.len(), 1);
    assert_eq!(collection.entries[0].count, 2);
    assert_eq!(collection.render(), "Your collection:\nCard 4 [Common] 2x");
}

#[tokio::test]
async fn registration_is_idempotent() {
    let h = harness(vec![card(1, 10)], CooldownPolicy::default());
    assert!(h.engine.register(&ann()).await.unwrap());
    h.engine.claim(&ann()).await.unwrap();

    let renamed = NewUser::new(1).with_first_name("Annie").with_username("annie");
    assert!(!h.engine.register(&renamed).await.unwrap());

    let user = h.store.user(1).await.unwrap();
    assert_eq!(user.total_points, 10);
    assert_eq!(user.last_claim_at, START);
    assert_eq!(user.first_name.as_deref(), Some("Ann"));
}

#[tokio::test]
async fn failed_credit_leaves_cooldown_unstarted() {
    // The catalog offers a card the store does not know, so the credit fails.
    let h = harness_with(
        Vec::new(),
        vec![card(9, 10)],
        CooldownPolicy::default(),
        WriteGate::default(),
    );

    let err = h.engine.claim(&ann()).await.unwrap_err();

    assert_matches!(err, ClaimError::UnknownCard(9));
    let user = h.store.user(1).await.unwrap();
    assert_eq!(user.last_claim_at, 0);
    assert_eq!(user.total_points, 0);
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_claims_for_one_user_commit_once() {
    let h = harness(vec![card(1, 10), card(2, 20)], CooldownPolicy::default());

    let (a, b) = tokio::join!(
        {
            let engine = h.engine.clone();
            tokio::spawn(async move { engine.claim(&ann()).await })
        },
        {
            let engine = h.engine.clone();
            tokio::spawn(async move { engine.claim(&ann()).await })
        },
    );
    let outcomes = [a.unwrap().unwrap(), b.unwrap().unwrap()];

    let granted = outcomes.iter().filter(|o| o.is_granted()).count();
    let cooling = outcomes
        .iter()
        .filter(|o| matches!(o, ClaimOutcome::Cooldown { .. }))
        .count();
    assert_eq!((granted, cooling), (1, 1));

    let total: i64 = h.store.list_holdings(1).await.unwrap().iter().map(|e| e.count).sum();
    assert_eq!(total, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_claims_for_different_users_all_commit() {
    let h = harness(vec![card(1, 10)], CooldownPolicy::default());

    let handles: Vec<_> = (1..=20)
        .map(|id| {
            let engine = h.engine.clone();
            tokio::spawn(async move { engine.claim(&NewUser::new(id)).await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().unwrap().is_granted());
    }
    let board = h.ledger.leaderboard(Some(100)).await.unwrap();
    assert_eq!(board.standings.len(), 20);
    assert!(board.standings.iter().all(|s| s.total_points == 10));
}

#[tokio::test]
async fn gate_timeout_is_transient_and_changes_nothing() {
    let h = harness_with(
        vec![card(1, 10)],
        vec![card(1, 10)],
        CooldownPolicy::default(),
        WriteGate::new(Duration::from_millis(50)),
    );

    let held = h.store.gate().enter().await.unwrap();
    let err = h.engine.claim(&ann()).await.unwrap_err();
    drop(held);

    assert_matches!(err, ClaimError::Busy { .. });
    assert!(err.is_transient());
    assert!(h.store.user(1).await.is_none());

    // Retrying once the gate is free succeeds.
    assert!(h.engine.claim(&ann()).await.unwrap().is_granted());
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_identity_is_rejected_before_any_write() {
    let h = harness(vec![card(1, 10)], CooldownPolicy::default());

    let err = h.engine.claim(&NewUser::new(0)).await.unwrap_err();
    assert_matches!(err, ClaimError::Core(CoreError::Validation(_)));

    let long_name = NewUser::new(5).with_first_name("x".repeat(65));
    let err = h.engine.register(&long_name).await.unwrap_err();
    assert_matches!(err, ClaimError::Core(CoreError::Validation(_)));
    assert!(h.store.user(5).await.is_none());
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn leaderboard_ranks_highest_first_and_truncates() {
    let cards = vec![card(1, 5), card(2, 50), card(3, 20)];
    let h = harness(cards, CooldownPolicy::default());
    {
        let guard = h.store.gate().enter().await.unwrap();
        for (user_id, card_id, points) in [(1, 1, 5), (2, 2, 50), (3, 3, 20)] {
            let name = format!("user{user_id}");
            h.store
                .upsert_user(&guard, &NewUser::new(user_id).with_first_name(name))
                .await
                .unwrap();
            h.store
                .credit_claim(&guard, user_id, card_id, points)
                .await
                .unwrap();
        }
    }

    let board = h.ledger.leaderboard(Some(2)).await.unwrap();

    let points: Vec<i64> = board.standings.iter().map(|s| s.total_points).collect();
    assert_eq!(points, vec![50, 20]);
    assert_eq!(board.standings[0].rank, 1);
    assert_eq!(board.standings[0].display_name, "user2");
    assert_eq!(
        board.render(),
        "Top 2 users:\n1. user2: 50 points\n2. user3: 20 points"
    );
}

#[tokio::test]
async fn empty_states_render_sentinels() {
    let h = harness(vec![card(1, 10)], CooldownPolicy::default());

    let collection = h.ledger.collection(42).await.unwrap();
    assert!(collection.is_empty());
    assert_eq!(collection.render(), messages::EMPTY_COLLECTION);

    let board = h.ledger.leaderboard(None).await.unwrap();
    assert!(board.is_empty());
    assert_eq!(board.render(), messages::EMPTY_LEADERBOARD);

    assert_eq!(h.ledger.total_points(42).await.unwrap(), 0);
}

#[tokio::test]
async fn leaderboard_limit_is_validated() {
    let h = harness(Vec::new(), CooldownPolicy::default());
    let err = h.ledger.leaderboard(Some(0)).await.unwrap_err();
    assert_matches!(err, ClaimError::Core(CoreError::Validation(_)));
}
