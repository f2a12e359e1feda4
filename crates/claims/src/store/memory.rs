use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use cardclaim_core::types::{DbId, UnixSeconds};
use cardclaim_db::models::card::Card;
use cardclaim_db::models::holding::{Holding, HoldingEntry};
use cardclaim_db::models::user::{NewUser, User, UserStanding};
use tokio::sync::RwLock;

use super::Store;
use crate::error::ClaimError;
use crate::gate::{WriteGate, WriteGuard};

/// In-process [`Store`] with the same gate contract as [`SqliteStore`].
///
/// Holds its own card definitions so collection listings can resolve card
/// names. Nothing is persisted.
///
/// [`SqliteStore`]: super::SqliteStore
pub struct MemoryStore {
    gate: WriteGate,
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    users: BTreeMap<DbId, User>,
    cards: HashMap<DbId, Card>,
    /// Insertion order doubles as first-acquired order.
    holdings: Vec<Holding>,
}

impl MemoryStore {
    pub fn new(cards: Vec<Card>) -> Self {
        Self::with_gate(cards, WriteGate::default())
    }

    pub fn with_gate(cards: Vec<Card>, gate: WriteGate) -> Self {
        let cards = cards.into_iter().map(|c| (c.id, c)).collect();
        Self {
            gate,
            state: RwLock::new(MemoryState {
                cards,
                ..MemoryState::default()
            }),
        }
    }

    /// Snapshot of a user row.
    pub async fn user(&self, user_id: DbId) -> Option<User> {
        self.state.read().await.users.get(&user_id).cloned()
    }

    /// Holding count for one `(user, card)` pair.
    pub async fn holding_count(&self, user_id: DbId, card_id: DbId) -> Option<i64> {
        self.state
            .read()
            .await
            .holdings
            .iter()
            .find(|h| h.user_id == user_id && h.card_id == card_id)
            .map(|h| h.count)
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn gate(&self) -> &WriteGate {
        &self.gate
    }

    async fn upsert_user(
        &self,
        _guard: &WriteGuard<'_>,
        user: &NewUser,
    ) -> Result<bool, ClaimError> {
        let mut state = self.state.write().await;
        if state.users.contains_key(&user.id) {
            return Ok(false);
        }
        state.users.insert(
            user.id,
            User {
                id: user.id,
                username: user.username.clone(),
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                total_points: 0,
                last_claim_at: 0,
            },
        );
        Ok(true)
    }

    async fn total_points(&self, user_id: DbId) -> Result<i64, ClaimError> {
        let state = self.state.read().await;
        Ok(state.users.get(&user_id).map_or(0, |u| u.total_points))
    }

    async fn last_claim_at(&self, user_id: DbId) -> Result<UnixSeconds, ClaimError> {
        let state = self.state.read().await;
        Ok(state.users.get(&user_id).map_or(0, |u| u.last_claim_at))
    }

    async fn set_last_claim_at(
        &self,
        _guard: &WriteGuard<'_>,
        user_id: DbId,
        at: UnixSeconds,
    ) -> Result<(), ClaimError> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(&user_id)
            .ok_or(ClaimError::UnknownUser(user_id))?;
        user.last_claim_at = user.last_claim_at.max(at);
        Ok(())
    }

    async fn credit_claim(
        &self,
        _guard: &WriteGuard<'_>,
        user_id: DbId,
        card_id: DbId,
        points: i64,
    ) -> Result<(), ClaimError> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        // Validate both sides before touching anything.
        if !state.cards.contains_key(&card_id) {
            return Err(ClaimError::UnknownCard(card_id));
        }
        let user = state
            .users
            .get_mut(&user_id)
            .ok_or(ClaimError::UnknownUser(user_id))?;
        user.total_points += points;

        match state
            .holdings
            .iter_mut()
            .find(|h| h.user_id == user_id && h.card_id == card_id)
        {
            Some(holding) => holding.count += 1,
            None => state.holdings.push(Holding {
                user_id,
                card_id,
                count: 1,
            }),
        }
        Ok(())
    }

    async fn list_holdings(&self, user_id: DbId) -> Result<Vec<HoldingEntry>, ClaimError> {
        let state = self.state.read().await;
        Ok(state
            .holdings
            .iter()
            .filter(|h| h.user_id == user_id)
            .filter_map(|h| {
                state.cards.get(&h.card_id).map(|card| HoldingEntry {
                    card_name: card.name.clone(),
                    rarity: card.rarity.clone(),
                    count: h.count,
                })
            })
            .collect())
    }

    async fn top_users(&self, limit: i64) -> Result<Vec<UserStanding>, ClaimError> {
        let state = self.state.read().await;
        let mut standings: Vec<UserStanding> = state
            .users
            .values()
            .map(|u| UserStanding {
                user_id: u.id,
                username: u.username.clone(),
                first_name: u.first_name.clone(),
                total_points: u.total_points,
            })
            .collect();
        standings.sort_by(|a, b| {
            b.total_points
                .cmp(&a.total_points)
                .then(a.user_id.cmp(&b.user_id))
        });
        standings.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(standings)
    }
}
