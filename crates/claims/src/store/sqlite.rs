use async_trait::async_trait;
use cardclaim_core::types::{DbId, UnixSeconds};
use cardclaim_db::models::card::Card;
use cardclaim_db::models::holding::HoldingEntry;
use cardclaim_db::models::user::{NewUser, UserStanding};
use cardclaim_db::repositories::{HoldingRepo, UserRepo};
use cardclaim_db::DbPool;

use super::Store;
use crate::error::ClaimError;
use crate::gate::{WriteGate, WriteGuard};

/// [`Store`] backed by the SQLite schema in `cardclaim-db`.
pub struct SqliteStore {
    pool: DbPool,
    gate: WriteGate,
}

impl SqliteStore {
    pub fn new(pool: DbPool, gate: WriteGate) -> Self {
        Self { pool, gate }
    }
}

#[async_trait]
impl Store for SqliteStore {
    fn gate(&self) -> &WriteGate {
        &self.gate
    }

    async fn upsert_user(
        &self,
        _guard: &WriteGuard<'_>,
        user: &NewUser,
    ) -> Result<bool, ClaimError> {
        Ok(UserRepo::upsert(&self.pool, user).await?)
    }

    async fn total_points(&self, user_id: DbId) -> Result<i64, ClaimError> {
        Ok(UserRepo::total_points(&self.pool, user_id).await?)
    }

    async fn last_claim_at(&self, user_id: DbId) -> Result<UnixSeconds, ClaimError> {
        Ok(UserRepo::last_claim_at(&self.pool, user_id).await?)
    }

    async fn set_last_claim_at(
        &self,
        _guard: &WriteGuard<'_>,
        user_id: DbId,
        at: UnixSeconds,
    ) -> Result<(), ClaimError> {
        Ok(UserRepo::set_last_claim_at(&self.pool, user_id, at).await?)
    }

    async fn credit_claim(
        &self,
        _guard: &WriteGuard<'_>,
        user_id: DbId,
        card_id: DbId,
        points: i64,
    ) -> Result<(), ClaimError> {
        let mut tx = self.pool.begin().await?;
        UserRepo::add_points(&mut *tx, user_id, points).await?;
        HoldingRepo::increment(&mut *tx, user_id, card_id).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn commit_claim(
        &self,
        _guard: &WriteGuard<'_>,
        user_id: DbId,
        card: &Card,
        at: UnixSeconds,
    ) -> Result<(), ClaimError> {
        let mut tx = self.pool.begin().await?;
        UserRepo::add_points(&mut *tx, user_id, card.points).await?;
        HoldingRepo::increment(&mut *tx, user_id, card.id).await?;
        UserRepo::set_last_claim_at(&mut *tx, user_id, at).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn list_holdings(&self, user_id: DbId) -> Result<Vec<HoldingEntry>, ClaimError> {
        Ok(HoldingRepo::list_for_user(&self.pool, user_id).await?)
    }

    async fn top_users(&self, limit: i64) -> Result<Vec<UserStanding>, ClaimError> {
        Ok(UserRepo::top(&self.pool, limit).await?)
    }
}
