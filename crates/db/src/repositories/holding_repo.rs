//! Repository for the `holdings` table.

use cardclaim_core::types::DbId;
use sqlx::{SqliteExecutor, SqlitePool};

use crate::models::holding::{Holding, HoldingEntry};

/// Provides holding increments and collection listings.
pub struct HoldingRepo;

impl HoldingRepo {
    /// Create the `(user, card)` holding with count 1, or bump its count.
    pub async fn increment<'e>(
        executor: impl SqliteExecutor<'e>,
        user_id: DbId,
        card_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO holdings (user_id, card_id, count) VALUES (?1, ?2, 1) \
             ON CONFLICT (user_id, card_id) DO UPDATE SET count = count + 1",
        )
        .bind(user_id)
        .bind(card_id)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Find the holding for one `(user, card)` pair.
    pub async fn find(
        pool: &SqlitePool,
        user_id: DbId,
        card_id: DbId,
    ) -> Result<Option<Holding>, sqlx::Error> {
        sqlx::query_as::<_, Holding>(
            "SELECT user_id, card_id, count FROM holdings WHERE user_id = ?1 AND card_id = ?2",
        )
        .bind(user_id)
        .bind(card_id)
        .fetch_optional(pool)
        .await
    }

    /// A user's collection in the order cards were first acquired.
    pub async fn list_for_user(
        pool: &SqlitePool,
        user_id: DbId,
    ) -> Result<Vec<HoldingEntry>, sqlx::Error> {
        sqlx::query_as::<_, HoldingEntry>(
            "SELECT c.name AS card_name, c.rarity, h.count \
             FROM holdings h \
             JOIN cards c ON c.id = h.card_id \
             WHERE h.user_id = ?1 \
             ORDER BY h.rowid",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// `Σ(points × count)` over a user's holdings. Must always equal the
    /// user's `total_points`.
    pub async fn points_value(pool: &SqlitePool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let (value,): (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(c.points * h.count), 0) \
             FROM holdings h \
             JOIN cards c ON c.id = h.card_id \
             WHERE h.user_id = ?1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(value)
    }
}
