//! Repository for the `cards` catalog.

use cardclaim_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::card::{Card, CreateCard};

const COLUMNS: &str = "id, name, rarity, points, image";

/// Read access to the card catalog, plus inserts for out-of-band seeding.
pub struct CardRepo;

impl CardRepo {
    /// Insert a catalog entry.
    pub async fn create(pool: &SqlitePool, input: &CreateCard) -> Result<Card, sqlx::Error> {
        let query = format!(
            "INSERT INTO cards (name, rarity, points, image) VALUES (?1, ?2, ?3, ?4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(&input.name)
            .bind(&input.rarity)
            .bind(input.points)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    /// Number of cards in the catalog.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cards")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// The card at position `offset` in id order.
    pub async fn find_by_offset(pool: &SqlitePool, offset: i64) -> Result<Option<Card>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cards ORDER BY id LIMIT 1 OFFSET ?1");
        sqlx::query_as::<_, Card>(&query)
            .bind(offset)
            .fetch_optional(pool)
            .await
    }

    /// Find a card by id.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Card>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cards WHERE id = ?1");
        sqlx::query_as::<_, Card>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Every card, in id order.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Card>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cards ORDER BY id");
        sqlx::query_as::<_, Card>(&query).fetch_all(pool).await
    }
}
