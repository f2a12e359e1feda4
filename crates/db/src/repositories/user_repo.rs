//! Repository for the `users` table.

use cardclaim_core::types::{DbId, UnixSeconds};
use sqlx::{SqliteExecutor, SqlitePool};

use crate::models::user::{NewUser, User, UserStanding};

const COLUMNS: &str = "id, username, first_name, last_name, total_points, last_claim_at";

/// Provides registration, point and cooldown operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a user with zero points and no cooldown stamp.
    ///
    /// Existing rows are left untouched (names included). Returns `true` when
    /// a new row was created.
    pub async fn upsert<'e>(
        executor: impl SqliteExecutor<'e>,
        user: &NewUser,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO users (id, username, first_name, last_name, total_points, last_claim_at) \
             VALUES (?1, ?2, ?3, ?4, 0, 0) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Find a user by id.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = ?1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Total points for a user; `0` when the user is unknown.
    pub async fn total_points(pool: &SqlitePool, id: DbId) -> Result<i64, sqlx::Error> {
        let points: Option<(i64,)> = sqlx::query_as("SELECT total_points FROM users WHERE id = ?1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(points.map_or(0, |(p,)| p))
    }

    /// Last successful claim time; `0` when unknown or never claimed.
    pub async fn last_claim_at(pool: &SqlitePool, id: DbId) -> Result<UnixSeconds, sqlx::Error> {
        let stamp: Option<(i64,)> = sqlx::query_as("SELECT last_claim_at FROM users WHERE id = ?1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(stamp.map_or(0, |(s,)| s))
    }

    /// Stamp the cooldown. The stored value never moves backwards.
    pub async fn set_last_claim_at<'e>(
        executor: impl SqliteExecutor<'e>,
        id: DbId,
        at: UnixSeconds,
    ) -> Result<(), sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET last_claim_at = MAX(last_claim_at, ?2) WHERE id = ?1",
        )
        .bind(id)
        .bind(at)
        .execute(executor)
        .await?;
        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(())
    }

    /// Add `points` to a user's total. Fails with `RowNotFound` for an
    /// unknown user so a surrounding transaction rolls back.
    pub async fn add_points<'e>(
        executor: impl SqliteExecutor<'e>,
        id: DbId,
        points: i64,
    ) -> Result<(), sqlx::Error> {
        let result = sqlx::query("UPDATE users SET total_points = total_points + ?2 WHERE id = ?1")
            .bind(id)
            .bind(points)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(())
    }

    /// Highest totals first; ties go to the lower user id.
    pub async fn top(pool: &SqlitePool, limit: i64) -> Result<Vec<UserStanding>, sqlx::Error> {
        sqlx::query_as::<_, UserStanding>(
            "SELECT id AS user_id, username, first_name, total_points \
             FROM users \
             ORDER BY total_points DESC, id ASC \
             LIMIT ?1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
