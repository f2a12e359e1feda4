//! Persistence seam for the claim engine.
//!
//! [`Store`] is implemented by [`SqliteStore`] for production and
//! [`MemoryStore`] for tests. Both own a [`WriteGate`]; mutators demand a
//! guard from it, reads do not.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use cardclaim_core::types::{DbId, UnixSeconds};
use cardclaim_db::models::card::Card;
use cardclaim_db::models::holding::HoldingEntry;
use cardclaim_db::models::user::{NewUser, UserStanding};

use crate::error::ClaimError;
use crate::gate::{WriteGate, WriteGuard};

#[async_trait]
pub trait Store: Send + Sync {
    /// The serialization point all mutators run under.
    fn gate(&self) -> &WriteGate;

    /// Insert the user with zero points if absent; keep everything if
    /// present. Returns `true` when a new user was created.
    async fn upsert_user(&self, guard: &WriteGuard<'_>, user: &NewUser) -> Result<bool, ClaimError>;

    /// `0` for unknown users.
    async fn total_points(&self, user_id: DbId) -> Result<i64, ClaimError>;

    /// `0` for unknown users and users who never claimed.
    async fn last_claim_at(&self, user_id: DbId) -> Result<UnixSeconds, ClaimError>;

    async fn set_last_claim_at(
        &self,
        guard: &WriteGuard<'_>,
        user_id: DbId,
        at: UnixSeconds,
    ) -> Result<(), ClaimError>;

    /// Bump the `(user, card)` holding and add `points` to the user's total,
    /// all or nothing.
    async fn credit_claim(
        &self,
        guard: &WriteGuard<'_>,
        user_id: DbId,
        card_id: DbId,
        points: i64,
    ) -> Result<(), ClaimError>;

    /// Credit `card` and stamp the cooldown at `at`.
    ///
    /// The default runs the credit first so a failure in between leaves the
    /// cooldown unstarted. Stores that can do both in one transaction
    /// should override this.
    async fn commit_claim(
        &self,
        guard: &WriteGuard<'_>,
        user_id: DbId,
        card: &Card,
        at: UnixSeconds,
    ) -> Result<(), ClaimError> {
        self.credit_claim(guard, user_id, card.id, card.points).await?;
        self.set_last_claim_at(guard, user_id, at).await
    }

    /// The user's collection; empty for unknown users.
    async fn list_holdings(&self, user_id: DbId) -> Result<Vec<HoldingEntry>, ClaimError>;

    /// At most `limit` users, highest total first, ties by ascending id.
    async fn top_users(&self, limit: i64) -> Result<Vec<UserStanding>, ClaimError>;
}
