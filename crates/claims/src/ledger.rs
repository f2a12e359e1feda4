//! Read-only views: a user's collection and the global leaderboard.
//!
//! Reads go straight to the store without the write gate, so a view may
//! trail an in-flight claim by one commit.

use std::sync::Arc;

use cardclaim_core::leaderboard::{resolve_limit, DEFAULT_LEADERBOARD_LIMIT};
use cardclaim_core::messages;
use cardclaim_core::types::DbId;
use cardclaim_core::users::display_name;
use cardclaim_db::models::holding::HoldingEntry;
use serde::Serialize;

use crate::error::ClaimError;
use crate::store::Store;

/// A user's cards, in first-acquired order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collection {
    pub user_id: DbId,
    pub entries: Vec<HoldingEntry>,
}

impl Collection {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The listing as text, or the empty-collection sentinel.
    pub fn render(&self) -> String {
        messages::collection_message(
            self.entries
                .iter()
                .map(|e| (e.card_name.as_str(), e.rarity.as_str(), e.count)),
        )
    }
}

/// One leaderboard row. `rank` starts at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub rank: usize,
    pub user_id: DbId,
    pub display_name: String,
    pub total_points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leaderboard {
    pub standings: Vec<Standing>,
}

impl Leaderboard {
    pub fn is_empty(&self) -> bool {
        self.standings.is_empty()
    }

    /// The ranking as text, or the empty-leaderboard sentinel.
    pub fn render(&self) -> String {
        messages::leaderboard_message(
            self.standings
                .iter()
                .map(|s| (s.rank, s.display_name.as_str(), s.total_points)),
        )
    }
}

/// Query front for collection and leaderboard requests.
pub struct Ledger {
    store: Arc<dyn Store>,
    default_limit: i64,
}

impl Ledger {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            default_limit: DEFAULT_LEADERBOARD_LIMIT,
        }
    }

    /// Change the leaderboard size used when a request names none.
    pub fn with_default_limit(mut self, default_limit: i64) -> Self {
        self.default_limit = default_limit;
        self
    }

    /// Everything `user_id` has collected. Unknown users get an empty list.
    pub async fn collection(&self, user_id: DbId) -> Result<Collection, ClaimError> {
        let entries = self.store.list_holdings(user_id).await?;
        Ok(Collection { user_id, entries })
    }

    /// The top `limit` users by points, highest first.
    pub async fn leaderboard(&self, limit: Option<i64>) -> Result<Leaderboard, ClaimError> {
        let limit = resolve_limit(limit, self.default_limit)?;
        let rows = self.store.top_users(limit).await?;
        let standings = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| Standing {
                rank: i + 1,
                display_name: display_name(
                    row.user_id,
                    row.first_name.as_deref(),
                    row.username.as_deref(),
                ),
                user_id: row.user_id,
                total_points: row.total_points,
            })
            .collect();
        Ok(Leaderboard { standings })
    }

    /// A user's total points; `0` if unknown.
    pub async fn total_points(&self, user_id: DbId) -> Result<i64, ClaimError> {
        self.store.total_points(user_id).await
    }
}
