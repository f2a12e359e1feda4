//! Per-user card holdings.

use cardclaim_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `holdings` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Holding {
    pub user_id: DbId,
    pub card_id: DbId,
    pub count: i64,
}

/// A holding joined with its card, as shown in a collection listing.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct HoldingEntry {
    pub card_name: String,
    pub rarity: String,
    pub count: i64,
}
