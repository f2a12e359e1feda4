//! Card catalog rows.

use cardclaim_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `cards` table.
///
/// `image` is a filename relative to the card artwork directory; the claim
/// path returns it untouched.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Card {
    pub id: DbId,
    pub name: String,
    pub rarity: String,
    pub points: i64,
    pub image: String,
}

/// DTO for inserting a catalog entry (out-of-band population and tests).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCard {
    pub name: String,
    pub rarity: String,
    pub points: i64,
    pub image: String,
}
