//! User rows and registration DTO.

use cardclaim_core::types::{DbId, UnixSeconds};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub total_points: i64,
    pub last_claim_at: UnixSeconds,
}

/// Identity and display fields supplied by the chat platform on every
/// interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewUser {
    pub id: DbId,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl NewUser {
    pub fn new(id: DbId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

/// A leaderboard row: identity plus points, ordered by the query.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct UserStanding {
    pub user_id: DbId,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub total_points: i64,
}
