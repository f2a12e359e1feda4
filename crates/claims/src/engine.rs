//! The claim state machine.
//!
//! ```text
//! Checking ──► Eligible ──► Committed
//!     │            │
//!     └──► Rejected(cooldown)
//!                  └──► Rejected(empty catalog)
//! ```
//!
//! The whole sequence, from the user upsert to the re-read of the new total,
//! runs while holding the store's [`WriteGate`](crate::WriteGate). Two claims
//! for the same user therefore see each other's cooldown stamp, and a
//! rejected claim never writes anything but the idempotent upsert.

use std::sync::Arc;

use cardclaim_core::clock::Clock;
use cardclaim_core::cooldown::{CooldownPolicy, CooldownStatus};
use cardclaim_core::error::CoreError;
use cardclaim_core::users::{validate_display_field, validate_user_id};
use cardclaim_db::models::user::NewUser;

use crate::catalog::Catalog;
use crate::error::ClaimError;
use crate::outcome::{Award, ClaimOutcome};
use crate::store::Store;

pub struct ClaimEngine {
    store: Arc<dyn Store>,
    catalog: Arc<dyn Catalog>,
    clock: Arc<dyn Clock>,
    policy: CooldownPolicy,
}

impl ClaimEngine {
    pub fn new(
        store: Arc<dyn Store>,
        catalog: Arc<dyn Catalog>,
        clock: Arc<dyn Clock>,
        policy: CooldownPolicy,
    ) -> Self {
        Self {
            store,
            catalog,
            clock,
            policy,
        }
    }

    /// Register a user on first contact. Idempotent; returns `true` when
    /// the user was new.
    pub async fn register(&self, user: &NewUser) -> Result<bool, ClaimError> {
        validate_new_user(user)?;

        let guard = self.store.gate().enter().await?;
        let created = self.store.upsert_user(&guard, user).await?;
        drop(guard);

        if created {
            tracing::info!(user_id = user.id, "User registered");
        }
        Ok(created)
    }

    /// Try to award a card to `user`.
    pub async fn claim(&self, user: &NewUser) -> Result<ClaimOutcome, ClaimError> {
        validate_new_user(user)?;
        let user_id = user.id;

        let guard = self.store.gate().enter().await?;
        self.store.upsert_user(&guard, user).await?;

        // Checking
        let now = self.clock.now();
        let last_claim_at = self.store.last_claim_at(user_id).await?;
        if let CooldownStatus::Cooling { remaining_secs } = self.policy.check(last_claim_at, now) {
            tracing::debug!(user_id, remaining_secs, "Claim rejected: cooldown active");
            return Ok(ClaimOutcome::Cooldown {
                remaining_secs,
                window_secs: self.policy.window_secs(),
            });
        }

        // Eligible
        let Some(card) = self.catalog.pick_random_card().await? else {
            tracing::warn!(user_id, "Claim rejected: catalog is empty");
            return Ok(ClaimOutcome::EmptyCatalog);
        };

        // Committed
        self.store.commit_claim(&guard, user_id, &card, now).await?;
        let total_points = self.store.total_points(user_id).await?;
        drop(guard);

        tracing::info!(
            user_id,
            card_id = card.id,
            points = card.points,
            total_points,
            "Card claimed",
        );

        Ok(ClaimOutcome::Granted(Award { card, total_points }))
    }
}

fn validate_new_user(user: &NewUser) -> Result<(), CoreError> {
    validate_user_id(user.id)?;
    validate_display_field("username", user.username.as_deref())?;
    validate_display_field("first_name", user.first_name.as_deref())?;
    validate_display_field("last_name", user.last_name.as_deref())?;
    Ok(())
}
