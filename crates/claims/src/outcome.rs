use cardclaim_core::messages;
use cardclaim_db::models::card::Card;
use serde::Serialize;

/// What a claim request resolved to.
///
/// Only `Granted` changed any state; the other two are normal policy
/// rejections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClaimOutcome {
    Granted(Award),
    Cooldown {
        remaining_secs: i64,
        window_secs: i64,
    },
    EmptyCatalog,
}

/// The card handed out by a committed claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Award {
    pub card: Card,
    /// The user's total after this claim was credited.
    pub total_points: i64,
}

impl ClaimOutcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, ClaimOutcome::Granted(_))
    }

    /// Reply text for the user.
    pub fn message(&self) -> String {
        match self {
            ClaimOutcome::Granted(award) => messages::claim_caption(
                &award.card.name,
                &award.card.rarity,
                award.card.points,
                award.total_points,
            ),
            ClaimOutcome::Cooldown {
                remaining_secs,
                window_secs,
            } => messages::cooldown_notice(*window_secs, *remaining_secs),
            ClaimOutcome::EmptyCatalog => messages::EMPTY_CATALOG.to_string(),
        }
    }
}
