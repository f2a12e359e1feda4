//! Uniform random card selection.

use async_trait::async_trait;
use cardclaim_db::models::card::Card;
use cardclaim_db::repositories::CardRepo;
use cardclaim_db::DbPool;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::error::ClaimError;

/// Supplies the card to award. Draws are independent and with replacement,
/// so duplicates are expected.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// A uniformly chosen card, or `None` when the catalog is empty.
    async fn pick_random_card(&self) -> Result<Option<Card>, ClaimError>;
}

/// Draws from the `cards` table: count the rows, pick a uniform offset.
pub struct SqliteCatalog {
    pool: DbPool,
}

impl SqliteCatalog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Catalog for SqliteCatalog {
    async fn pick_random_card(&self) -> Result<Option<Card>, ClaimError> {
        let count = CardRepo::count(&self.pool).await?;
        if count == 0 {
            return Ok(None);
        }
        let offset = rand::rng().random_range(0..count);
        // A concurrent out-of-band delete can shrink the table under us;
        // that reads as an empty draw rather than an error.
        Ok(CardRepo::find_by_offset(&self.pool, offset).await?)
    }
}

/// A fixed in-memory card list.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    cards: Vec<Card>,
}

impl StaticCatalog {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}

#[async_trait]
impl Catalog for StaticCatalog {
    async fn pick_random_card(&self) -> Result<Option<Card>, ClaimError> {
        Ok(self.cards.choose(&mut rand::rng()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn card(id: i64) -> Card {
        Card {
            id,
            name: format!("Card {id}"),
            rarity: "Common".to_string(),
            points: id,
            image: format!("{id}.png"),
        }
    }

    #[tokio::test]
    async fn empty_catalog_yields_none() {
        let catalog = StaticCatalog::default();
        assert!(catalog.pick_random_card().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn draws_only_known_cards_and_reaches_all() {
        let catalog = StaticCatalog::new((1..=3).map(card).collect());
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let drawn = catalog.pick_random_card().await.unwrap().unwrap();
            assert!((1..=3).contains(&drawn.id));
            seen.insert(drawn.id);
        }
        assert_eq!(seen.len(), 3, "500 uniform draws should hit every card");
    }
}
