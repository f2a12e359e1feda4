//! Claim engine and ledger queries for the card collection game.
//!
//! ```text
//!   claim ──► ClaimEngine ──► WriteGate (one writer at a time)
//!                  │              │
//!                  ├──► Catalog   └──► Store (upsert, cooldown, credit)
//!                  ▼
//!             ClaimOutcome
//!
//!   collection / leaderboard ──► Ledger ──► Store (reads, no gate)
//! ```

pub mod catalog;
pub mod engine;
pub mod error;
pub mod gate;
pub mod ledger;
pub mod outcome;
pub mod store;

pub use catalog::{Catalog, SqliteCatalog, StaticCatalog};
pub use engine::ClaimEngine;
pub use error::ClaimError;
pub use gate::{WriteGate, WriteGuard};
pub use ledger::{Collection, Leaderboard, Ledger, Standing};
pub use outcome::{Award, ClaimOutcome};
pub use store::{MemoryStore, SqliteStore, Store};
