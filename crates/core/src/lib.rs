//! Pure domain logic for the card claim ledger.
//!
//! No I/O lives here: ids, timestamps, the cooldown policy, input validation
//! and the text rendering shared by the claim and query paths.

pub mod clock;
pub mod cooldown;
pub mod error;
pub mod leaderboard;
pub mod messages;
pub mod types;
pub mod users;
