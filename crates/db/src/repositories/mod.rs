//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods. Reads take
//! `&SqlitePool`. Writes take any `SqliteExecutor`, so they run standalone
//! against the pool or inside a caller's transaction via `&mut *tx`.

pub mod card_repo;
pub mod holding_repo;
pub mod user_repo;

pub use card_repo::CardRepo;
pub use holding_repo::HoldingRepo;
pub use user_repo::UserRepo;
