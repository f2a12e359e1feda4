//! Row models and DTOs, one module per table.

pub mod card;
pub mod holding;
pub mod user;
