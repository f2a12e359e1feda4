use std::sync::Arc;

use cardclaim_claims::{ClaimEngine, Ledger, SqliteCatalog, SqliteStore, WriteGate};
use cardclaim_core::clock::SystemClock;
use cardclaim_core::cooldown::CooldownPolicy;
use cardclaim_core::error::CoreError;
use cardclaim_core::leaderboard::resolve_limit;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything heavy sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (health checks).
    pub pool: cardclaim_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Claim state machine; owns the store's write gate.
    pub engine: Arc<ClaimEngine>,
    /// Read-only collection and leaderboard queries.
    pub ledger: Arc<Ledger>,
}

impl AppState {
    /// Wire the SQLite store, catalog and system clock into a claim engine.
    ///
    /// Fails if the configured cooldown or default leaderboard size is out
    /// of range.
    pub fn new(pool: cardclaim_db::DbPool, config: ServerConfig) -> Result<Self, CoreError> {
        let policy = CooldownPolicy::new(config.claims.cooldown_secs)?;
        let leaderboard_limit = resolve_limit(None, config.claims.leaderboard_limit)?;
        let store = Arc::new(SqliteStore::new(
            pool.clone(),
            WriteGate::new(config.claims.write_lock_timeout),
        ));
        let engine = ClaimEngine::new(
            store.clone(),
            Arc::new(SqliteCatalog::new(pool.clone())),
            Arc::new(SystemClock),
            policy,
        );
        let ledger = Ledger::new(store).with_default_limit(leaderboard_limit);

        Ok(Self {
            pool,
            config: Arc::new(config),
            engine: Arc::new(engine),
            ledger: Arc::new(ledger),
        })
    }
}
