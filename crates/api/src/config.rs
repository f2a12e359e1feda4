use std::path::PathBuf;
use std::time::Duration;

use cardclaim_core::cooldown::DEFAULT_COOLDOWN_SECS;
use cardclaim_core::leaderboard::DEFAULT_LEADERBOARD_LIMIT;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// SQLite URL (default: `sqlite://cardclaim.db`).
    pub database_url: String,
    /// Claim policy knobs.
    pub claims: ClaimConfig,
}

/// Claim and query policy.
#[derive(Debug, Clone)]
pub struct ClaimConfig {
    /// Seconds between successful claims.
    pub cooldown_secs: i64,
    /// Longest a writer waits for the store's write gate.
    pub write_lock_timeout: Duration,
    /// Leaderboard size when a request does not name one.
    pub leaderboard_limit: i64,
    /// Directory card image references are resolved against.
    pub cards_dir: PathBuf,
}

impl Default for ClaimConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
            write_lock_timeout: Duration::from_secs(5),
            leaderboard_limit: DEFAULT_LEADERBOARD_LIMIT,
            cards_dir: PathBuf::from("cards"),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                  |
    /// |---------------------------|--------------------------|
    /// | `HOST`                    | `0.0.0.0`                |
    /// | `PORT`                    | `3000`                   |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`  |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                     |
    /// | `DATABASE_URL`            | `sqlite://cardclaim.db`  |
    /// | `CLAIM_COOLDOWN_SECS`     | `1800`                   |
    /// | `WRITE_LOCK_TIMEOUT_SECS` | `5`                      |
    /// | `LEADERBOARD_LIMIT`       | `10`                     |
    /// | `CARDS_DIR`               | `cards`                  |
    ///
    /// Panics on unparseable values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://cardclaim.db".into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            claims: ClaimConfig::from_env(),
        }
    }
}

impl ClaimConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let cooldown_secs: i64 = std::env::var("CLAIM_COOLDOWN_SECS")
            .map(|v| v.parse().expect("CLAIM_COOLDOWN_SECS must be a valid i64"))
            .unwrap_or(defaults.cooldown_secs);

        let write_lock_timeout = std::env::var("WRITE_LOCK_TIMEOUT_SECS")
            .map(|v| {
                Duration::from_secs(
                    v.parse()
                        .expect("WRITE_LOCK_TIMEOUT_SECS must be a valid u64"),
                )
            })
            .unwrap_or(defaults.write_lock_timeout);

        let leaderboard_limit: i64 = std::env::var("LEADERBOARD_LIMIT")
            .map(|v| v.parse().expect("LEADERBOARD_LIMIT must be a valid i64"))
            .unwrap_or(defaults.leaderboard_limit);

        let cards_dir = std::env::var("CARDS_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.cards_dir);

        Self {
            cooldown_secs,
            write_lock_timeout,
            leaderboard_limit,
            cards_dir,
        }
    }
}
