use std::time::Duration;

use cardclaim_core::error::CoreError;
use cardclaim_core::types::DbId;

/// Failures on the claim and query paths.
///
/// Cooldown and empty-catalog rejections are not errors; they are
/// [`ClaimOutcome`](crate::ClaimOutcome) variants.
#[derive(Debug, thiserror::Error)]
pub enum ClaimError {
    /// The write gate could not be acquired in time.
    #[error("Store busy: write lock not acquired within {waited:?}")]
    Busy { waited: Duration },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Card {0} is not in the catalog")]
    UnknownCard(DbId),

    #[error("User {0} is not registered")]
    UnknownUser(DbId),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ClaimError {
    /// Whether the caller should simply try again later.
    pub fn is_transient(&self) -> bool {
        match self {
            ClaimError::Busy { .. } => true,
            ClaimError::Database(err) => is_transient_sqlx(err),
            _ => false,
        }
    }
}

/// SQLite primary result codes that mean "contended or flaky", not "wrong".
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;
const SQLITE_IOERR: i32 = 10;

fn is_transient_sqlx(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut => true,
        sqlx::Error::Database(db_err) => db_err
            .code()
            .and_then(|code| code.parse::<i32>().ok())
            // Extended codes carry the primary code in the low byte.
            .map(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED | SQLITE_IOERR))
            .unwrap_or(false),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_is_transient() {
        let err = ClaimError::Busy {
            waited: Duration::from_secs(5),
        };
        assert!(err.is_transient());
    }

    #[test]
    fn pool_timeout_is_transient() {
        assert!(ClaimError::Database(sqlx::Error::PoolTimedOut).is_transient());
    }

    #[test]
    fn logic_errors_are_not_transient() {
        assert!(!ClaimError::UnknownCard(3).is_transient());
        assert!(!ClaimError::Database(sqlx::Error::RowNotFound).is_transient());
        assert!(!ClaimError::Core(CoreError::Validation("bad".into())).is_transient());
    }
}
