//! Leaderboard size limits.

use crate::error::CoreError;

/// Number of users shown when the caller does not ask for a size.
pub const DEFAULT_LEADERBOARD_LIMIT: i64 = 10;

/// Largest leaderboard a single query may return.
pub const MAX_LEADERBOARD_LIMIT: i64 = 100;

/// Resolve a requested leaderboard size, falling back to `default`.
pub fn resolve_limit(requested: Option<i64>, default: i64) -> Result<i64, CoreError> {
    let limit = requested.unwrap_or(default);
    if !(1..=MAX_LEADERBOARD_LIMIT).contains(&limit) {
        return Err(CoreError::Validation(format!(
            "Leaderboard limit must be between 1 and {MAX_LEADERBOARD_LIMIT}, got {limit}"
        )));
    }
    Ok(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_limit_uses_default() {
        assert_eq!(resolve_limit(None, DEFAULT_LEADERBOARD_LIMIT).unwrap(), 10);
    }

    #[test]
    fn limit_bounds() {
        assert_eq!(resolve_limit(Some(1), 10).unwrap(), 1);
        assert_eq!(resolve_limit(Some(MAX_LEADERBOARD_LIMIT), 10).unwrap(), 100);
        assert!(resolve_limit(Some(0), 10).is_err());
        assert!(resolve_limit(Some(MAX_LEADERBOARD_LIMIT + 1), 10).is_err());
        assert!(resolve_limit(None, 0).is_err());
    }
}
