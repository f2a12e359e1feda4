//! User identity validation and display-name resolution.

use crate::error::CoreError;
use crate::types::DbId;

/// Longest accepted username / first name / last name, in characters.
pub const MAX_DISPLAY_FIELD_LEN: usize = 64;

/// Validate a user id received from the chat platform.
///
/// Chat platforms hand out positive user ids; zero and negatives only come
/// from malformed requests.
pub fn validate_user_id(id: DbId) -> Result<(), CoreError> {
    if id <= 0 {
        return Err(CoreError::Validation(format!(
            "User id must be positive, got {id}"
        )));
    }
    Ok(())
}

/// Validate an optional display field (`field` names it in the error).
pub fn validate_display_field(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    if let Some(value) = value {
        if value.chars().count() > MAX_DISPLAY_FIELD_LEN {
            return Err(CoreError::Validation(format!(
                "{field} must not exceed {MAX_DISPLAY_FIELD_LEN} characters"
            )));
        }
    }
    Ok(())
}

/// Pick the name shown on the leaderboard: first name, then `@username`,
/// then a generic `user {id}` label.
pub fn display_name(id: DbId, first_name: Option<&str>, username: Option<&str>) -> String {
    let non_blank = |s: &&str| !s.trim().is_empty();
    if let Some(first) = first_name.filter(non_blank) {
        return first.to_string();
    }
    if let Some(username) = username.filter(non_blank) {
        return format!("@{username}");
    }
    format!("user {id}")
}
