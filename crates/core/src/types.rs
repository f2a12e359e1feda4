/// Primary keys are SQLite `INTEGER PRIMARY KEY` values. User ids come from
/// the chat platform and are stored verbatim.
pub type DbId = i64;

/// Seconds since the Unix epoch. `0` means "never".
pub type UnixSeconds = i64;
