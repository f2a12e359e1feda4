//! Human-readable replies for claim, collection and leaderboard results.
//!
//! Transports are free to ignore these and render the structured data
//! themselves; the strings exist so every adapter shows the same wording.

/// Reply when the catalog has no cards.
pub const EMPTY_CATALOG: &str = "No cards available yet.";

/// Reply when the user owns no cards.
pub const EMPTY_COLLECTION: &str = "Your collection is empty.";

/// Reply when nobody has registered yet.
pub const EMPTY_LEADERBOARD: &str = "The leaderboard is empty.";

/// Caption sent with a freshly claimed card.
pub fn claim_caption(name: &str, rarity: &str, card_points: i64, total_points: i64) -> String {
    format!(
        "Card: {name}\nRarity: {rarity}\nCard points: {card_points}\nYour total points: {total_points}"
    )
}

/// Reply for a claim that arrived inside the cooldown window.
pub fn cooldown_notice(window_secs: i64, remaining_secs: i64) -> String {
    format!(
        "Cards can be claimed once every {}. Try again in {}.",
        format_duration(window_secs),
        format_duration(remaining_secs),
    )
}

/// One line of a user's collection.
pub fn collection_line(name: &str, rarity: &str, count: i64) -> String {
    format!("{name} [{rarity}] {count}x")
}

/// Render a whole collection, or the empty sentinel.
pub fn collection_message<'a, I>(lines: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str, i64)>,
{
    let body: Vec<String> = lines
        .into_iter()
        .map(|(name, rarity, count)| collection_line(name, rarity, count))
        .collect();
    if body.is_empty() {
        return EMPTY_COLLECTION.to_string();
    }
    format!("Your collection:\n{}", body.join("\n"))
}

/// One ranked leaderboard line (`rank` starts at 1).
pub fn leaderboard_line(rank: usize, name: &str, points: i64) -> String {
    format!("{rank}. {name}: {points} points")
}

/// Render a ranked leaderboard, or the empty sentinel.
pub fn leaderboard_message<'a, I>(rows: I) -> String
where
    I: IntoIterator<Item = (usize, &'a str, i64)>,
{
    let body: Vec<String> = rows
        .into_iter()
        .map(|(rank, name, points)| leaderboard_line(rank, name, points))
        .collect();
    if body.is_empty() {
        return EMPTY_LEADERBOARD.to_string();
    }
    format!("Top {} users:\n{}", body.len(), body.join("\n"))
}

/// `90` -> `1m 30s`, `1800` -> `30m`, `3600` -> `1h`.
pub fn format_duration(secs: i64) -> String {
    let secs = secs.max(0);
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    let parts: Vec<String> = [(h, "h"), (m, "m"), (s, "s")]
        .into_iter()
        .filter(|(v, _)| *v > 0)
        .map(|(v, unit)| format!("{v}{unit}"))
        .collect();
    if parts.is_empty() {
        "0s".to_string()
    } else {
        parts.join(" ")
    }
}
