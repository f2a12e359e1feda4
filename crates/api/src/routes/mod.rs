pub mod health;
pub mod leaderboard;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /users                           register (POST)
/// /users/{id}/claims               claim a card (POST)
/// /users/{id}/collection           list holdings (GET)
/// /users/{id}/points               total points (GET)
///
/// /leaderboard                     top users (GET, ?limit=N)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/leaderboard", leaderboard::router())
}
