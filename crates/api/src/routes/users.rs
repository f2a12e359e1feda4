//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST   /                    -> register
/// POST   /{id}/claims         -> claim
/// GET    /{id}/collection     -> collection
/// GET    /{id}/points         -> points
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(users::register))
        .route("/{id}/claims", post(users::claim))
        .route("/{id}/collection", get(users::collection))
        .route("/{id}/points", get(users::points))
}
