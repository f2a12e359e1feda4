use axum::extract::{Query, State};
use axum::Json;
use cardclaim_claims::Leaderboard;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    /// Defaults to the configured leaderboard size.
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    #[serde(flatten)]
    pub leaderboard: Leaderboard,
    pub message: String,
}

/// GET /api/v1/leaderboard
///
/// `limit` outside `1..=100` is a validation error.
pub async fn top(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardQuery>,
) -> AppResult<Json<DataResponse<LeaderboardResponse>>> {
    let leaderboard = state.ledger.leaderboard(params.limit).await?;
    let message = leaderboard.render();
    Ok(Json(DataResponse {
        data: LeaderboardResponse {
            leaderboard,
            message,
        },
    }))
}
