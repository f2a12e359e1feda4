//! Handlers for the `/users` resource: registration, claims and per-user
//! queries.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cardclaim_claims::{ClaimOutcome, Collection};
use cardclaim_core::types::DbId;
use cardclaim_db::models::user::NewUser;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Optional display fields sent alongside a claim.
///
/// The user id comes from the path; these refresh nothing for existing users
/// and only seed the row on first contact.
#[derive(Debug, Default, Deserialize)]
pub struct UserProfile {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UserProfile {
    fn into_new_user(self, id: DbId) -> NewUser {
        NewUser {
            id,
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Registration {
    pub user_id: DbId,
    pub created: bool,
}

/// A claim outcome plus its reply text.
#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    #[serde(flatten)]
    pub outcome: ClaimOutcome,
    /// Card image resolved against the configured cards directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CollectionResponse {
    #[serde(flatten)]
    pub collection: Collection,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct PointsResponse {
    pub user_id: DbId,
    pub total_points: i64,
}

/// POST /api/v1/users
///
/// Idempotent. Returns 201 for a new user and 200 when the user already
/// existed (stored names are left untouched).
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<NewUser>,
) -> AppResult<(StatusCode, Json<DataResponse<Registration>>)> {
    let created = state.engine.register(&input).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(DataResponse {
            data: Registration {
                user_id: input.id,
                created,
            },
        }),
    ))
}

/// POST /api/v1/users/{id}/claims
///
/// Cooldown and empty-catalog rejections are `200` with a matching `status`.
pub async fn claim(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Option<Json<UserProfile>>,
) -> AppResult<Json<DataResponse<ClaimResponse>>> {
    let profile = body.map(|Json(p)| p).unwrap_or_default();
    let outcome = state.engine.claim(&profile.into_new_user(id)).await?;

    let image_path = match &outcome {
        ClaimOutcome::Granted(award) => Some(
            state
                .config
                .claims
                .cards_dir
                .join(&award.card.image)
                .display()
                .to_string(),
        ),
        _ => None,
    };
    let message = outcome.message();

    Ok(Json(DataResponse {
        data: ClaimResponse {
            outcome,
            image_path,
            message,
        },
    }))
}

/// GET /api/v1/users/{id}/collection
pub async fn collection(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CollectionResponse>>> {
    let collection = state.ledger.collection(id).await?;
    let message = collection.render();
    Ok(Json(DataResponse {
        data: CollectionResponse {
            collection,
            message,
        },
    }))
}

/// GET /api/v1/users/{id}/points
///
/// Unknown users have zero points.
pub async fn points(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PointsResponse>>> {
    let total_points = state.ledger.total_points(id).await?;
    Ok(Json(DataResponse {
        data: PointsResponse {
            user_id: id,
            total_points,
        },
    }))
}
