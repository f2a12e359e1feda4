use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cardclaim_claims::ClaimError;
use cardclaim_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce `{ "error", "code" }` JSON bodies.
/// Cooldown and empty-catalog rejections never reach this type; they are
/// ordinary `200` claim outcomes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A validation failure from `cardclaim_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure on the claim or query path.
    #[error(transparent)]
    Claim(#[from] ClaimError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Claim(ClaimError::Core(core)) => classify_core_error(core),
            AppError::Claim(err) if err.is_transient() => {
                tracing::warn!(error = %err, "Transient store failure");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "TRY_AGAIN",
                    "The service is busy, please try again".to_string(),
                )
            }
            AppError::Claim(err) => {
                tracing::error!(error = %err, "Claim failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
    }
}
