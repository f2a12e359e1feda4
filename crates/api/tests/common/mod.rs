#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use cardclaim_api::config::{ClaimConfig, ServerConfig};
use cardclaim_api::router::build_app_router;
use cardclaim_api::state::AppState;
use cardclaim_db::models::card::{Card, CreateCard};
use cardclaim_db::repositories::CardRepo;

/// A `ServerConfig` with development defaults and a fixed cards directory.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: "sqlite::memory:".to_string(),
        claims: ClaimConfig {
            cooldown_secs: 1800,
            write_lock_timeout: Duration::from_secs(5),
            leaderboard_limit: 10,
            cards_dir: PathBuf::from("cards"),
        },
    }
}

/// The production router over `pool`, with [`test_config`].
pub fn build_test_app(pool: SqlitePool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: SqlitePool, config: ServerConfig) -> Router {
    let state = AppState::new(pool, config.clone()).unwrap();
    build_app_router(state, &config)
}

pub async fn seed_card(pool: &SqlitePool, name: &str, points: i64) -> Card {
    CardRepo::create(
        pool,
        &CreateCard {
            name: name.to_string(),
            rarity: "Rare".to_string(),
            points,
            image: format!("{}.png", name.to_lowercase()),
        },
    )
    .await
    .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// POST with no body and no content type.
pub async fn post_empty(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
