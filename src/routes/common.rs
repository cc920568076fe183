//! Common routes: health, readiness, version.

use crate::state::AppState;
use crate::store;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    database: &'static str,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyBody>) {
    let Some(pool) = &state.pool else {
        return (
            StatusCode::OK,
            Json(ReadyBody {
                status: "ok",
                database: "disabled",
            }),
        );
    };
    match store::ping(pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ReadyBody {
                status: "ok",
                database: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyBody {
                    status: "degraded",
                    database: "unavailable",
                }),
            )
        }
    }
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /health, GET /ready (database check when configured), GET /version.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
