//! Router assembly.

mod api;
mod common;

pub use api::api_routes;
pub use common::common_routes;

use crate::error::AppError;
use crate::pages;
use crate::state::AppState;
use axum::{http::Uri, routing::get, Router};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Full application: landing page, common routes, `/api`, tracing and a body size limit.
pub fn app(state: AppState) -> Router {
    let body_limit = state.config.body_limit_bytes;
    Router::new()
        .route("/", get(pages::index))
        .merge(common_routes(state.clone()))
        .nest("/api", api_routes(state))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(body_limit))
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
