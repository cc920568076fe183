//! Profile lookup and follow toggling. Only the username is validated so far.

use crate::extractors::ValidatedPath;
use crate::models::ProfileParam;
use crate::response::placeholder;
use axum::response::IntoResponse;

pub async fn get(ValidatedPath(param): ValidatedPath<ProfileParam>) -> impl IntoResponse {
    tracing::debug!(username = %param.username, "profile requested");
    placeholder()
}

pub async fn follow(ValidatedPath(param): ValidatedPath<ProfileParam>) -> impl IntoResponse {
    tracing::debug!(username = %param.username, "follow requested");
    placeholder()
}

pub async fn unfollow(ValidatedPath(param): ValidatedPath<ProfileParam>) -> impl IntoResponse {
    tracing::debug!(username = %param.username, "unfollow requested");
    placeholder()
}
