//! Tag listing.

use crate::response::placeholder;
use axum::response::IntoResponse;

pub async fn list() -> impl IntoResponse {
    placeholder()
}
