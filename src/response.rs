//! Response helpers shared by the route handlers.

use crate::error::AppError;
use crate::validation::Schema;
use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;

/// Literal body returned by routes whose behaviour is not implemented yet.
pub const PLACEHOLDER: &str = "TODO";

pub fn placeholder() -> (StatusCode, &'static str) {
    (StatusCode::OK, PLACEHOLDER)
}

/// Serialize `payload` and check it against `schema` before it leaves the server.
pub fn shaped<T: Serialize>(schema: &Schema, payload: &T) -> Result<Value, AppError> {
    let value = serde_json::to_value(payload)?;
    schema.validate(&value).map_err(AppError::ResponseShape)?;
    Ok(value)
}

pub fn ok(value: Value) -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(value))
}

pub fn created(value: Value) -> (StatusCode, Json<Value>) {
    (StatusCode::CREATED, Json(value))
}
