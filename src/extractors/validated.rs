//! Extractors that validate body, query and path input against a schema before
//! handing the typed value to the handler. Every failure is a 422.

use crate::error::AppError;
use crate::validation::{Issue, IssueCode, Validated, ValidationErrors};
use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Query, Request},
    http::{request::Parts, StatusCode},
    Json,
};
use serde_json::Value;

/// JSON body validated against `T::schema()`.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

/// Query string validated against `T::schema()`. Numeric fields are coerced from strings.
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

/// Path parameters validated against `T::schema()`.
#[derive(Debug)]
pub struct ValidatedPath<T>(pub T);

fn malformed(message: String) -> AppError {
    AppError::Validation(ValidationErrors::single(Issue::root(IssueCode::InvalidType, message)))
}

fn unreadable_body(rejection: JsonRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(rejection.body_text())
    } else {
        malformed(rejection.body_text())
    }
}

fn rejected(errors: ValidationErrors) -> AppError {
    tracing::debug!(%errors, "input rejected");
    AppError::Validation(errors)
}

fn parse_pairs<T: Validated>(pairs: Vec<(String, String)>) -> Result<T, AppError> {
    let schema = T::schema();
    let value = match schema.as_object() {
        Some(shape) => shape.coerce_strings(pairs),
        None => Value::Object(pairs.into_iter().map(|(k, v)| (k, Value::String(v))).collect()),
    };
    schema.parse(value).map_err(rejected)
}

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: Validated + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(unreadable_body)?;
        let parsed = T::schema().parse(value).map_err(rejected)?;
        Ok(ValidatedJson(parsed))
    }
}

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: Validated + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| malformed(rejection.body_text()))?;
        Ok(ValidatedQuery(parse_pairs(pairs)?))
    }
}

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedPath<T>
where
    S: Send + Sync,
    T: Validated + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(pairs) = Path::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| malformed(rejection.body_text()))?;
        Ok(ValidatedPath(parse_pairs(pairs)?))
    }
}
