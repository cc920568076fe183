//! Typed errors and HTTP mapping.

use crate::validation::ValidationErrors;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    Missing(&'static str),
    #[error("invalid {key} value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("validation: {0}")]
    Validation(ValidationErrors),
    /// A payload built by a handler does not satisfy its own response schema.
    #[error("response shape: {0}")]
    ResponseShape(ValidationErrors),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("invalid token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("token signing: {0}")]
    TokenSigning(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
    #[error("password hashing: {0}")]
    PasswordHash(String),
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl From<ValidationErrors> for AppError {
    fn from(e: ValidationErrors) -> Self {
        AppError::Validation(e)
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized(_) | AppError::Token(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Config(_)
            | AppError::ResponseShape(_)
            | AppError::TokenSigning(_)
            | AppError::PasswordHash(_)
            | AppError::Serialization(_)
            | AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config_error",
            AppError::Validation(_) => "validation_error",
            AppError::Unauthorized(_) | AppError::Token(_) => "unauthorized",
            AppError::NotFound(_) => "not_found",
            AppError::PayloadTooLarge(_) => "payload_too_large",
            AppError::ResponseShape(_)
            | AppError::TokenSigning(_)
            | AppError::PasswordHash(_)
            | AppError::Serialization(_) => "internal_error",
            AppError::Db(_) => "database_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let details = match &self {
            AppError::Validation(errors) => serde_json::to_value(errors).ok(),
            _ => None,
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.to_string(),
                details,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn code_of(err: AppError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, body["error"]["code"].as_str().unwrap_or_default().to_string())
    }

    #[tokio::test]
    async fn signing_failure_is_internal_not_unauthorized() {
        let (status, code) = code_of(AppError::TokenSigning("bad key".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "internal_error");
    }

    #[tokio::test]
    async fn rejected_token_is_unauthorized() {
        let err = jsonwebtoken::decode::<serde_json::Value>(
            "not.a.token",
            &jsonwebtoken::DecodingKey::from_secret(b"k"),
            &jsonwebtoken::Validation::default(),
        )
        .unwrap_err();
        let (status, code) = code_of(AppError::from(err)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(code, "unauthorized");
    }

    #[tokio::test]
    async fn oversized_payload_is_413() {
        let (status, code) = code_of(AppError::PayloadTooLarge("length limit exceeded".into())).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(code, "payload_too_large");
    }
}
