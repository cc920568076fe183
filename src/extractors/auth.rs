//! Extract the authenticated user from the `Authorization` header.

use crate::auth::Claims;
use crate::error::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

/// User identified by a valid `Authorization: Token <jwt>` (or `Bearer <jwt>`) header.
/// Use `Option<CurrentUser>` where authentication is optional.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub claims: Claims,
    /// The token as presented by the client.
    pub token: String,
}

/// Token from the `Authorization` header, accepting the `Token` and `Bearer` schemes.
pub fn auth_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    let known = scheme.eq_ignore_ascii_case("Token") || scheme.eq_ignore_ascii_case("Bearer");
    (known && !token.is_empty()).then_some(token)
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = auth_token(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("missing authorization token".into()))?;
        let state = AppState::from_ref(state);
        let claims = state.tokens.verify(token).map_err(|e| {
            tracing::warn!(error = %e, "token rejected");
            e
        })?;
        Ok(CurrentUser {
            claims,
            token: token.to_string(),
        })
    }
}
