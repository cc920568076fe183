//! Registration, login and the current-user endpoints.
//!
//! Nothing is persisted yet: the session token is the only record of a user,
//! so the current user is rebuilt from its claims.

use crate::auth::hash_password_blocking;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::models::user::user_response;
use crate::models::{LoginUser, NewUser, UpdateUser, User, UserBody};
use crate::response::{created, ok, shaped};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};
use uuid::Uuid;

/// Stable id for an email address, so register and login agree on `sub`.
pub fn user_id_for(email: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, format!("mailto:{}", email.to_lowercase()).as_bytes())
}

/// Username used at login when only the email is known: its local part.
fn username_from_email(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

fn user_body(user: User) -> Result<serde_json::Value, AppError> {
    shaped(&user_response(), &UserBody { user })
}

pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<UserBody<NewUser>>,
) -> Result<impl IntoResponse, AppError> {
    let NewUser {
        username,
        email,
        password,
    } = input.user;
    // TODO: store the hash once a users repository exists.
    let _password_hash = hash_password_blocking(password).await?;
    let id = user_id_for(&email);
    let token = state.tokens.sign(id, &username, &email)?;
    tracing::info!(user_id = %id, username = %username, "user registered");
    let body = user_body(User {
        email,
        token,
        username,
        bio: None,
        image: None,
    })?;
    Ok(created(body))
}

pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<UserBody<LoginUser>>,
) -> Result<impl IntoResponse, AppError> {
    let LoginUser { email, password: _ } = input.user;
    let username = username_from_email(&email);
    let id = user_id_for(&email);
    let token = state.tokens.sign(id, &username, &email)?;
    tracing::info!(user_id = %id, "user logged in");
    let body = user_body(User {
        email,
        token,
        username,
        bio: None,
        image: None,
    })?;
    Ok(ok(body))
}

pub async fn current(user: CurrentUser) -> Result<impl IntoResponse, AppError> {
    let CurrentUser { claims, token } = user;
    let body = user_body(User {
        email: claims.email,
        token,
        username: claims.username,
        bio: None,
        image: None,
    })?;
    Ok(ok(body))
}

pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(input): ValidatedJson<UserBody<UpdateUser>>,
) -> Result<impl IntoResponse, AppError> {
    let UpdateUser {
        email,
        username,
        password,
        bio,
        image,
    } = input.user;
    let claims = user.claims;
    if let Some(password) = password {
        // TODO: store the hash once a users repository exists.
        let _password_hash = hash_password_blocking(password).await?;
    }
    let email = email.unwrap_or(claims.email);
    let username = username.unwrap_or(claims.username);
    let token = state.tokens.sign(claims.sub, &username, &email)?;
    tracing::info!(user_id = %claims.sub, "user updated");
    let body = user_body(User {
        email,
        token,
        username,
        bio,
        image,
    })?;
    Ok(ok(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_is_stable_per_email() {
        assert_eq!(user_id_for("Jake@Jake.jake"), user_id_for("jake@jake.jake"));
        assert_ne!(user_id_for("jake@jake.jake"), user_id_for("anne@jake.jake"));
    }

    #[test]
    fn login_username_is_local_part() {
        assert_eq!(username_from_email("jake@jake.jake"), "jake");
    }
}
