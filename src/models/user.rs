//! User schemas and wire types.

use crate::validation::{object, string, Schema, SchemaExt, Validated};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub fn user_id() -> Schema {
    string().uuid().into()
}

pub fn username() -> Schema {
    string().min(1).max(255).into()
}

pub fn email() -> Schema {
    string().min(1).max(255).email().into()
}

/// Password policy for stored accounts.
pub fn entity_password() -> Schema {
    string().min(8).into()
}

/// Password as accepted on registration, login and update.
pub fn input_password() -> Schema {
    string().min(1).into()
}

pub fn bio() -> Schema {
    string().nullable()
}

pub fn image() -> Schema {
    string().nullable()
}

pub fn token() -> Schema {
    string().min(1).into()
}

pub fn user_entity() -> Schema {
    object()
        .field("id", user_id())
        .field("userName", username())
        .field("email", email())
        .field("bio", bio())
        .field("image", image())
        .into()
}

pub fn user_response() -> Schema {
    object()
        .field(
            "user",
            object()
                .field("email", email())
                .field("token", token())
                .field("username", username())
                .field("bio", bio())
                .field("image", image()),
        )
        .into()
}

pub fn registration_input() -> Schema {
    object()
        .field(
            "user",
            object()
                .field("username", username())
                .field("email", email())
                .field("password", input_password()),
        )
        .into()
}

pub fn login_input() -> Schema {
    object()
        .field(
            "user",
            object()
                .field("email", email())
                .field("password", input_password()),
        )
        .into()
}

pub fn update_user_input() -> Schema {
    object()
        .field(
            "user",
            object()
                .field("email", email())
                .field("username", username())
                .field("password", input_password())
                .field("bio", bio())
                .field("image", image())
                .partial(),
        )
        .into()
}

/// `{"user": ...}` envelope used by every user endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBody<T> {
    pub user: T,
}

/// Authenticated user as returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub token: String,
    pub username: String,
    pub bio: Option<String>,
    pub image: Option<String>,
}

#[derive(Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Deserialize)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Default, Deserialize)]
pub struct UpdateUser {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Stored user record, minus credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEntity {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub bio: Option<String>,
    pub image: Option<String>,
}

impl Validated for UserBody<NewUser> {
    fn schema() -> Schema {
        registration_input()
    }
}

impl Validated for UserBody<LoginUser> {
    fn schema() -> Schema {
        login_input()
    }
}

impl Validated for UserBody<UpdateUser> {
    fn schema() -> Schema {
        update_user_input()
    }
}
