//! The `/api` route table.

use crate::handlers::{articles, comments, profiles, tags, users};
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/articles", get(articles::list).post(articles::create))
        .route("/articles/feed", get(articles::feed))
        .route(
            "/articles/:slug",
            get(articles::read).put(articles::update).delete(articles::delete),
        )
        .route("/articles/:slug/comments", get(comments::list).post(comments::create))
        .route("/articles/:slug/comments/:id", delete(comments::delete))
        .route(
            "/articles/:slug/favorite",
            post(articles::favorite).delete(articles::unfavorite),
        )
        .route("/profiles/:username", get(profiles::get))
        .route(
            "/profiles/:username/follow",
            post(profiles::follow).delete(profiles::unfollow),
        )
        .route("/tags", get(tags::list))
        .route("/user", get(users::current).put(users::update))
        .route("/users", post(users::register))
        .route("/users/login", post(users::login))
        .with_state(state)
}
