//! Comment handlers. Input is validated; the behaviour is a placeholder.

use crate::extractors::{ValidatedJson, ValidatedPath};
use crate::models::{ArticleParam, CommentBody, CommentParam, NewComment};
use crate::response::placeholder;
use axum::response::IntoResponse;

pub async fn list(ValidatedPath(param): ValidatedPath<ArticleParam>) -> impl IntoResponse {
    tracing::debug!(slug = %param.slug, "comments requested");
    placeholder()
}

pub async fn create(
    ValidatedPath(param): ValidatedPath<ArticleParam>,
    ValidatedJson(input): ValidatedJson<CommentBody<NewComment>>,
) -> impl IntoResponse {
    tracing::debug!(slug = %param.slug, len = input.comment.body.len(), "comment submitted");
    placeholder()
}

pub async fn delete(ValidatedPath(param): ValidatedPath<CommentParam>) -> impl IntoResponse {
    tracing::debug!(slug = %param.slug, id = param.id, "comment deletion requested");
    placeholder()
}
