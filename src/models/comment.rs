//! Comment input and route parameters.

use super::article::slug;
use crate::validation::{number, object, string, Schema, Validated};
use serde::Deserialize;

pub fn comment_id() -> Schema {
    number().int().nonnegative().into()
}

pub fn comment_body() -> Schema {
    string().min(1).into()
}

pub fn create_comment_input() -> Schema {
    object()
        .field("comment", object().field("body", comment_body()))
        .into()
}

pub fn comment_param() -> Schema {
    object().field("slug", slug()).field("id", comment_id()).into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentBody<T> {
    pub comment: T,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewComment {
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentParam {
    pub slug: String,
    pub id: u64,
}

impl Validated for CommentBody<NewComment> {
    fn schema() -> Schema {
        create_comment_input()
    }
}

impl Validated for CommentParam {
    fn schema() -> Schema {
        comment_param()
    }
}
