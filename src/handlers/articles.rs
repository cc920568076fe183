//! Article handlers. Listing and creation build and validate real payloads; the
//! rest validate their input and answer with the placeholder body.

use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson, ValidatedPath, ValidatedQuery};
use crate::models::article::{article_response, articles_response, ArticleUpdate};
use crate::models::{Article, ArticleBody, ArticleParam, ArticlesQuery, FeedQuery, NewArticle, Profile};
use crate::response::{created, ok, placeholder, shaped};
use axum::response::IntoResponse;
use chrono::{SubsecRound, Utc};
use serde_json::{json, Value};

const MAX_SLUG_LEN: usize = 100;

/// Author shown when an article is created without a session.
const ANONYMOUS_AUTHOR: &str = "anonymous";

/// Slug derived from a title: lowercase, hyphen separated, at most 100 characters.
pub fn slugify_title(title: &str) -> String {
    let slug: String = ::slug::slugify(title).chars().take(MAX_SLUG_LEN).collect();
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug.to_string()
    }
}

fn sample_page() -> Value {
    json!({
        "articles": [
            {
                "slug": "string",
                "title": "string",
                "description": "string",
                "body": "string",
                "tagList": ["string"],
                "createdAt": "2024-04-12T13:28:33.205Z",
                "updatedAt": "2024-04-12T13:28:33.205Z",
                "favorited": true,
                "favoritesCount": 0,
                "author": {
                    "username": "string",
                    "bio": "string",
                    "image": "string",
                    "following": true
                }
            }
        ],
        "articlesCount": 0
    })
}

pub async fn list(
    ValidatedQuery(query): ValidatedQuery<ArticlesQuery>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(
        tag = ?query.tag,
        author = ?query.author,
        favorited = ?query.favorited,
        limit = ?query.limit,
        offset = ?query.offset,
        "listing articles"
    );
    let page = shaped(&articles_response(), &sample_page())?;
    Ok(ok(json!({ "articles": [page] })))
}

pub async fn create(
    user: Option<CurrentUser>,
    ValidatedJson(input): ValidatedJson<ArticleBody<NewArticle>>,
) -> Result<impl IntoResponse, AppError> {
    let NewArticle {
        title,
        description,
        body,
        tag_list,
    } = input.article;
    let author = Profile {
        username: user
            .map(|u| u.claims.username)
            .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string()),
        bio: None,
        image: None,
        following: false,
    };
    let now = Utc::now().trunc_subsecs(3);
    let article = Article {
        slug: slugify_title(&title),
        title,
        description,
        body,
        tag_list,
        favorited: false,
        favorites_count: 0,
        author,
        created_at: now,
        updated_at: now,
    };
    tracing::info!(slug = %article.slug, author = %article.author.username, "article created");
    let value = shaped(&article_response(), &ArticleBody { article })?;
    Ok(created(value))
}

pub async fn feed(ValidatedQuery(query): ValidatedQuery<FeedQuery>) -> impl IntoResponse {
    tracing::debug!(limit = ?query.limit, offset = ?query.offset, "feed requested");
    placeholder()
}

pub async fn read(ValidatedPath(param): ValidatedPath<ArticleParam>) -> impl IntoResponse {
    tracing::debug!(slug = %param.slug, "article requested");
    placeholder()
}

pub async fn update(
    ValidatedPath(param): ValidatedPath<ArticleParam>,
    ValidatedJson(input): ValidatedJson<ArticleBody<ArticleUpdate>>,
) -> impl IntoResponse {
    let ArticleUpdate {
        title,
        description,
        body,
        tag_list,
    } = input.article;
    tracing::debug!(
        slug = %param.slug,
        title = title.is_some(),
        description = description.is_some(),
        body = body.is_some(),
        tags = tag_list.is_some(),
        "article update requested"
    );
    placeholder()
}

pub async fn delete(ValidatedPath(param): ValidatedPath<ArticleParam>) -> impl IntoResponse {
    tracing::debug!(slug = %param.slug, "article deletion requested");
    placeholder()
}

pub async fn favorite(ValidatedPath(param): ValidatedPath<ArticleParam>) -> impl IntoResponse {
    tracing::debug!(slug = %param.slug, "favorite requested");
    placeholder()
}

pub async fn unfavorite(ValidatedPath(param): ValidatedPath<ArticleParam>) -> impl IntoResponse {
    tracing::debug!(slug = %param.slug, "unfavorite requested");
    placeholder()
}
