//! Article schemas (wire and entity) and typed payloads.

use super::profile::{profile, Profile};
use super::tag::{tag_entity, TagEntity};
use crate::validation::{boolean, number, object, string, ObjectSchema, Schema, SchemaExt, Validated};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub fn slug() -> Schema {
    string().min(1).max(100).into()
}

pub fn title() -> Schema {
    string().min(1).max(100).into()
}

pub fn description() -> Schema {
    string().min(1).into()
}

pub fn body() -> Schema {
    string().min(1).into()
}

pub fn tag() -> Schema {
    string().min(1).into()
}

pub fn favorited() -> Schema {
    boolean()
}

pub fn favorites_count() -> Schema {
    number().int().nonnegative().into()
}

pub fn articles_count() -> Schema {
    number().int().nonnegative().into()
}

pub fn created_at() -> Schema {
    string().datetime().into()
}

pub fn updated_at() -> Schema {
    string().datetime().into()
}

pub fn author() -> Schema {
    profile()
}

pub fn article_param() -> Schema {
    object().field("slug", slug()).into()
}

pub fn articles_query() -> Schema {
    object()
        .field("tag", string())
        .field("author", string())
        .field("favorited", string())
        .field("limit", number().int().nonnegative())
        .field("offset", number().int().nonnegative())
        .partial()
        .into()
}

pub fn feed_query() -> Schema {
    object()
        .field("limit", number().int().nonnegative())
        .field("offset", number().int().nonnegative())
        .partial()
        .into()
}

pub fn create_article_input() -> Schema {
    object()
        .field(
            "article",
            object()
                .field("title", title())
                .field("description", description())
                .field("body", body())
                .field("tagList", tag().array()),
        )
        .into()
}

pub fn update_article_input() -> Schema {
    object()
        .field(
            "article",
            object()
                .field("title", title())
                .field("description", description())
                .field("body", body())
                .field("tagList", tag().array())
                .partial(),
        )
        .into()
}

fn article_fields() -> ObjectSchema {
    object()
        .field("slug", slug())
        .field("title", title())
        .field("description", description())
        .field("body", body())
        .field("tagList", tag().array())
        .field("favorited", favorited())
        .field("favoritesCount", favorites_count())
        .field("author", author())
        .field("createdAt", created_at())
        .field("updatedAt", updated_at())
}

pub fn article_response() -> Schema {
    object().field("article", article_fields()).into()
}

pub fn articles_response() -> Schema {
    object()
        .field("articles", article_fields().array())
        .field("articlesCount", articles_count())
        .into()
}

pub fn article_id() -> Schema {
    string().uuid().into()
}

/// Stored article shape; bounds follow the column widths.
pub fn article_entity() -> Schema {
    object()
        .field("id", article_id())
        .field("slug", string().min(1).max(255))
        .field("title", string().min(1).max(255))
        .field("description", string().min(1).max(255))
        .field("body", body())
        .field("tags", tag_entity().array())
        .into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleBody<T> {
    pub article: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub tag_list: Vec<String>,
    pub favorited: bool,
    pub favorites_count: u64,
    pub author: Profile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleList {
    pub articles: Vec<Article>,
    pub articles_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArticle {
    pub title: String,
    pub description: String,
    pub body: String,
    pub tag_list: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub tag_list: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleParam {
    pub slug: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticlesQuery {
    pub tag: Option<String>,
    pub author: Option<String>,
    pub favorited: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleEntity {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub tags: Vec<TagEntity>,
}

impl Validated for ArticleBody<NewArticle> {
    fn schema() -> Schema {
        create_article_input()
    }
}

impl Validated for ArticleBody<ArticleUpdate> {
    fn schema() -> Schema {
        update_article_input()
    }
}

impl Validated for ArticleParam {
    fn schema() -> Schema {
        article_param()
    }
}

impl Validated for ArticlesQuery {
    fn schema() -> Schema {
        articles_query()
    }
}

impl Validated for FeedQuery {
    fn schema() -> Schema {
        feed_query()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_article() -> serde_json::Value {
        json!({
            "slug": "test-slug",
            "title": "test title",
            "description": "test description",
            "body": "test body",
            "tagList": ["test", "tags"],
            "favorited": true,
            "favoritesCount": 10,
            "author": {
                "username": "testuser",
                "bio": "test bio",
                "image": "test image",
                "following": true
            },
            "createdAt": "2021-01-01T00:00:00.000Z",
            "updatedAt": "2021-01-01T00:00:00.000Z"
        })
    }

    #[test]
    fn slug_bounds() {
        assert!(slug().is_valid(&json!("testslug")));
        assert!(!slug().is_valid(&json!("")));
        assert!(!slug().is_valid(&json!("a".repeat(101))));
    }

    #[test]
    fn title_bounds() {
        assert!(title().is_valid(&json!("Hello World")));
        assert!(!title().is_valid(&json!("")));
        assert!(!title().is_valid(&json!("a".repeat(101))));
    }

    #[test]
    fn text_fields_reject_empty() {
        for schema in [description(), body(), tag()] {
            assert!(schema.is_valid(&json!("Hello World")));
            assert!(!schema.is_valid(&json!("")));
        }
    }

    #[test]
    fn favorited_is_strictly_boolean() {
        assert!(favorited().is_valid(&json!(true)));
        assert!(!favorited().is_valid(&json!("true")));
    }

    #[test]
    fn counts_are_non_negative_integers() {
        for schema in [favorites_count(), articles_count()] {
            assert!(schema.is_valid(&json!(10)));
            assert!(!schema.is_valid(&json!(1.5)));
            assert!(!schema.is_valid(&json!(-1)));
        }
    }

    #[test]
    fn timestamps() {
        assert!(created_at().is_valid(&json!("2021-01-01T00:00:00.000Z")));
        assert!(!created_at().is_valid(&json!("test")));
        assert!(!created_at().is_valid(&json!("2021-01-01T00:00:00+02:00")));
        assert!(!created_at().is_valid(&json!("2021-01-01 00:00:00Z")));
        assert!(!created_at().is_valid(&json!("2021-01-01t00:00:00z")));
        assert!(!updated_at().is_valid(&json!("2021-01-01T00:00:00")));
    }

    #[test]
    fn create_input() {
        let body = json!({
            "article": {
                "title": "test title",
                "description": "test description",
                "body": "test body",
                "tagList": ["test", "tags"]
            }
        });
        let parsed: ArticleBody<NewArticle> = create_article_input().parse(body).unwrap();
        assert_eq!(parsed.article.tag_list, vec!["test", "tags"]);

        let err = create_article_input()
            .validate(&json!({ "article": { "title": "" } }))
            .unwrap_err();
        assert!(err.has_issue_at("article.title"));
        assert!(err.has_issue_at("article.body"));
    }

    #[test]
    fn single_article_response() {
        let valid = json!({ "article": sample_article() });
        let parsed: ArticleBody<Article> = article_response().parse(valid).unwrap();
        assert_eq!(parsed.article.favorites_count, 10);
        assert!(!article_response().is_valid(&json!({ "article": { "slug": "" } })));
    }

    #[test]
    fn article_list_response() {
        assert!(articles_response().is_valid(&json!({
            "articles": [sample_article()],
            "articlesCount": 1
        })));
        assert!(!articles_response().is_valid(&json!({
            "articles": [sample_article()],
            "articlesCount": -1
        })));
    }

    #[test]
    fn query_fields_are_optional() {
        assert!(articles_query().is_valid(&json!({})));
        assert!(articles_query().is_valid(&json!({ "tag": "rust", "limit": 20 })));
        assert!(!feed_query().is_valid(&json!({ "offset": -5 })));
    }

    #[test]
    fn entity_shape() {
        let valid = json!({
            "id": "123e4567-e89b-12d3-a456-426614174000",
            "slug": "slug",
            "title": "title",
            "description": "description",
            "body": "body",
            "tags": [{ "id": "123e4567-e89b-12d3-a456-426614174000", "name": "tag" }]
        });
        let entity: ArticleEntity = article_entity().parse(valid.clone()).unwrap();
        assert_eq!(entity.tags.len(), 1);

        let mut invalid = valid;
        invalid["id"] = json!("invalid");
        assert!(!article_entity().is_valid(&invalid));
        invalid["id"] = json!("123e4567-e89b-12d3-a456-426614174000");
        invalid["description"] = json!("a".repeat(256));
        assert!(!article_entity().is_valid(&invalid));
    }
}
