//! Declared storage shape. Tables are created idempotently when a database is
//! configured; no other queries run against them yet.

use crate::error::AppError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};

/// Table DDL in dependency order.
pub const TABLES: &[(&str, &str)] = &[
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL,
            bio TEXT,
            image TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "articles",
        r#"
        CREATE TABLE IF NOT EXISTS articles (
            id UUID PRIMARY KEY,
            slug VARCHAR(255) NOT NULL UNIQUE,
            title VARCHAR(255) NOT NULL,
            description VARCHAR(255) NOT NULL,
            body TEXT NOT NULL,
            author_id UUID NOT NULL REFERENCES users (id) ON DELETE CASCADE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "tags",
        r#"
        CREATE TABLE IF NOT EXISTS tags (
            id UUID PRIMARY KEY,
            name VARCHAR(255) NOT NULL UNIQUE
        )
        "#,
    ),
    (
        "article_tags",
        r#"
        CREATE TABLE IF NOT EXISTS article_tags (
            article_id UUID NOT NULL REFERENCES articles (id) ON DELETE CASCADE,
            tag_id UUID NOT NULL REFERENCES tags (id) ON DELETE CASCADE,
            PRIMARY KEY (article_id, tag_id)
        )
        "#,
    ),
    (
        "comments",
        r#"
        CREATE TABLE IF NOT EXISTS comments (
            id BIGSERIAL PRIMARY KEY,
            body TEXT NOT NULL,
            article_id UUID NOT NULL REFERENCES articles (id) ON DELETE CASCADE,
            author_id UUID NOT NULL REFERENCES users (id) ON DELETE CASCADE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "favorites",
        r#"
        CREATE TABLE IF NOT EXISTS favorites (
            user_id UUID NOT NULL REFERENCES users (id) ON DELETE CASCADE,
            article_id UUID NOT NULL REFERENCES articles (id) ON DELETE CASCADE,
            PRIMARY KEY (user_id, article_id)
        )
        "#,
    ),
    (
        "follows",
        r#"
        CREATE TABLE IF NOT EXISTS follows (
            follower_id UUID NOT NULL REFERENCES users (id) ON DELETE CASCADE,
            followed_id UUID NOT NULL REFERENCES users (id) ON DELETE CASCADE,
            PRIMARY KEY (follower_id, followed_id),
            CHECK (follower_id <> followed_id)
        )
        "#,
    ),
];

pub async fn connect(options: &PgConnectOptions) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect_with(options.clone())
        .await?;
    Ok(pool)
}

/// Create every table in `TABLES` that does not exist yet.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for &(name, ddl) in TABLES {
        tracing::debug!(table = name, "ensuring table");
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

pub async fn ping(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query("SELECT 1").fetch_optional(pool).await?;
    Ok(())
}

/// Create the database named in `options` if it is missing, connecting
/// through the `postgres` maintenance database.
pub async fn ensure_database_exists(options: &PgConnectOptions) -> Result<(), AppError> {
    let db_name = match options.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(()),
    };
    let mut conn = options.clone().database("postgres").connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_ident(r#"we"ird"#), r#""we""ird""#);
    }

    #[test]
    fn uniqueness_constraints_are_declared() {
        let ddl = |name: &str| TABLES.iter().find(|(n, _)| *n == name).map(|(_, d)| *d).unwrap();
        assert!(ddl("users").contains("email TEXT NOT NULL UNIQUE"));
        assert!(ddl("users").contains("username TEXT NOT NULL UNIQUE"));
        assert!(ddl("articles").contains("slug VARCHAR(255) NOT NULL UNIQUE"));
        assert!(ddl("favorites").contains("PRIMARY KEY (user_id, article_id)"));
        assert!(ddl("follows").contains("PRIMARY KEY (follower_id, followed_id)"));
    }
}
