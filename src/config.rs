//! Runtime configuration read from the environment.

use crate::error::ConfigError;
use sqlx::postgres::PgConnectOptions;
use std::fmt;
use std::str::FromStr;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TOKEN_TTL_SECS: u64 = 60 * 60 * 24;
const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;
const DEFAULT_DB_PORT: u16 = 5432;

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Postgres connection. `None` runs the API without a database.
    pub database: Option<PgConnectOptions>,
    /// HMAC secret used to sign and verify tokens.
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
    pub body_limit_bytes: usize,
}

impl AppConfig {
    /// Load from process environment. Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let database = match get("DATABASE_URL") {
            Some(url) => Some(PgConnectOptions::from_str(&url).map_err(|e| ConfigError::Invalid {
                key: "DATABASE_URL",
                value: "[redacted]".into(),
                reason: e.to_string(),
            })?),
            None => database_from_parts(&get, lookup("DB_PASSWORD").filter(|p| !p.is_empty()))?,
        };

        Ok(AppConfig {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT)?,
            database,
            jwt_secret,
            token_ttl_secs: parse_or("TOKEN_TTL_SECS", get("TOKEN_TTL_SECS"), DEFAULT_TOKEN_TTL_SECS)?,
            body_limit_bytes: parse_or("BODY_LIMIT_BYTES", get("BODY_LIMIT_BYTES"), DEFAULT_BODY_LIMIT_BYTES)?,
        })
    }

    /// Config with defaults and the given secret; no database.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        AppConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: None,
            jwt_secret: secret.into(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database.as_ref().map(|_| "[redacted]"))
            .field("jwt_secret", &"[redacted]")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("body_limit_bytes", &self.body_limit_bytes)
            .finish()
    }
}

/// Connection from `DB_HOST` (optionally `host:port`), `DB_NAME`, `DB_USER` and
/// `DB_PASSWORD`. Credentials are passed as-is, never spliced into a URL.
fn database_from_parts<G>(get: &G, password: Option<String>) -> Result<Option<PgConnectOptions>, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let (Some(host), Some(name)) = (get("DB_HOST"), get("DB_NAME")) else {
        return Ok(None);
    };
    let (host, port) = match host.rsplit_once(':') {
        Some((h, p)) => (h.to_string(), parse_or("DB_HOST", Some(p.to_string()), DEFAULT_DB_PORT)?),
        None => (host, DEFAULT_DB_PORT),
    };
    let mut options = PgConnectOptions::new().host(&host).port(port).database(&name);
    if let Some(user) = get("DB_USER") {
        options = options.username(&user);
    }
    if let Some(password) = password {
        options = options.password(&password);
    }
    Ok(Some(options))
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn defaults_apply() {
        let config = load(&[("JWT_SECRET", "s3cret")]).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.token_ttl_secs, 86_400);
        assert!(config.database.is_none());
    }

    #[test]
    fn secret_is_required() {
        assert!(matches!(load(&[]), Err(ConfigError::Missing("JWT_SECRET"))));
        assert!(matches!(load(&[("JWT_SECRET", "  ")]), Err(ConfigError::Missing(_))));
    }

    #[test]
    fn invalid_port_is_reported() {
        let err = load(&[("JWT_SECRET", "x"), ("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn database_url_from_parts() {
        let config = load(&[
            ("JWT_SECRET", "x"),
            ("DB_HOST", "db:5432"),
            ("DB_USER", "conduit"),
            ("DB_PASSWORD", "pw"),
            ("DB_NAME", "realworld"),
        ])
        .unwrap();
        let db = config.database.unwrap();
        assert_eq!(db.get_host(), "db");
        assert_eq!(db.get_port(), 5432);
        assert_eq!(db.get_username(), "conduit");
        assert_eq!(db.get_database(), Some("realworld"));
    }

    #[test]
    fn database_password_with_url_delimiters_keeps_parts_intact() {
        let config = load(&[
            ("JWT_SECRET", "x"),
            ("DB_HOST", "db"),
            ("DB_USER", "u"),
            ("DB_PASSWORD", "p@ss/word"),
            ("DB_NAME", "realworld"),
        ])
        .unwrap();
        let db = config.database.unwrap();
        assert_eq!(db.get_host(), "db");
        assert_eq!(db.get_username(), "u");
        assert_eq!(db.get_database(), Some("realworld"));
    }

    #[test]
    fn invalid_database_port_is_reported() {
        let err = load(&[("JWT_SECRET", "x"), ("DB_HOST", "db:pg"), ("DB_NAME", "realworld")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DB_HOST", .. }));
    }

    #[test]
    fn explicit_database_url_wins() {
        let config = load(&[
            ("JWT_SECRET", "x"),
            ("DATABASE_URL", "postgres://localhost/conduit"),
            ("DB_HOST", "ignored"),
            ("DB_NAME", "ignored"),
        ])
        .unwrap();
        let db = config.database.unwrap();
        assert_eq!(db.get_host(), "localhost");
        assert_eq!(db.get_database(), Some("conduit"));
    }

    #[test]
    fn malformed_database_url_is_reported_without_leaking_it() {
        let err = load(&[("JWT_SECRET", "x"), ("DATABASE_URL", "hunter2 is not a url")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DATABASE_URL", .. }));
        assert!(!err.to_string().contains("hunter2"));
    }

    #[test]
    fn debug_redacts_secret() {
        let rendered = format!("{:?}", AppConfig::with_secret("hunter2"));
        assert!(!rendered.contains("hunter2"));
    }
}
