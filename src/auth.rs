//! Token signing and password hashing.

use crate::error::AppError;
use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};
use argon2::Argon2;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims carried by every session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 signer built from the configured secret.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl TokenSigner {
    pub fn new(secret: &[u8], ttl_secs: u64) -> Self {
        TokenSigner {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs: i64::try_from(ttl_secs).unwrap_or(i64::MAX),
        }
    }

    pub fn sign(&self, user_id: Uuid, username: &str, email: &str) -> Result<String, AppError> {
        let iat = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            email: email.to_string(),
            iat,
            exp: iat.saturating_add(self.ttl_secs),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::TokenSigning(e.to_string()))?;
        tracing::debug!(user_id = %user_id, "token issued");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))?;
        Ok(data.claims)
    }
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::PasswordHash(e.to_string()))
}

/// `hash_password` on the blocking pool.
pub async fn hash_password_blocking(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::PasswordHash(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_token_round_trips_claims() {
        let signer = TokenSigner::new(b"test-secret", 60);
        let id = Uuid::new_v4();
        let token = signer.sign(id, "jake", "jake@jake.jake").unwrap();
        let claims = signer.verify(&token).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.username, "jake");
        assert_eq!(claims.exp - claims.iat, 60);
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let token = TokenSigner::new(b"one", 60)
            .sign(Uuid::new_v4(), "jake", "jake@jake.jake")
            .unwrap();
        let err = TokenSigner::new(b"two", 60).verify(&token).unwrap_err();
        assert!(matches!(err, AppError::Token(_)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(TokenSigner::new(b"k", 60).verify("not.a.token").is_err());
    }

    #[test]
    fn password_hash_is_salted_argon2() {
        let first = hash_password("jakejake").unwrap();
        let second = hash_password("jakejake").unwrap();
        assert!(first.starts_with("$argon2"));
        assert!(!first.contains("jakejake"));
        assert_ne!(first, second);
    }
}
