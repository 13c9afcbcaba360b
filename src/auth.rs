use crate::principal::Principal;
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
struct Claims {
    username: String,
    exp: i64,
}

/// Signs and verifies the bearer tokens that identify a principal
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Issue a token for a user that expires after the configured lifetime
    pub fn issue(&self, username: &str) -> Result<String> {
        let claims = Claims {
            username: username.to_owned(),
            exp: (Utc::now() + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .context("Failed to sign token")
    }

    /// Verify a token's signature and expiry and return the principal it identifies
    pub fn verify(&self, token: &str) -> jsonwebtoken::errors::Result<Principal> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))?;
        Ok(Principal::new(data.claims.username))
    }
}
