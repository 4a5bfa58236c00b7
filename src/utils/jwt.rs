use anyhow::{Context, Result};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (username)
    pub exp: usize,  // Expiration time (as UTC timestamp)
    pub iat: usize,  // Issued at (as UTC timestamp)
}

pub fn create_token(secret: &str, username: &str, ttl_minutes: i64) -> Result<String> {
    let now = chrono::Utc::now();
    let expiry = now + chrono::Duration::minutes(ttl_minutes);

    let claims = Claims {
        sub: username.to_string(),
        exp: expiry.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT")?;

    Ok(token)
}

pub fn validate_token(secret: &str, token: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT")?;

    Ok(token_data.claims)
}

/// Identity of an authenticated caller. Handlers only need to know one exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub subject: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken(#[source] anyhow::Error),
}

/// Checks a bearer token before any protected handler runs.
pub trait Authorizer: Send + Sync {
    fn authorize(&self, token: &str) -> Result<Caller, AuthError>;
}

pub struct JwtAuthorizer {
    secret: String,
}

impl JwtAuthorizer {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl Authorizer for JwtAuthorizer {
    fn authorize(&self, token: &str) -> Result<Caller, AuthError> {
        let claims = validate_token(&self.secret, token).map_err(AuthError::InvalidToken)?;
        Ok(Caller {
            subject: claims.sub,
        })
    }
}
