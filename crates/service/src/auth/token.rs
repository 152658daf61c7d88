//! HS256 bearer tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::role::RoleName;

use super::domain::AuthUser;
use super::errors::AuthError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub username: String,
    pub role: RoleName,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.sub).map_err(|e| AuthError::TokenError(e.to_string()))
    }

    pub fn has_role(&self, allowed: &[RoleName]) -> bool {
        allowed.contains(&self.role)
    }
}

/// Sign a token for `user`; returns the token and its expiry (unix seconds).
pub fn issue_token(user: &AuthUser, secret: &str, ttl_hours: i64) -> Result<(String, i64), AuthError> {
    let now = Utc::now();
    let exp = (now + Duration::hours(ttl_hours)).timestamp();
    let claims = Claims { sub: user.id.to_string(), username: user.username.clone(), role: user.role, iat: now.timestamp(), exp };
    let token = encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AuthError::TokenError(e.to_string()))?;
    Ok((token, exp))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &Validation::new(Algorithm::HS256))
        .map_err(|_| AuthError::Unauthorized)?;
    Ok(data.claims)
}
