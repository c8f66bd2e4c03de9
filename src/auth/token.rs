use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Signed claims envelope. Caller-supplied claims live under `payload` so
/// the reserved registered claims never collide with application data.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub payload: Value,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token: {0}")]
    Invalid(String),
    #[error("token generation failed: {0}")]
    Generation(String),
    #[error("signing secret is empty")]
    MissingSecret,
}

/// Issue an HMAC-SHA256 signed token carrying `payload`, expiring after
/// `ttl`. Administrator and client sessions use independent secrets and
/// lifetimes, so both are parameters on every call.
pub fn issue(payload: Value, secret: &str, ttl: Duration) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }
    let now = Utc::now();
    let claims = Claims {
        payload,
        exp: (now + ttl).timestamp(),
        iat: now.timestamp(),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| TokenError::Generation(e.to_string()))
}

/// Verify signature and expiry, returning the wrapped payload.
pub fn verify(token: &str, secret: &str) -> Result<Value, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }
    let mut validation = Validation::default();
    validation.leeway = 0;
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims.payload)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(e.to_string()),
        })
}

/// Validate the signature but tolerate an elapsed expiry. Used only by
/// refresh flows; any failure other than expiry yields `None`.
pub fn decode_ignoring_expiry(token: &str, secret: &str) -> Option<Value> {
    if secret.is_empty() {
        return None;
    }
    let mut validation = Validation::default();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims.payload)
        .ok()
}
