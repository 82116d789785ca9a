use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::models::UserRole;

/// Represents the claims embedded in the API's bearer tokens.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Subject of the token: the user's unique identifier.
    pub sub: String,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: i64,
    /// Role the account held when the token was issued.
    #[serde(default)]
    pub role: UserRole,
    /// Display name, when the server embeds one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Account email, when the server embeds one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Claims {
    /// Returns true when the expiration timestamp is at or before `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}

/// Decodes the claims from a bearer token without verifying its signature.
///
/// The client never holds the signing secret; verification is the server's
/// job. Decoding here only reads the embedded claims, and expiration is
/// checked separately so the caller supplies the clock.
///
/// # Arguments
/// * `token` - The raw JWT string.
///
/// # Returns
/// A `Result` containing the decoded `Claims`, or the decoding error for a
/// malformed token.
pub(crate) fn decode_claims(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation).map(|data| data.claims)
}

/// Derives session claims from a token at a given instant.
///
/// Returns `None` when the token cannot be decoded or has already expired.
/// Callers treat both cases identically, as a dead session; the distinction
/// only shows up in the log.
pub fn derive_session(token: &str, now: DateTime<Utc>) -> Option<Claims> {
    let claims = match decode_claims(token) {
        Ok(claims) => claims,
        Err(e) => {
            log::warn!("Discarding token that failed to decode: {}", e);
            return None;
        }
    };

    if claims.is_expired(now) {
        log::info!("Discarding token expired at {}", claims.exp);
        return None;
    }

    Some(claims)
}
