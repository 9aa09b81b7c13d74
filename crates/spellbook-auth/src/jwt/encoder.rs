//! Access token creation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, Header, encode};

use spellbook_core::types::AccountId;
use spellbook_entity::account::Role;

use super::claims::{Claims, ISSUER};
use super::secret::SigningSecret;
use crate::error::AuthError;

/// A freshly signed access token and its expiry.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AccessToken {
    /// Compact JWT string.
    pub token: String,
    /// Moment the token stops validating.
    pub expires_at: DateTime<Utc>,
}

/// Signs an access token for `account_id` valid for `ttl`.
///
/// A non-positive `ttl` yields a token that is already expired.
pub fn issue(
    account_id: AccountId,
    role: Role,
    secret: &SigningSecret,
    ttl: Duration,
) -> Result<String, AuthError> {
    issue_token(account_id, role, secret, ttl).map(|t| t.token)
}

/// Like [`issue`], but also reports the expiry.
pub fn issue_token(
    account_id: AccountId,
    role: Role,
    secret: &SigningSecret,
    ttl: Duration,
) -> Result<AccessToken, AuthError> {
    let now = Utc::now();
    let iat = now.timestamp();
    let exp = iat.saturating_add(ttl_seconds(ttl));

    let claims = Claims {
        sub: account_id.to_string(),
        role,
        iss: ISSUER.to_string(),
        iat,
        exp,
    };

    let expires_at = claims
        .expires_at()
        .ok_or_else(|| AuthError::TokenEncoding(format!("expiry {exp} out of range")))?;

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &secret.encoding_key(),
    )
    .map_err(|e| AuthError::TokenEncoding(e.to_string()))?;

    Ok(AccessToken { token, expires_at })
}

/// Whole seconds to add to `iat`, rounding positive sub-second TTLs up.
fn ttl_seconds(ttl: Duration) -> i64 {
    let secs = ttl.num_seconds();
    if ttl > Duration::zero() && ttl > Duration::seconds(secs) {
        secs + 1
    } else {
        secs
    }
}
