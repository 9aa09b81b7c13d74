//! Access token validation.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, Validation, decode};

use spellbook_core::types::AccountId;

use super::claims::{Claims, ISSUER};
use super::secret::SigningSecret;
use crate::context::AuthContext;
use crate::error::AuthError;

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is compared strictly below, without leeway.
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_issuer(&[ISSUER]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);
    validation
}

/// Validates an access token and returns the identity it carries.
///
/// Checks run in a fixed order: MAC, issuer, expiry, subject. The error
/// names the first failing check; callers surface all of them alike.
pub fn validate(token: &str, secret: &SigningSecret) -> Result<AuthContext, AuthError> {
    let data = decode::<Claims>(token, &secret.decoding_key(), &validation()).map_err(|e| {
        match e.kind() {
            ErrorKind::InvalidIssuer => AuthError::WrongIssuer,
            ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::InvalidSignature,
        }
    })?;
    let claims = data.claims;

    if claims.is_expired_at(Utc::now()) {
        return Err(AuthError::Expired);
    }

    let account_id: AccountId = claims
        .sub
        .parse()
        .map_err(|_| AuthError::InvalidSignature)?;

    Ok(AuthContext::new(account_id, claims.role))
}
