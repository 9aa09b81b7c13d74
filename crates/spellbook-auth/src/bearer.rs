//! Bearer credential extraction from the `Authorization` header.

use http::HeaderMap;
use http::header::AUTHORIZATION;

use crate::error::AuthError;

/// Scheme prefix, matched case-sensitively.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Extracts the token from an `Authorization` header value.
///
/// Surrounding whitespace after the prefix is trimmed.
pub fn extract(header: &str) -> Result<&str, AuthError> {
    if header.is_empty() {
        return Err(AuthError::MalformedCredential("missing authorization header"));
    }

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MalformedCredential("expected bearer scheme"))?
        .trim();

    if token.is_empty() {
        return Err(AuthError::MalformedCredential("empty bearer token"));
    }
    Ok(token)
}

/// Extracts the bearer token from request headers.
pub fn from_headers(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MalformedCredential("missing authorization header"))?
        .to_str()
        .map_err(|_| AuthError::MalformedCredential("non-ascii authorization header"))?;
    extract(value)
}
