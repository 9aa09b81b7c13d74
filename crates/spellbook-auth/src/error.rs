//! Authentication error classes and their mapping into [`AppError`].

use thiserror::Error;

use spellbook_core::error::AppError;

/// Message returned to clients for every authentication failure.
///
/// The concrete cause is only written to the debug log.
pub const GENERIC_AUTH_MESSAGE: &str = "Invalid or missing credentials";

/// Failures raised by the authentication core.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing, empty, or non-bearer `Authorization` credential.
    #[error("malformed credential: {0}")]
    MalformedCredential(&'static str),
    /// MAC mismatch, corrupted token, or unusable claims.
    #[error("invalid token")]
    InvalidSignature,
    /// The token expiry is at or before the current time.
    #[error("token expired")]
    Expired,
    /// The token was not issued by this service.
    #[error("unexpected token issuer")]
    WrongIssuer,
    /// A stored password hash could not be parsed.
    #[error("malformed password hash: {0}")]
    MalformedHash(String),
    /// The secure random source could not supply enough bytes.
    #[error("entropy source failure: {0}")]
    EntropySourceFailure(String),
    /// Authenticated, but the role is not privileged.
    #[error("privileged role required")]
    Forbidden,
    /// Password hashing failed internally.
    #[error("password hashing failed: {0}")]
    Hashing(String),
    /// Signing a new access token failed.
    #[error("token encoding failed: {0}")]
    TokenEncoding(String),
}

impl AuthError {
    /// Returns `true` for failures that must surface as 401.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            Self::MalformedCredential(_) | Self::InvalidSignature | Self::Expired | Self::WrongIssuer
        )
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        if err.is_authentication_failure() {
            tracing::debug!(error = %err, "Authentication rejected");
            return AppError::authentication(GENERIC_AUTH_MESSAGE);
        }

        match err {
            AuthError::Forbidden => AppError::authorization("Forbidden"),
            other => {
                let message = other.to_string();
                AppError::with_source(spellbook_core::error::ErrorKind::Internal, message, other)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spellbook_core::error::ErrorKind;

    #[test]
    fn test_token_failures_are_indistinguishable() {
        let causes = [
            AuthError::MalformedCredential("missing"),
            AuthError::InvalidSignature,
            AuthError::Expired,
            AuthError::WrongIssuer,
        ];

        for cause in causes {
            let app: AppError = cause.into();
            assert_eq!(app.kind, ErrorKind::Authentication);
            assert_eq!(app.message, GENERIC_AUTH_MESSAGE);
        }
    }

    #[test]
    fn test_forbidden_and_internal_mapping() {
        let app: AppError = AuthError::Forbidden.into();
        assert_eq!(app.kind, ErrorKind::Authorization);

        let app: AppError = AuthError::EntropySourceFailure("exhausted".into()).into();
        assert_eq!(app.kind, ErrorKind::Internal);

        let app: AppError = AuthError::MalformedHash("bad".into()).into();
        assert_eq!(app.kind, ErrorKind::Internal);
    }
}
