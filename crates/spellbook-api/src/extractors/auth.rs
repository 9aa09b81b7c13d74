//! `AuthUser` extractor: reads the identity `authenticate` attached.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use spellbook_auth::{AuthContext, AuthError};

use crate::error::ApiError;

/// Authenticated caller available in handlers behind `authenticate`.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub AuthContext);

impl std::ops::Deref for AuthUser {
    type Target = AuthContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .copied()
            .map(AuthUser)
            .ok_or_else(|| AuthError::MalformedCredential("no authenticated identity").into())
    }
}
