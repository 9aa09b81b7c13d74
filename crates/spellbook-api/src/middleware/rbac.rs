//! `require_privileged`: role gate layered after `authenticate`.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use spellbook_auth::{AuthContext, AuthError};

use crate::error::ApiError;

/// Passes only requests whose attached identity holds the privileged role.
///
/// A request with no attached identity is refused with 403, never passed.
pub async fn require_privileged(request: Request, next: Next) -> Result<Response, ApiError> {
    let identity = request
        .extensions()
        .get::<AuthContext>()
        .map(|ctx| (ctx.account_id, ctx.is_privileged()));

    match identity {
        Some((_, true)) => Ok(next.run(request).await),
        Some((account_id, false)) => {
            warn!(account_id = %account_id, path = %request.uri().path(), "Privileged route refused");
            Err(AuthError::Forbidden.into())
        }
        None => {
            warn!(path = %request.uri().path(), "Privileged route reached without identity");
            Err(AuthError::Forbidden.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{self, StatusCode};
    use axum::middleware::from_fn;
    use axum::routing::get;
    use tower::ServiceExt;

    use super::*;
    use spellbook_core::types::AccountId;
    use spellbook_entity::account::Role;

    fn app() -> Router {
        Router::new()
            .route("/", get(|| async { "granted" }))
            .route_layer(from_fn(require_privileged))
    }

    fn request_with(identity: Option<AuthContext>) -> Request {
        let mut request = http::Request::builder().uri("/").body(Body::empty()).unwrap();
        if let Some(ctx) = identity {
            request.extensions_mut().insert(ctx);
        }
        request
    }

    #[tokio::test]
    async fn test_without_identity_is_forbidden() {
        let response = app().oneshot(request_with(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_user_is_forbidden() {
        let ctx = AuthContext::new(AccountId::new(), Role::User);
        let response = app().oneshot(request_with(Some(ctx))).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_passes() {
        let ctx = AuthContext::new(AccountId::new(), Role::Admin);
        let response = app().oneshot(request_with(Some(ctx))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
