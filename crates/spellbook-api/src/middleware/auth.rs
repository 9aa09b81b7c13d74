//! `authenticate`: bearer token validation for protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use spellbook_auth::{bearer, jwt};

use crate::error::ApiError;
use crate::state::AppState;

/// Validates the bearer access token and attaches its [`AuthContext`]
/// to the request extensions. The same context is copied onto the
/// response for the access log.
///
/// Every failure answers 401 with the same body.
///
/// [`AuthContext`]: spellbook_auth::AuthContext
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer::from_headers(request.headers())?;
    let ctx = jwt::validate(token, &state.secret)?;

    debug!(account_id = %ctx.account_id, role = %ctx.role, "Request authenticated");
    request.extensions_mut().insert(ctx);

    let mut response = next.run(request).await;
    response.extensions_mut().insert(ctx);
    Ok(response)
}
