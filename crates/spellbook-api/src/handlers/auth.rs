//! Token handlers: login, refresh, revoke.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};

use spellbook_auth::bearer;

use crate::dto::request::LoginRequest;
use crate::dto::response::{ApiResponse, LoginResponse, TokenResponse};
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let result = state.session_manager.login(&req.email, &req.password).await?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        account: result.account.into(),
        token: result.access_token,
        expires_at: result.access_expires_at,
        refresh_token: result.refresh_token,
    })))
}

/// POST /api/refresh
///
/// The refresh token travels as `Authorization: Bearer <refresh token>`.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    let refresh_token = bearer::from_headers(&headers)?;
    let grant = state.session_manager.refresh(refresh_token).await?;

    Ok(Json(ApiResponse::ok(TokenResponse {
        token: grant.access_token,
        expires_at: grant.expires_at,
    })))
}

/// POST /api/revoke
pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let refresh_token = bearer::from_headers(&headers)?;
    state.session_manager.revoke(refresh_token).await?;
    Ok(StatusCode::NO_CONTENT)
}
