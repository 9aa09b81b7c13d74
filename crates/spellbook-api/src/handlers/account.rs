//! Account self-service handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::{DeleteAccountRequest, RegisterRequest, UpdateAccountRequest};
use crate::dto::response::{AccountResponse, ApiResponse, IdentityResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/users
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AccountResponse>>), ApiError> {
    let account = state
        .session_manager
        .register(&req.email, &req.password)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(account.into()))))
}

/// GET /api/users/me
pub async fn me(auth: AuthUser) -> Json<ApiResponse<IdentityResponse>> {
    Json(ApiResponse::ok(auth.0.into()))
}

/// PUT /api/users
pub async fn update_account(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateAccountRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let account = state
        .session_manager
        .update_account(auth.account_id, req.email.as_deref(), req.password.as_deref())
        .await?;

    Ok(Json(ApiResponse::ok(account.into())))
}

/// POST /api/users/delete
pub async fn delete_account(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<DeleteAccountRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .session_manager
        .delete_account(auth.account_id, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Account deleted".to_string(),
    })))
}
