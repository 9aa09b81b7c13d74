//! Privileged handlers; mounted behind `authenticate` and `require_privileged`.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

use crate::dto::request::RegisterRequest;
use crate::dto::response::{AccountResponse, ApiResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/admin/users
pub async fn create_admin(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AccountResponse>>), ApiError> {
    let account = state
        .session_manager
        .create_admin(&req.email, &req.password)
        .await?;

    info!(created_by = %auth.account_id, account_id = %account.id, "Admin account created");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(account.into()))))
}
