//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use spellbook_auth::AuthContext;
use spellbook_entity::account::Account;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Public account fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: Uuid,
    /// Email.
    pub email: String,
    /// Role.
    pub role: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id.into_uuid(),
            email: account.email,
            role: account.role.to_string(),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Login response: the account plus both tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Account info.
    #[serde(flatten)]
    pub account: AccountResponse,
    /// Access token.
    pub token: String,
    /// Access token expiration.
    pub expires_at: DateTime<Utc>,
    /// Refresh token.
    pub refresh_token: String,
}

/// A freshly minted access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Access token.
    pub token: String,
    /// Access token expiration.
    pub expires_at: DateTime<Utc>,
}

/// Identity carried by the caller's access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityResponse {
    /// Account ID.
    pub account_id: Uuid,
    /// Role embedded at issuance.
    pub role: String,
}

impl From<AuthContext> for IdentityResponse {
    fn from(ctx: AuthContext) -> Self {
        Self {
            account_id: ctx.account_id.into_uuid(),
            role: ctx.role.to_string(),
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}
