//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use spellbook_core::types::AccountId;

use super::role::Role;

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique account identifier.
    pub id: AccountId,
    /// Login email address.
    pub email: String,
    /// Self-describing Argon2id password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Privilege level.
    pub role: Role,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Check if this account has the privileged role.
    pub fn is_admin(&self) -> bool {
        self.role.is_privileged()
    }
}

/// Data required to create a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccount {
    /// Login email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: Role,
}

/// Changes to apply to an existing account. `None` leaves a field as is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountUpdate {
    /// New normalized email address.
    pub email: Option<String>,
    /// New pre-hashed password.
    pub password_hash: Option<String>,
}

impl AccountUpdate {
    /// Check if the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password_hash.is_none()
    }
}
