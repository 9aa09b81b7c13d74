//! Persistence collaborators for accounts and refresh tokens.
//!
//! The auth core only talks to these traits. [`MemoryStore`] backs both
//! for single-node deployments and tests.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use spellbook_core::result::AppResult;
use spellbook_core::types::AccountId;
use spellbook_entity::account::{Account, AccountUpdate, NewAccount};

pub use memory::MemoryStore;

/// Account persistence.
#[async_trait]
pub trait AccountStore: Send + Sync + std::fmt::Debug + 'static {
    /// Creates an account. Fails with a conflict if the email is taken.
    async fn create_account(&self, account: NewAccount) -> AppResult<Account>;

    /// Finds an account by ID.
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>>;

    /// Finds an account by normalized email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Applies `update` to an account and returns the stored result.
    ///
    /// Fails with not-found for an unknown ID and with a conflict if the
    /// new email belongs to another account.
    async fn update_account(&self, id: AccountId, update: AccountUpdate) -> AppResult<Account>;

    /// Deletes an account and every refresh token bound to it.
    /// Returns `false` if the account did not exist.
    async fn delete_account(&self, id: AccountId) -> AppResult<bool>;
}

/// Refresh token persistence.
///
/// Lookups read current state on every call; a deleted or expired token
/// is never returned.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync + std::fmt::Debug + 'static {
    /// Stores a refresh token bound to `account_id`.
    async fn create_refresh_token(
        &self,
        token: &str,
        account_id: AccountId,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Resolves a live refresh token to its account.
    async fn find_account_by_refresh_token(&self, token: &str) -> AppResult<Option<AccountId>>;

    /// Deletes a refresh token. Returns `false` if it was unknown.
    async fn delete_refresh_token(&self, token: &str) -> AppResult<bool>;
}
