//! In-memory account and refresh token store for single-node deployments.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use spellbook_core::error::AppError;
use spellbook_core::result::AppResult;
use spellbook_core::types::AccountId;
use spellbook_entity::account::{Account, AccountUpdate, NewAccount};

use super::{AccountStore, RefreshTokenStore};

/// A stored refresh token record.
#[derive(Debug, Clone)]
struct RefreshRecord {
    /// Owning account.
    account_id: AccountId,
    /// Hard expiry.
    expires_at: DateTime<Utc>,
}

/// Concurrent in-memory store backed by `DashMap`.
///
/// Cloning shares the underlying maps.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    accounts: Arc<DashMap<AccountId, Account>>,
    /// Normalized email to account ID.
    emails: Arc<DashMap<String, AccountId>>,
    refresh_tokens: Arc<DashMap<String, RefreshRecord>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Number of stored refresh tokens, including expired ones not yet purged.
    pub fn refresh_token_count(&self) -> usize {
        self.refresh_tokens.len()
    }

    /// Removes expired refresh tokens. Returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.refresh_tokens.len();
        self.refresh_tokens.retain(|_, record| record.expires_at > now);
        let removed = before.saturating_sub(self.refresh_tokens.len());
        if removed > 0 {
            debug!(removed, "Purged expired refresh tokens");
        }
        removed
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn create_account(&self, new: NewAccount) -> AppResult<Account> {
        let now = Utc::now();
        let account = Account {
            id: AccountId::new(),
            email: new.email,
            password_hash: new.password_hash,
            role: new.role,
            created_at: now,
            updated_at: now,
        };

        match self.emails.entry(account.email.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Email '{}' is already registered",
                account.email
            ))),
            Entry::Vacant(slot) => {
                slot.insert(account.id);
                self.accounts.insert(account.id, account.clone());
                Ok(account)
            }
        }
    }

    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        Ok(self.accounts.get(&id).map(|a| a.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let id = match self.emails.get(email) {
            Some(id) => *id.value(),
            None => return Ok(None),
        };
        self.find_by_id(id).await
    }

    async fn update_account(&self, id: AccountId, update: AccountUpdate) -> AppResult<Account> {
        let Some(current_email) = self.accounts.get(&id).map(|a| a.email.clone()) else {
            return Err(AppError::not_found("Account not found"));
        };

        // Email index first, then the account, the same order as `create_account`.
        let new_email = update.email.filter(|e| *e != current_email);
        if let Some(email) = &new_email {
            match self.emails.entry(email.clone()) {
                Entry::Occupied(_) => {
                    return Err(AppError::conflict(format!(
                        "Email '{email}' is already registered"
                    )));
                }
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
            }
        }

        let Some(mut entry) = self.accounts.get_mut(&id) else {
            if let Some(email) = &new_email {
                self.emails.remove(email);
            }
            return Err(AppError::not_found("Account not found"));
        };
        let account = entry.value_mut();
        let old_email = new_email.map(|email| std::mem::replace(&mut account.email, email));
        if let Some(hash) = update.password_hash {
            account.password_hash = hash;
        }
        account.updated_at = Utc::now();
        let updated = account.clone();
        drop(entry);

        if let Some(old) = old_email {
            self.emails.remove_if(&old, |_, owner| *owner == id);
        }
        Ok(updated)
    }

    async fn delete_account(&self, id: AccountId) -> AppResult<bool> {
        let Some((_, account)) = self.accounts.remove(&id) else {
            return Ok(false);
        };
        self.emails.remove(&account.email);
        self.refresh_tokens.retain(|_, record| record.account_id != id);
        Ok(true)
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryStore {
    async fn create_refresh_token(
        &self,
        token: &str,
        account_id: AccountId,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        self.refresh_tokens.insert(
            token.to_string(),
            RefreshRecord {
                account_id,
                expires_at,
            },
        );
        Ok(())
    }

    async fn find_account_by_refresh_token(&self, token: &str) -> AppResult<Option<AccountId>> {
        let Some(record) = self.refresh_tokens.get(token) else {
            return Ok(None);
        };
        if record.expires_at <= Utc::now() {
            return Ok(None);
        }
        Ok(Some(record.account_id))
    }

    async fn delete_refresh_token(&self, token: &str) -> AppResult<bool> {
        Ok(self.refresh_tokens.remove(token).is_some())
    }
}
