//! Session lifecycle manager: registration, login, refresh token flows.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use spellbook_core::config::AuthConfig;
use spellbook_core::error::AppError;
use spellbook_core::result::AppResult;
use spellbook_core::types::AccountId;
use spellbook_entity::account::{Account, AccountUpdate, NewAccount, Role};

use crate::context::AuthContext;
use crate::error::{AuthError, GENERIC_AUTH_MESSAGE};
use crate::jwt::{self, SigningSecret};
use crate::password::validator::normalize_email;
use crate::password::{CredentialValidator, PasswordHasher};
use crate::refresh;
use crate::store::{AccountStore, RefreshTokenStore};

/// Message for failed logins; identical for unknown email and wrong password.
const LOGIN_FAILED: &str = "Incorrect email or password";

/// Result of a successful login.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LoginResult {
    /// The authenticated account.
    pub account: Account,
    /// Signed access token.
    pub access_token: String,
    /// When the access token stops validating.
    pub access_expires_at: DateTime<Utc>,
    /// Opaque refresh token, persisted server-side.
    pub refresh_token: String,
}

/// A new access token minted from a refresh token.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AccessGrant {
    /// Signed access token.
    pub access_token: String,
    /// When the access token stops validating.
    pub expires_at: DateTime<Utc>,
}

/// Drives the account and token lifecycle over the store collaborators.
#[derive(Clone)]
pub struct SessionManager {
    /// Account persistence.
    accounts: Arc<dyn AccountStore>,
    /// Refresh token persistence.
    refresh_tokens: Arc<dyn RefreshTokenStore>,
    /// Password hasher.
    hasher: PasswordHasher,
    /// Email and password policy.
    validator: CredentialValidator,
    /// Access token signing key.
    secret: SigningSecret,
    /// Access token lifetime.
    access_ttl: Duration,
    /// Refresh token lifetime.
    refresh_ttl: Duration,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl SessionManager {
    /// Creates a session manager from configuration and store collaborators.
    pub fn new(
        config: &AuthConfig,
        accounts: Arc<dyn AccountStore>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
    ) -> AppResult<Self> {
        let secret = SigningSecret::from(config.jwt_secret.as_str());
        if secret.is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if config.access_token_ttl_seconds <= 0 {
            return Err(AppError::configuration(
                "auth.access_token_ttl_seconds must be positive",
            ));
        }
        if config.refresh_token_ttl_days <= 0 {
            return Err(AppError::configuration(
                "auth.refresh_token_ttl_days must be positive",
            ));
        }

        let access_ttl = Duration::try_seconds(config.access_token_ttl_seconds).ok_or_else(|| {
            AppError::configuration("auth.access_token_ttl_seconds is out of range")
        })?;
        let refresh_ttl = Duration::try_days(config.refresh_token_ttl_days).ok_or_else(|| {
            AppError::configuration("auth.refresh_token_ttl_days is out of range")
        })?;

        let hasher = PasswordHasher::new(&config.hashing)
            .map_err(|e| AppError::configuration(e.to_string()))?;

        Ok(Self {
            accounts,
            refresh_tokens,
            hasher,
            validator: CredentialValidator::new(config),
            secret,
            access_ttl,
            refresh_ttl,
        })
    }

    /// The signing secret used for access tokens.
    pub fn secret(&self) -> &SigningSecret {
        &self.secret
    }

    /// Validates an access token against this manager's secret.
    pub fn authenticate(&self, token: &str) -> Result<AuthContext, AuthError> {
        jwt::validate(token, &self.secret)
    }

    /// Registers a regular account.
    pub async fn register(&self, email: &str, password: &str) -> AppResult<Account> {
        self.create_account(email, password, Role::User).await
    }

    /// Registers a privileged account.
    pub async fn create_admin(&self, email: &str, password: &str) -> AppResult<Account> {
        self.create_account(email, password, Role::Admin).await
    }

    async fn create_account(&self, email: &str, password: &str, role: Role) -> AppResult<Account> {
        let email = normalize_email(email);
        self.validator.validate_email(&email)?;
        self.validator.validate_password(password)?;

        let password_hash = self.hasher.hash(password)?;
        let account = self
            .accounts
            .create_account(NewAccount {
                email,
                password_hash,
                role,
            })
            .await?;

        info!(account_id = %account.id, role = %account.role, "Account created");
        Ok(account)
    }

    /// Verifies credentials and issues an access token plus a refresh token.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginResult> {
        let email = normalize_email(email);
        let Some(account) = self.accounts.find_by_email(&email).await? else {
            warn!("Login failed: unknown email");
            return Err(AppError::authentication(LOGIN_FAILED));
        };

        if !self.hasher.verify(password, &account.password_hash)? {
            warn!(account_id = %account.id, "Login failed: wrong password");
            return Err(AppError::authentication(LOGIN_FAILED));
        }

        let access = jwt::issue_token(account.id, account.role, &self.secret, self.access_ttl)?;
        let refresh_expires_at = Utc::now()
            .checked_add_signed(self.refresh_ttl)
            .ok_or_else(|| AppError::internal("Refresh token expiry is out of range"))?;
        let refresh_token = refresh::generate()?;
        self.refresh_tokens
            .create_refresh_token(&refresh_token, account.id, refresh_expires_at)
            .await?;

        info!(account_id = %account.id, "Login successful");
        Ok(LoginResult {
            account,
            access_token: access.token,
            access_expires_at: access.expires_at,
            refresh_token,
        })
    }

    /// Exchanges a live refresh token for a new access token.
    ///
    /// The role comes from the account as currently stored.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<AccessGrant> {
        let Some(account_id) = self
            .refresh_tokens
            .find_account_by_refresh_token(refresh_token)
            .await?
        else {
            return Err(AppError::authentication(GENERIC_AUTH_MESSAGE));
        };

        let Some(account) = self.accounts.find_by_id(account_id).await? else {
            warn!(account_id = %account_id, "Refresh token bound to missing account");
            return Err(AppError::authentication(GENERIC_AUTH_MESSAGE));
        };

        let access = jwt::issue_token(account.id, account.role, &self.secret, self.access_ttl)?;
        info!(account_id = %account.id, "Access token refreshed");
        Ok(AccessGrant {
            access_token: access.token,
            expires_at: access.expires_at,
        })
    }

    /// Revokes a refresh token. Unknown tokens are ignored.
    pub async fn revoke(&self, refresh_token: &str) -> AppResult<()> {
        if self.refresh_tokens.delete_refresh_token(refresh_token).await? {
            info!("Refresh token revoked");
        }
        Ok(())
    }

    /// Returns the stored account for an authenticated caller.
    pub async fn current_account(&self, account_id: AccountId) -> AppResult<Account> {
        self.accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::not_found("Account not found"))
    }

    /// Changes the caller's email and/or password.
    ///
    /// Empty values are treated as absent. The role is never touched.
    pub async fn update_account(
        &self,
        account_id: AccountId,
        email: Option<&str>,
        password: Option<&str>,
    ) -> AppResult<Account> {
        let email = email.filter(|e| !e.trim().is_empty()).map(normalize_email);
        if let Some(email) = &email {
            self.validator.validate_email(email)?;
        }

        let password_hash = match password.filter(|p| !p.is_empty()) {
            Some(password) => {
                self.validator.validate_password(password)?;
                Some(self.hasher.hash(password)?)
            }
            None => None,
        };

        let update = AccountUpdate {
            email,
            password_hash,
        };
        if update.is_empty() {
            return self.current_account(account_id).await;
        }

        let password_changed = update.password_hash.is_some();
        let account = self.accounts.update_account(account_id, update).await?;
        info!(account_id = %account_id, password_changed, "Account updated");
        Ok(account)
    }

    /// Deletes an account after re-verifying its password.
    pub async fn delete_account(&self, account_id: AccountId, password: &str) -> AppResult<()> {
        let account = self.current_account(account_id).await?;

        if !self.hasher.verify(password, &account.password_hash)? {
            warn!(account_id = %account_id, "Account deletion refused: wrong password");
            return Err(AppError::authentication("Incorrect password"));
        }

        self.accounts.delete_account(account_id).await?;
        info!(account_id = %account_id, "Account deleted");
        Ok(())
    }
}
