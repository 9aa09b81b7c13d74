//! Credential policy enforcement for new accounts.

use validator::ValidateEmail;

use spellbook_core::config::AuthConfig;
use spellbook_core::error::AppError;

/// Throwaway mail providers refused at registration.
const DISPOSABLE_DOMAINS: &[&str] = &[
    "mailinator.com",
    "tempmail.com",
    "10minutemail.com",
    "guerrillamail.com",
    "yopmail.com",
    "trashmail.com",
    "fakeinbox.com",
    "dispostable.com",
];

/// Validates email addresses and passwords against configured policy.
#[derive(Debug, Clone)]
pub struct CredentialValidator {
    /// Minimum password length in characters.
    min_length: usize,
}

impl CredentialValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Validates a password against the minimum length policy.
    pub fn validate_password(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.min_length
            )));
        }
        Ok(())
    }

    /// Validates email format and rejects disposable providers.
    pub fn validate_email(&self, email: &str) -> Result<(), AppError> {
        let candidate = email.to_owned();
        if !candidate.validate_email() {
            return Err(AppError::validation("Invalid email format"));
        }

        if is_disposable(email) {
            return Err(AppError::validation(
                "Disposable email addresses are not allowed",
            ));
        }
        Ok(())
    }
}

/// Normalizes an email for lookups and uniqueness checks.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_disposable(email: &str) -> bool {
    match email.rsplit_once('@') {
        Some((_, domain)) => DISPOSABLE_DOMAINS.contains(&domain.to_lowercase().as_str()),
        None => true,
    }
}
