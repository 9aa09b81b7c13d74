//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Placeholder signing secret shipped with the defaults. Never deploy it.
pub const DEFAULT_JWT_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Authentication and credential configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for access token signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token lifetime in seconds.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_seconds: i64,
    /// Refresh token lifetime in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_days: i64,
    /// Minimum password length accepted at registration.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Argon2id cost parameters.
    #[serde(default)]
    pub hashing: HashingConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            access_token_ttl_seconds: default_access_ttl(),
            refresh_token_ttl_days: default_refresh_ttl(),
            password_min_length: default_password_min(),
            hashing: HashingConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Check if the signing secret is still the shipped placeholder.
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .field("refresh_token_ttl_days", &self.refresh_token_ttl_days)
            .field("password_min_length", &self.password_min_length)
            .field("hashing", &self.hashing)
            .finish()
    }
}

/// Argon2id cost parameters used when creating new password hashes.
///
/// Verification always uses the parameters embedded in the stored hash,
/// so changing these only affects hashes created afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashingConfig {
    /// Memory cost in KiB.
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    /// Number of passes over memory.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Degree of parallelism (lanes).
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
    /// Salt length in bytes.
    #[serde(default = "default_salt_length")]
    pub salt_length: usize,
    /// Derived key length in bytes.
    #[serde(default = "default_key_length")]
    pub key_length: usize,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
            salt_length: default_salt_length(),
            key_length: default_key_length(),
        }
    }
}

fn default_jwt_secret() -> String {
    DEFAULT_JWT_SECRET.to_string()
}

fn default_access_ttl() -> i64 {
    3600
}

fn default_refresh_ttl() -> i64 {
    60
}

fn default_password_min() -> usize {
    6
}

fn default_memory_kib() -> u32 {
    64 * 1024
}

fn default_iterations() -> u32 {
    1
}

fn default_parallelism() -> u32 {
    2
}

fn default_salt_length() -> usize {
    16
}

fn default_key_length() -> usize {
    32
}
