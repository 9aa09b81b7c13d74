//! Argon2id password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString},
};
use rand::RngCore;
use rand::rngs::OsRng;

use spellbook_core::config::HashingConfig;

use crate::error::AuthError;

/// Salt length bounds in bytes. The upper bound keeps the B64 salt within
/// the 64-character PHC field.
const MIN_SALT_BYTES: usize = 8;
const MAX_SALT_BYTES: usize = 48;

/// Handles password hashing and verification using Argon2id.
///
/// New hashes use the configured cost parameters. Verification reads the
/// parameters, salt, and key length back out of the PHC string, so hashes
/// created under older settings keep verifying.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    /// Cost parameters and output length for new hashes.
    params: Params,
    /// Salt length in bytes.
    salt_length: usize,
}

impl PasswordHasher {
    /// Creates a new password hasher from hashing configuration.
    pub fn new(config: &HashingConfig) -> Result<Self, AuthError> {
        if !(MIN_SALT_BYTES..=MAX_SALT_BYTES).contains(&config.salt_length) {
            return Err(AuthError::Hashing(format!(
                "salt length {} is out of range",
                config.salt_length
            )));
        }

        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            Some(config.key_length),
        )
        .map_err(|e| AuthError::Hashing(format!("invalid Argon2 parameters: {e}")))?;

        Ok(Self {
            params,
            salt_length: config.salt_length,
        })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a plaintext password with a fresh random salt.
    ///
    /// The returned PHC string encodes algorithm, version, costs, salt,
    /// and digest.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        let mut salt_bytes = vec![0u8; self.salt_length];
        OsRng
            .try_fill_bytes(&mut salt_bytes)
            .map_err(|e| AuthError::Hashing(format!("salt generation failed: {e}")))?;

        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| AuthError::Hashing(format!("salt encoding failed: {e}")))?;

        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::Hashing(e.to_string()))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` on a clean mismatch. Errors only when the stored
    /// hash cannot be parsed or names parameters Argon2 rejects.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|e| AuthError::MalformedHash(e.to_string()))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::MalformedHash(e.to_string())),
        }
    }
}
