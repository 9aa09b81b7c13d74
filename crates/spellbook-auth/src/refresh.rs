//! Opaque refresh token generation.

use rand::RngCore;
use rand::rngs::OsRng;

use crate::error::AuthError;

/// Entropy per refresh token, in bytes.
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Generates a 64-character lowercase hex refresh token from the OS RNG.
pub fn generate() -> Result<String, AuthError> {
    generate_from(&mut OsRng)
}

/// Generates a refresh token from the given random source.
///
/// Fails rather than returning a short or predictable token when the
/// source cannot fill the buffer.
pub fn generate_from<R: RngCore + ?Sized>(rng: &mut R) -> Result<String, AuthError> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    rng.try_fill_bytes(&mut bytes)
        .map_err(|e| AuthError::EntropySourceFailure(e.to_string()))?;
    Ok(hex::encode(bytes))
}
