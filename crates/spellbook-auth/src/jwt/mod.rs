//! Access token issuance and validation (HS256 JWT).
//!
//! Every call takes the [`SigningSecret`] explicitly; nothing here reads
//! process-wide state.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod secret;

pub use claims::{Claims, ISSUER};
pub use decoder::validate;
pub use encoder::{AccessToken, issue, issue_token};
pub use secret::SigningSecret;
