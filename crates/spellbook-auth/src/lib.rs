//! # spellbook-auth
//!
//! Authentication and session core for Spellbook.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and credential policy
//! - `jwt`: signed, short-lived access tokens (issue and validate)
//! - `refresh`: opaque 256-bit refresh token generation
//! - `bearer`: `Authorization: Bearer <token>` parsing
//! - `context`: the typed identity attached to authenticated requests
//! - `store`: persistence collaborators and an in-memory implementation
//! - `session`: login, refresh, revoke, and account lifecycle flows

pub mod bearer;
pub mod context;
pub mod error;
pub mod jwt;
pub mod password;
pub mod refresh;
pub mod session;
pub mod store;

pub use context::AuthContext;
pub use error::AuthError;
pub use jwt::{Claims, ISSUER, SigningSecret};
pub use password::{CredentialValidator, PasswordHasher};
pub use session::{AccessGrant, LoginResult, SessionManager};
pub use store::{AccountStore, MemoryStore, RefreshTokenStore};
