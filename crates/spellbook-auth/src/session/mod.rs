//! Account and token lifecycle: register, login, refresh, revoke, delete.

pub mod manager;

pub use manager::{AccessGrant, LoginResult, SessionManager};
