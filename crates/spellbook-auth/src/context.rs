//! Request-scoped identity produced by access token validation.

use spellbook_core::types::AccountId;
use spellbook_entity::account::Role;

/// The identity attached to a request once its access token validated.
///
/// The HTTP layer stores this value in the request extensions. The
/// privileged-route gate and handlers read the same type back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// Account the token was issued to.
    pub account_id: AccountId,
    /// Role embedded in the token at issuance.
    pub role: Role,
}

impl AuthContext {
    /// Creates a new context.
    pub fn new(account_id: AccountId, role: Role) -> Self {
        Self { account_id, role }
    }

    /// Returns `true` if the embedded role passes the privileged gate.
    pub fn is_privileged(&self) -> bool {
        self.role.is_privileged()
    }
}
