//! Account role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Privilege levels an account can hold.
///
/// The role is embedded into access tokens at issuance and is not
/// re-read from the store while a token is being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular account.
    User,
    /// Administrator; may use privileged routes.
    Admin,
}

impl Role {
    /// The role required by privileged routes.
    pub const PRIVILEGED: Role = Role::Admin;

    /// Check if this role passes the privileged-route gate.
    pub fn is_privileged(&self) -> bool {
        *self == Self::PRIVILEGED
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = spellbook_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(spellbook_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: user, admin"
            ))),
        }
    }
}
