//! User roles.
//!
//! The role set is closed: every user is either an administrator or a
//! client. Authorization decisions dispatch on this enum (see
//! [`crate::policy`]) instead of comparing raw strings.

use serde::{Deserialize, Serialize};

/// A user's role, stored as TEXT in the `users` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Unrestricted read/write across all entities.
    Admin,
    /// End customer; scoped to entities whose `client_id` is their own id.
    Client,
}

impl Role {
    /// The TEXT value persisted in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Client => "client",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored role value is not one of the known roles.
#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(String);

impl TryFrom<String> for Role {
    type Error = ParseRoleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "admin" => Ok(Role::Admin),
            "client" => Ok(Role::Client),
            _ => Err(ParseRoleError(value)),
        }
    }
}
