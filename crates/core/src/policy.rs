//! Authorization policy for protected operations.
//!
//! Every protected operation runs exactly one of these checks after the
//! entity has been fetched. Fetching (including the denormalized detail
//! joins) and authorizing are deliberately separate steps: a join result is
//! never an authorization input.
//!
//! Ownership failures report `Forbidden`, not `NotFound` -- "exists but is
//! not yours" stays distinguishable from "does not exist".

use crate::error::CoreError;
use crate::roles::Role;
use crate::types::DbId;

/// Require the admin role. Any other role is rejected.
pub fn require_admin(role: Role) -> Result<(), CoreError> {
    match role {
        Role::Admin => Ok(()),
        Role::Client => Err(CoreError::Forbidden("Admin role required".into())),
    }
}

/// Require that the requester owns the entity, unless they are an admin.
///
/// `owner_id` is the entity's `client_id`; `requester_id` is the
/// authenticated user's id.
pub fn check_owner(role: Role, owner_id: DbId, requester_id: DbId) -> Result<(), CoreError> {
    match role {
        Role::Admin => Ok(()),
        Role::Client if owner_id == requester_id => Ok(()),
        Role::Client => Err(CoreError::Forbidden(
            "You do not have permission to access this resource".into(),
        )),
    }
}
