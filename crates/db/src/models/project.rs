//! Project entity model and DTOs.

use nomade_core::projects::ProjectStatus;
use nomade_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub client_id: DbId,
    pub name: String,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Project row joined with the owning client's name and email, used by the
/// admin project listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectWithClient {
    pub id: DbId,
    pub client_id: DbId,
    pub name: String,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub client_name: String,
    pub client_email: String,
}

/// DTO for creating a new project. Status is not accepted from callers:
/// every new project starts as `not_started`.
#[derive(Debug)]
pub struct CreateProject {
    pub client_id: DbId,
    pub name: String,
    pub description: Option<String>,
}
