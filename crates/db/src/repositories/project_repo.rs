//! Repository for the `projects` table.

use nomade_core::projects::ProjectStatus;
use nomade_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, ProjectWithClient};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, name, description, status, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// The status column is left to its `not_started` default: callers never
    /// choose the initial status.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (client_id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.client_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a project by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a client's projects, most recently created first.
    pub async fn list_by_client(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE client_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// List all projects joined with the owning client's name and email,
    /// most recently created first.
    pub async fn list_all_with_client(pool: &PgPool) -> Result<Vec<ProjectWithClient>, sqlx::Error> {
        sqlx::query_as::<_, ProjectWithClient>(
            "SELECT p.id, p.client_id, p.name, p.description, p.status,
                    p.created_at, p.updated_at,
                    u.name AS client_name, u.email AS client_email
             FROM projects p
             JOIN users u ON p.client_id = u.id
             ORDER BY p.created_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Set a project's status, bumping `updated_at` in the same statement.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: ProjectStatus,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET status = $2, updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }
}
