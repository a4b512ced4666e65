//! Repository for the `project_materials` table.

use nomade_core::types::DbId;
use sqlx::PgPool;

use crate::models::project_material::{
    CreateProjectMaterial, ProjectMaterial, ProjectMaterialWithStock,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, stock_id, quantity, created_at";

/// Provides CRUD operations for project material allocations.
pub struct ProjectMaterialRepo;

impl ProjectMaterialRepo {
    /// Allocate a stock item to a project, returning the created row.
    ///
    /// Deliberately does not touch `stock_items.quantity`: allocation and
    /// stock levels are independent ledgers.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProjectMaterial,
    ) -> Result<ProjectMaterial, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_materials (project_id, stock_id, quantity)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectMaterial>(&query)
            .bind(input.project_id)
            .bind(input.stock_id)
            .bind(input.quantity)
            .fetch_one(pool)
            .await
    }

    /// Find a project material by internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectMaterial>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_materials WHERE id = $1");
        sqlx::query_as::<_, ProjectMaterial>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's materials joined with their stock item details,
    /// ordered alphabetically by stock name.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectMaterialWithStock>, sqlx::Error> {
        sqlx::query_as::<_, ProjectMaterialWithStock>(
            "SELECT pm.id, pm.project_id, pm.stock_id, pm.quantity, pm.created_at,
                    s.name AS stock_name, s.unit AS stock_unit,
                    s.description AS stock_description
             FROM project_materials pm
             JOIN stock_items s ON pm.stock_id = s.id
             WHERE pm.project_id = $1
             ORDER BY s.name",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Remove a material allocation. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_materials WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
