//! Project material association model and DTOs.

use nomade_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full project material row from the `project_materials` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectMaterial {
    pub id: DbId,
    pub project_id: DbId,
    pub stock_id: DbId,
    pub quantity: i32,
    pub created_at: Timestamp,
}

/// Project material joined with its stock item's name, unit, and
/// description, ordered by stock name in listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectMaterialWithStock {
    pub id: DbId,
    pub project_id: DbId,
    pub stock_id: DbId,
    pub quantity: i32,
    pub created_at: Timestamp,
    pub stock_name: String,
    pub stock_unit: String,
    pub stock_description: Option<String>,
}

/// DTO for allocating a stock item to a project.
#[derive(Debug)]
pub struct CreateProjectMaterial {
    pub project_id: DbId,
    pub stock_id: DbId,
    pub quantity: i32,
}
