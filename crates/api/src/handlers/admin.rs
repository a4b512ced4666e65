//! Handlers for the `/admin` surface.
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use nomade_core::error::CoreError;
use nomade_core::projects::ProjectStatus;
use nomade_core::types::DbId;
use nomade_db::models::invoice::{CreateInvoice, Invoice, InvoiceWithNames};
use nomade_db::models::project::{Project, ProjectWithClient};
use nomade_db::models::project_material::{
    CreateProjectMaterial, ProjectMaterial, ProjectMaterialWithStock,
};
use nomade_db::models::stock_item::{CreateStockItem, StockItem, UpdateStockItem};
use nomade_db::models::user::UserResponse;
use nomade_db::repositories::{
    InvoiceRepo, ProjectMaterialRepo, ProjectRepo, StockRepo, UserRepo,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `PATCH /admin/projects/{id}/status`.
///
/// The status arrives as a raw string and is parsed explicitly so an
/// unknown value is reported as a validation error, not a decode error.
#[derive(Debug, Deserialize)]
pub struct UpdateProjectStatusRequest {
    pub status: String,
}

/// Request body for `POST /admin/stock`.
#[derive(Debug, Deserialize)]
pub struct CreateStockRequest {
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub unit: Option<String>,
}

/// Request body for `POST /admin/projects/{id}/materials`.
#[derive(Debug, Deserialize)]
pub struct AddMaterialRequest {
    pub stock_id: DbId,
    pub quantity: i32,
}

/// Request body for `POST /admin/invoices`.
#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    pub client_id: DbId,
    pub project_id: Option<DbId>,
    pub amount: f64,
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Clients
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/clients
///
/// List all active client accounts (safe fields only).
pub async fn list_clients(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    let clients = UserRepo::list_active_clients(&state.pool).await?;
    let responses: Vec<UserResponse> = clients.iter().map(UserResponse::from).collect();
    Ok(Json(responses))
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/projects
///
/// List all projects with the owning client's name and email.
pub async fn list_projects(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<ProjectWithClient>>> {
    let projects = ProjectRepo::list_all_with_client(&state.pool).await?;
    Ok(Json(projects))
}

/// PATCH /api/v1/admin/projects/{id}/status
///
/// Set a project's status. Only the three defined values are accepted;
/// anything else is rejected before any write.
pub async fn update_project_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProjectStatusRequest>,
) -> AppResult<Json<Project>> {
    let status = ProjectStatus::try_from(input.status)
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let project = ProjectRepo::update_status(&state.pool, id, status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    Ok(Json(project))
}

// ---------------------------------------------------------------------------
// Stock
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/stock
pub async fn list_stock(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<StockItem>>> {
    let items = StockRepo::list(&state.pool).await?;
    Ok(Json(items))
}

/// POST /api/v1/admin/stock
pub async fn create_stock(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateStockRequest>,
) -> AppResult<(StatusCode, Json<StockItem>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name is required".into(),
        )));
    }
    if input.quantity < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Quantity must not be negative".into(),
        )));
    }

    let create_dto = CreateStockItem {
        name: input.name,
        description: input.description,
        quantity: input.quantity,
        unit: input.unit.unwrap_or_else(|| "unidad".to_string()),
    };
    let item = StockRepo::create(&state.pool, &create_dto).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PATCH /api/v1/admin/stock/{id}
pub async fn update_stock(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStockItem>,
) -> AppResult<Json<StockItem>> {
    if let Some(quantity) = input.quantity {
        if quantity < 0 {
            return Err(AppError::Core(CoreError::Validation(
                "Quantity must not be negative".into(),
            )));
        }
    }

    let item = StockRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Stock item",
            id,
        }))?;

    Ok(Json(item))
}

/// DELETE /api/v1/admin/stock/{id}
pub async fn delete_stock(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = StockRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Stock item",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Project materials
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/projects/{id}/materials
pub async fn list_project_materials(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<ProjectMaterialWithStock>>> {
    ensure_project_exists(&state, id).await?;
    let materials = ProjectMaterialRepo::list_by_project(&state.pool, id).await?;
    Ok(Json(materials))
}

/// POST /api/v1/admin/projects/{id}/materials
///
/// Allocate a stock item to a project. The allocation quantity is tracked
/// independently of the global stock level.
pub async fn add_project_material(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<AddMaterialRequest>,
) -> AppResult<(StatusCode, Json<ProjectMaterial>)> {
    ensure_project_exists(&state, id).await?;
    if StockRepo::find_by_id(&state.pool, input.stock_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Stock item",
            id: input.stock_id,
        }));
    }

    let create_dto = CreateProjectMaterial {
        project_id: id,
        stock_id: input.stock_id,
        quantity: input.quantity,
    };
    let material = ProjectMaterialRepo::create(&state.pool, &create_dto).await?;
    Ok((StatusCode::CREATED, Json(material)))
}

/// DELETE /api/v1/admin/projects/{project_id}/materials/{id}
pub async fn delete_project_material(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let material = ProjectMaterialRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|m| m.project_id == project_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project material",
            id,
        }))?;

    ProjectMaterialRepo::delete(&state.pool, material.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Invoices
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/invoices
///
/// Create an invoice for a client. The referenced client (and project, when
/// given) must exist; whether the project belongs to that client is NOT
/// checked, so an admin may invoice a client against any project.
pub async fn create_invoice(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateInvoiceRequest>,
) -> AppResult<(StatusCode, Json<Invoice>)> {
    if input.amount <= 0.0 {
        return Err(AppError::Core(CoreError::Validation(
            "Amount must be positive".into(),
        )));
    }
    if UserRepo::find_by_id(&state.pool, input.client_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id: input.client_id,
        }));
    }
    if let Some(project_id) = input.project_id {
        ensure_project_exists(&state, project_id).await?;
    }

    let create_dto = CreateInvoice {
        client_id: input.client_id,
        project_id: input.project_id,
        amount: input.amount,
        description: input.description,
    };
    let invoice = InvoiceRepo::create(&state.pool, &create_dto).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

/// GET /api/v1/admin/invoices
///
/// List all invoices with client and project names, most recently issued
/// first.
pub async fn list_invoices(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<InvoiceWithNames>>> {
    let invoices = InvoiceRepo::list_all_with_names(&state.pool).await?;
    Ok(Json(invoices))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_project_exists(state: &AppState, id: DbId) -> AppResult<()> {
    if ProjectRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }
    Ok(())
}
