//! Handlers for the `/client` surface.
//!
//! Every handler requires authentication; entity access is additionally
//! gated by ownership (`client_id` must equal the requester's id). The
//! checks run in a fixed order: fetch, then ownership, then -- for payment
//! -- the state gate. An invoice that exists but belongs to someone else is
//! always reported as 403, even when it is already paid or cancelled.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use nomade_core::error::CoreError;
use nomade_core::invoicing::InvoiceStatus;
use nomade_core::policy;
use nomade_core::types::DbId;
use nomade_db::models::invoice::Invoice;
use nomade_db::models::project::{CreateProject, Project};
use nomade_db::models::project_material::ProjectMaterialWithStock;
use nomade_db::models::stock_item::StockItem;
use nomade_db::repositories::{InvoiceRepo, ProjectMaterialRepo, ProjectRepo, StockRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /client/projects`. Status is not accepted:
/// every new project starts as `not_started`.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: Option<String>,
}

/// Response body for `GET /client/projects/{id}`.
#[derive(Debug, Serialize)]
pub struct ProjectDetailResponse {
    pub project: Project,
    pub materials: Vec<ProjectMaterialWithStock>,
    pub invoices: Vec<Invoice>,
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// GET /api/v1/client/projects
///
/// List the authenticated user's own projects.
pub async fn list_projects(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list_by_client(&state.pool, user.user_id).await?;
    Ok(Json(projects))
}

/// POST /api/v1/client/projects
pub async fn create_project(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<Project>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name is required".into(),
        )));
    }

    let create_dto = CreateProject {
        client_id: user.user_id,
        name: input.name,
        description: input.description,
    };
    let project = ProjectRepo::create(&state.pool, &create_dto).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/client/projects/{id}
///
/// Project detail: the project itself, its material allocations, and the
/// owner's invoices attached to it.
pub async fn project_detail(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectDetailResponse>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    policy::check_owner(user.role, project.client_id, user.user_id)?;

    let materials = ProjectMaterialRepo::list_by_project(&state.pool, id).await?;
    let invoices = InvoiceRepo::list_for_project(&state.pool, project.client_id, id).await?;

    Ok(Json(ProjectDetailResponse {
        project,
        materials,
        invoices,
    }))
}

// ---------------------------------------------------------------------------
// Materials catalog
// ---------------------------------------------------------------------------

/// GET /api/v1/client/materials
///
/// The global stock catalog, read-only for clients.
pub async fn list_materials(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<Vec<StockItem>>> {
    let items = StockRepo::list(&state.pool).await?;
    Ok(Json(items))
}

// ---------------------------------------------------------------------------
// Invoices
// ---------------------------------------------------------------------------

/// GET /api/v1/client/invoices
///
/// List the authenticated user's own invoices, most recently issued first.
pub async fn list_invoices(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<Vec<Invoice>>> {
    let invoices = InvoiceRepo::list_by_client(&state.pool, user.user_id).await?;
    Ok(Json(invoices))
}

/// POST /api/v1/client/invoices/{id}/pay
///
/// Pay a pending invoice. Gate order: existence (404), ownership (403),
/// then state (409). The transition itself is a single conditional update,
/// so a concurrent second payment observes the state gate too.
pub async fn pay_invoice(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Invoice>> {
    // 1. Fetch.
    let invoice = InvoiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invoice",
            id,
        }))?;

    // 2. Ownership gate, reported even for already-processed invoices.
    policy::check_owner(user.role, invoice.client_id, user.user_id)?;

    // 3. State gate.
    if invoice.status != InvoiceStatus::Pending {
        return Err(AppError::Core(CoreError::InvalidState(
            "Invoice has already been processed".into(),
        )));
    }

    // 4. Atomic transition; a concurrent payment makes this a no-op.
    let updated = InvoiceRepo::mark_paid(&state.pool, id).await?;
    if !updated {
        return Err(AppError::Core(CoreError::InvalidState(
            "Invoice has already been processed".into(),
        )));
    }

    let paid = InvoiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::InternalError("Invoice disappeared after payment".into()))?;
    Ok(Json(paid))
}
