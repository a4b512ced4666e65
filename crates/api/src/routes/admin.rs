//! Route definitions for the `/admin` surface.
//!
//! Every handler behind this router enforces the admin role via the
//! [`RequireAdmin`](crate::middleware::rbac::RequireAdmin) extractor.

use axum::routing::{delete, get, patch};
use axum::Router;

use crate::handlers::{admin, invoice_pdf};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /clients                              -> list_clients
/// GET    /projects                             -> list_projects
/// PATCH  /projects/{id}/status                 -> update_project_status
/// GET    /stock                                -> list_stock
/// POST   /stock                                -> create_stock
/// PATCH  /stock/{id}                           -> update_stock
/// DELETE /stock/{id}                           -> delete_stock
/// GET    /projects/{id}/materials              -> list_project_materials
/// POST   /projects/{id}/materials              -> add_project_material
/// DELETE /projects/{project_id}/materials/{id} -> delete_project_material
/// POST   /invoices                             -> create_invoice
/// GET    /invoices                             -> list_invoices
/// GET    /invoices/{id}/pdf                    -> admin_download (PDF)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/clients", get(admin::list_clients))
        .route("/projects", get(admin::list_projects))
        .route("/projects/{id}/status", patch(admin::update_project_status))
        .route("/stock", get(admin::list_stock).post(admin::create_stock))
        .route(
            "/stock/{id}",
            patch(admin::update_stock).delete(admin::delete_stock),
        )
        .route(
            "/projects/{id}/materials",
            get(admin::list_project_materials).post(admin::add_project_material),
        )
        .route(
            "/projects/{project_id}/materials/{id}",
            delete(admin::delete_project_material),
        )
        .route(
            "/invoices",
            get(admin::list_invoices).post(admin::create_invoice),
        )
        .route("/invoices/{id}/pdf", get(invoice_pdf::admin_download))
}
