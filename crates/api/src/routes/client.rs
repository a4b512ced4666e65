//! Route definitions for the `/client` surface.
//!
//! All routes require authentication; entity access is ownership-scoped in
//! the handlers.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{client, invoice_pdf};
use crate::state::AppState;

/// Routes mounted at `/client`.
///
/// ```text
/// GET  /projects           -> list_projects (own)
/// POST /projects           -> create_project
/// GET  /projects/{id}      -> project_detail (own)
/// GET  /materials          -> list_materials (global catalog)
/// GET  /invoices           -> list_invoices (own)
/// POST /invoices/{id}/pay  -> pay_invoice (own, pending only)
/// GET  /invoices/{id}/pdf  -> client_download (own, PDF)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/projects",
            get(client::list_projects).post(client::create_project),
        )
        .route("/projects/{id}", get(client::project_detail))
        .route("/materials", get(client::list_materials))
        .route("/invoices", get(client::list_invoices))
        .route("/invoices/{id}/pay", post(client::pay_invoice))
        .route("/invoices/{id}/pdf", get(invoice_pdf::client_download))
}
