//! Invoice PDF download handlers.
//!
//! Both surfaces expose the same document; only the gate differs. Admins
//! download any invoice, clients only their own, and the authorization
//! check runs before a single byte is rendered.

use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use nomade_core::error::CoreError;
use nomade_core::invoicing::fallback_invoice_number;
use nomade_core::policy;
use nomade_core::types::DbId;
use nomade_db::models::invoice::InvoiceDetail;
use nomade_db::repositories::InvoiceRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::pdf::render_invoice;
use crate::state::AppState;

/// GET /api/v1/admin/invoices/{id}/pdf
///
/// Admins download any invoice, regardless of the owning client.
pub async fn admin_download(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let invoice = fetch_detail(&state, id).await?;
    respond_pdf(&invoice)
}

/// GET /api/v1/client/invoices/{id}/pdf
///
/// Clients download only their own invoices.
pub async fn client_download(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let invoice = fetch_detail(&state, id).await?;
    policy::check_owner(user.role, invoice.client_id, user.user_id)?;
    respond_pdf(&invoice)
}

/// Fetch the enriched invoice view. The join result carries no authority;
/// callers apply their own gate before rendering.
async fn fetch_detail(state: &AppState, id: DbId) -> AppResult<InvoiceDetail> {
    InvoiceRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invoice",
            id,
        }))
}

/// Render the invoice and wrap the bytes in a download response.
fn respond_pdf(invoice: &InvoiceDetail) -> AppResult<Response> {
    let bytes = render_invoice(invoice)
        .map_err(|e| AppError::InternalError(format!("PDF rendering error: {e}")))?;

    let number = invoice
        .invoice_number
        .clone()
        .unwrap_or_else(|| fallback_invoice_number(invoice.id));

    let headers = [
        (CONTENT_TYPE, "application/pdf".to_string()),
        (
            CONTENT_DISPOSITION,
            format!("attachment; filename=factura-{number}.pdf"),
        ),
    ];
    Ok((headers, bytes).into_response())
}
