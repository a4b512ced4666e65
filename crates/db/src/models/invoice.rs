//! Invoice entity model, DTOs, and enriched read-side views.

use nomade_core::invoicing::InvoiceStatus;
use nomade_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full invoice row from the `invoices` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invoice {
    pub id: DbId,
    pub client_id: DbId,
    pub project_id: Option<DbId>,
    pub amount: f64,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: InvoiceStatus,
    pub issued_at: Timestamp,
    pub paid_at: Option<Timestamp>,
    pub invoice_number: Option<String>,
}

/// Invoice row joined with client and project names, used by the admin
/// invoice listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InvoiceWithNames {
    pub id: DbId,
    pub client_id: DbId,
    pub project_id: Option<DbId>,
    pub amount: f64,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: InvoiceStatus,
    pub issued_at: Timestamp,
    pub paid_at: Option<Timestamp>,
    pub invoice_number: Option<String>,
    pub client_name: String,
    pub project_name: Option<String>,
}

/// Single invoice enriched with client name/email and project name.
///
/// This is the read-side join backing detail and PDF views. It carries no
/// authority: ownership is checked against `client_id` by the caller, never
/// inferred from the join having succeeded.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InvoiceDetail {
    pub id: DbId,
    pub client_id: DbId,
    pub project_id: Option<DbId>,
    pub amount: f64,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: InvoiceStatus,
    pub issued_at: Timestamp,
    pub paid_at: Option<Timestamp>,
    pub invoice_number: Option<String>,
    pub client_name: String,
    pub client_email: String,
    pub project_name: Option<String>,
}

/// DTO for creating a new invoice. Status, issuance timestamp, and invoice
/// number are assigned by the repository, never by callers.
#[derive(Debug)]
pub struct CreateInvoice {
    pub client_id: DbId,
    pub project_id: Option<DbId>,
    pub amount: f64,
    pub description: Option<String>,
}
