//! Repository for the `invoices` table.
//!
//! Owns invoice number assignment: the sequence for a new invoice is the
//! count of invoices already issued in the current calendar year plus one.
//! Counting and inserting are separate statements, so two concurrent creates
//! can compute the same sequence; the `uq_invoices_invoice_number`
//! constraint rejects the loser, and [`InvoiceRepo::create`] retries it with
//! a fresh count.

use chrono::{Datelike, Utc};
use nomade_core::invoicing::format_invoice_number;
use nomade_core::types::DbId;
use sqlx::PgPool;

use crate::models::invoice::{CreateInvoice, Invoice, InvoiceDetail, InvoiceWithNames};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, client_id, project_id, amount, description, status, issued_at, paid_at, invoice_number";

/// How many times `create` recomputes the sequence after losing a numbering
/// race before surfacing the conflict to the caller.
const NUMBERING_MAX_ATTEMPTS: u32 = 3;

/// Provides invoice persistence and numbering.
pub struct InvoiceRepo;

impl InvoiceRepo {
    /// Insert a new invoice with a freshly assigned `FAC-<year>-<seq>`
    /// number, returning the created row.
    ///
    /// The new invoice always starts `pending` with `paid_at` unset and
    /// `issued_at` set by the database. On a unique-constraint rejection of
    /// the computed number the sequence is recounted and the insert retried,
    /// up to [`NUMBERING_MAX_ATTEMPTS`] times.
    pub async fn create(pool: &PgPool, input: &CreateInvoice) -> Result<Invoice, sqlx::Error> {
        let mut attempt = 0;
        loop {
            attempt += 1;

            let year = Utc::now().year();
            let sequence = Self::count_for_year(pool, year).await? + 1;
            let number = format_invoice_number(year, sequence);

            match Self::insert(pool, input, &number).await {
                Err(err)
                    if attempt < NUMBERING_MAX_ATTEMPTS && is_invoice_number_conflict(&err) =>
                {
                    // Lost the count-then-insert race; recount and retry.
                    continue;
                }
                other => return other,
            }
        }
    }

    async fn insert(
        pool: &PgPool,
        input: &CreateInvoice,
        invoice_number: &str,
    ) -> Result<Invoice, sqlx::Error> {
        let query = format!(
            "INSERT INTO invoices (client_id, project_id, amount, description, invoice_number)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(input.client_id)
            .bind(input.project_id)
            .bind(input.amount)
            .bind(&input.description)
            .bind(invoice_number)
            .fetch_one(pool)
            .await
    }

    /// Count invoices whose issuance year equals `year`.
    pub async fn count_for_year(pool: &PgPool, year: i32) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM invoices WHERE date_part('year', issued_at)::int = $1",
        )
        .bind(year)
        .fetch_one(pool)
        .await
    }

    /// Find an invoice by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invoices WHERE id = $1");
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a single invoice enriched with client name/email and project
    /// name, for detail and PDF views.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<InvoiceDetail>, sqlx::Error> {
        sqlx::query_as::<_, InvoiceDetail>(
            "SELECT i.id, i.client_id, i.project_id, i.amount, i.description, i.status,
                    i.issued_at, i.paid_at, i.invoice_number,
                    u.name AS client_name, u.email AS client_email,
                    p.name AS project_name
             FROM invoices i
             JOIN users u ON i.client_id = u.id
             LEFT JOIN projects p ON i.project_id = p.id
             WHERE i.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List all invoices joined with client and project names, most recently
    /// issued first.
    pub async fn list_all_with_names(pool: &PgPool) -> Result<Vec<InvoiceWithNames>, sqlx::Error> {
        sqlx::query_as::<_, InvoiceWithNames>(
            "SELECT i.id, i.client_id, i.project_id, i.amount, i.description, i.status,
                    i.issued_at, i.paid_at, i.invoice_number,
                    u.name AS client_name, p.name AS project_name
             FROM invoices i
             JOIN users u ON i.client_id = u.id
             LEFT JOIN projects p ON i.project_id = p.id
             ORDER BY i.issued_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// List a client's invoices, most recently issued first.
    pub async fn list_by_client(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Vec<Invoice>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM invoices
             WHERE client_id = $1
             ORDER BY issued_at DESC"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// List a client's invoices attached to one of their projects, most
    /// recently issued first. Backs the project detail view.
    pub async fn list_for_project(
        pool: &PgPool,
        client_id: DbId,
        project_id: DbId,
    ) -> Result<Vec<Invoice>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM invoices
             WHERE client_id = $1 AND project_id = $2
             ORDER BY issued_at DESC"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(client_id)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Transition a pending invoice to paid, setting `paid_at`, as a single
    /// conditional update.
    ///
    /// Returns `true` if the row was updated. `false` means the invoice was
    /// not pending at the moment of the update (already paid or cancelled),
    /// which guarantees at-most-once payment even under concurrent calls.
    pub async fn mark_paid(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE invoices SET status = 'paid', paid_at = now()
             WHERE id = $1 AND status = 'pending'",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Whether an error is a unique-constraint rejection of the computed invoice
/// number (PostgreSQL error code 23505 against `uq_invoices_invoice_number`).
fn is_invoice_number_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some("uq_invoices_invoice_number")
        }
        _ => false,
    }
}
