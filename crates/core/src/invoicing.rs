//! Invoice numbering and lifecycle rules.
//!
//! Invoice numbers are assigned per calendar year of issuance:
//! `FAC-<year>-<sequence>` with the sequence zero-padded to five digits.
//! The sequence for a new invoice is the count of invoices already issued
//! that year plus one; uniqueness is ultimately guaranteed by the
//! `uq_invoices_invoice_number` constraint (the repository retries with a
//! fresh count when two concurrent creates collide on the same sequence).

use crate::types::DbId;
use serde::{Deserialize, Serialize};

/// Invoice lifecycle status, stored as TEXT in the `invoices` table.
///
/// Transitions are one-directional: `Pending` may become `Paid` or
/// `Cancelled`; both of those are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Cancelled,
}

impl InvoiceStatus {
    /// The TEXT value persisted in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }

    /// Whether no further transition is permitted from this status.
    pub fn is_terminal(self) -> bool {
        matches!(self, InvoiceStatus::Paid | InvoiceStatus::Cancelled)
    }

    /// Whether a transition from `self` to `next` is legal.
    pub fn can_transition_to(self, next: InvoiceStatus) -> bool {
        matches!(
            (self, next),
            (InvoiceStatus::Pending, InvoiceStatus::Paid)
                | (InvoiceStatus::Pending, InvoiceStatus::Cancelled)
        )
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored status value is not a known invoice status.
#[derive(Debug, thiserror::Error)]
#[error("unknown invoice status: {0}")]
pub struct ParseInvoiceStatusError(String);

impl TryFrom<String> for InvoiceStatus {
    type Error = ParseInvoiceStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            "cancelled" => Ok(InvoiceStatus::Cancelled),
            _ => Err(ParseInvoiceStatusError(value)),
        }
    }
}

/// Format an invoice number for the given issuance year and 1-based sequence.
///
/// The sequence is zero-padded to five digits: `FAC-2024-00004`.
pub fn format_invoice_number(year: i32, sequence: i64) -> String {
    format!("FAC-{year}-{sequence:05}")
}

/// Fallback display number for an invoice whose number was never assigned.
pub fn fallback_invoice_number(id: DbId) -> String {
    format!("FAC-{id}")
}
