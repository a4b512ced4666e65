//! HTTP request handlers, grouped by surface.
//!
//! - [`auth`] -- login, registration, profile.
//! - [`admin`] -- admin-only management surface (clients, projects, stock,
//!   materials, invoices).
//! - [`client`] -- ownership-scoped client surface.
//! - [`invoice_pdf`] -- PDF downloads shared by both surfaces.

pub mod admin;
pub mod auth;
pub mod client;
pub mod invoice_pdf;
