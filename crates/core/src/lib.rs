//! Domain core for the Nomade backend.
//!
//! Pure domain logic with no I/O: shared identifier types, the error
//! taxonomy, role definitions, invoice numbering and lifecycle rules,
//! project status values, and the authorization policy functions used by
//! every protected API operation.

pub mod error;
pub mod invoicing;
pub mod policy;
pub mod projects;
pub mod roles;
pub mod types;
