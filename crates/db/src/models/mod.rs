//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - Where the API exposes partial updates, an update DTO (all `Option` fields)
//! - Read-side structs for the denormalized listing/detail joins

pub mod invoice;
pub mod project;
pub mod project_material;
pub mod stock_item;
pub mod user;
