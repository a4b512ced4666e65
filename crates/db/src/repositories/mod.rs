//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod invoice_repo;
pub mod project_material_repo;
pub mod project_repo;
pub mod stock_repo;
pub mod user_repo;

pub use invoice_repo::InvoiceRepo;
pub use project_material_repo::ProjectMaterialRepo;
pub use project_repo::ProjectRepo;
pub use stock_repo::StockRepo;
pub use user_repo::UserRepo;
