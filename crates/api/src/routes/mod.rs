pub mod admin;
pub mod auth;
pub mod client;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                  login (public)
/// /auth/register                               register (public, role = client)
/// /auth/profile                                profile (requires auth)
///
/// /admin/clients                               list active clients (admin only)
/// /admin/projects                              list all projects
/// /admin/projects/{id}/status                  set project status (PATCH)
/// /admin/stock                                 list, create
/// /admin/stock/{id}                            update (PATCH), delete
/// /admin/projects/{id}/materials               list, add
/// /admin/projects/{project_id}/materials/{id}  remove (DELETE)
/// /admin/invoices                              list, create
/// /admin/invoices/{id}/pdf                     download PDF
///
/// /client/projects                             list own, create
/// /client/projects/{id}                        own project detail
/// /client/materials                            stock catalog (read-only)
/// /client/invoices                             list own
/// /client/invoices/{id}/pay                    pay own invoice (POST)
/// /client/invoices/{id}/pdf                    download own PDF
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, register, profile).
        .nest("/auth", auth::router())
        // Admin management surface.
        .nest("/admin", admin::router())
        // Ownership-scoped client surface.
        .nest("/client", client::router())
}
