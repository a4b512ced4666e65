//! HTTP-level integration tests for authentication and role gating.
//!
//! Covers login, registration, profile, uniform 401 behavior for bad
//! credentials, and the admin role gate.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json};
use nomade_core::roles::Role;
use nomade_db::repositories::UserRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login returns 200 with a token and public user info.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let user = common::create_test_user(&pool, "ana@riego.test", "Ana Suarez", Role::Client).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "ana@riego.test", "password": common::TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["token"].is_string(), "response must contain a token");
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["email"], "ana@riego.test");
    assert_eq!(json["user"]["name"], "Ana Suarez");
    assert_eq!(json["user"]["role"], "client");
    assert!(
        json["user"]["password_hash"].is_null(),
        "password hash must never be serialized"
    );
}

/// Login with a wrong password returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    common::create_test_user(&pool, "bad@riego.test", "Bad Password", Role::Client).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "bad@riego.test", "password": "incorrect" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login with an unknown email returns 401 with the same message shape.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_unknown_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "ghost@riego.test", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A deactivated account cannot log in; the response is indistinguishable
/// from bad credentials.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_inactive_account(pool: PgPool) {
    let user =
        common::create_test_user(&pool, "retired@riego.test", "Retired", Role::Client).await;
    UserRepo::deactivate(&pool, user.id)
        .await
        .expect("deactivation should succeed");
    let app = common::build_test_app(pool);

    let body =
        serde_json::json!({ "email": "retired@riego.test", "password": common::TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Registration creates an active client account and returns 201 with a
/// usable token.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_creates_client(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({
        "email": "nuevo@riego.test",
        "password": "a-decent-password",
        "name": "Nuevo Cliente"
    });
    let response = post_json(app.clone(), "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    // The role is fixed server-side; there is no way to register an admin.
    assert_eq!(json["user"]["role"], "client");

    // The returned token works against an authenticated endpoint.
    let token = json["token"].as_str().unwrap();
    let profile = get_auth(app, "/api/v1/auth/profile", token).await;
    assert_eq!(profile.status(), StatusCode::OK);

    let stored = UserRepo::find_by_email(&pool, "nuevo@riego.test")
        .await
        .expect("lookup should succeed")
        .expect("user must exist");
    assert!(stored.is_active);
    assert_eq!(stored.role, Role::Client);
}

/// Registering an already-taken email returns 409 Conflict.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    common::create_test_user(&pool, "taken@riego.test", "First", Role::Client).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "taken@riego.test",
        "password": "another-password",
        "name": "Second"
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// A password below the minimum length is rejected before any write.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_short_password(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({
        "email": "short@riego.test",
        "password": "short",
        "name": "Shorty"
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let stored = UserRepo::find_by_email(&pool, "short@riego.test")
        .await
        .expect("lookup should succeed");
    assert!(stored.is_none(), "no user may be created on validation failure");
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// The profile endpoint returns the authenticated user's public fields.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_profile(pool: PgPool) {
    let user = common::create_test_user(&pool, "perfil@riego.test", "Perfil", Role::Client).await;
    let app = common::build_test_app(pool);
    let token = common::login_token(&app, "perfil@riego.test").await;

    let response = get_auth(app, "/api/v1/auth/profile", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], user.id);
    assert_eq!(json["email"], "perfil@riego.test");
    assert_eq!(json["role"], "client");
}

/// Profile without a token returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_profile_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/auth/profile").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A syntactically invalid token is rejected with the same 401 as a
/// missing one.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_garbage_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/auth/profile", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Role gate
// ---------------------------------------------------------------------------

/// Admin endpoints require authentication -- missing token returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_endpoint_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/admin/clients").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A client token is forbidden from the admin surface.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_endpoint_requires_admin_role(pool: PgPool) {
    common::create_test_user(&pool, "cli@riego.test", "Cliente", Role::Client).await;
    let app = common::build_test_app(pool);
    let token = common::login_token(&app, "cli@riego.test").await;

    let response = get_auth(app, "/api/v1/admin/clients", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// The admin client directory lists active clients but not admins.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_lists_active_clients(pool: PgPool) {
    common::create_test_user(&pool, "admin@riego.test", "Admin", Role::Admin).await;
    common::create_test_user(&pool, "c1@riego.test", "Cliente Uno", Role::Client).await;
    let inactive =
        common::create_test_user(&pool, "c2@riego.test", "Cliente Dos", Role::Client).await;
    UserRepo::deactivate(&pool, inactive.id)
        .await
        .expect("deactivation should succeed");

    let app = common::build_test_app(pool);
    let token = common::login_token(&app, "admin@riego.test").await;

    let response = get_auth(app, "/api/v1/admin/clients", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let clients = json.as_array().expect("body should be an array");
    assert_eq!(clients.len(), 1, "only the active client is listed");
    assert_eq!(clients[0]["email"], "c1@riego.test");
}
